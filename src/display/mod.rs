//! Rendering layer.
//!
//! Scene functions receive a draw surface and an immutable view of the game
//! state.  No game logic is performed here; this module only translates
//! state into draw calls.  `terminal` provides the crossterm-backed surface.

pub mod terminal;

use crate::entities::GameState;
use crate::geometry::Rect;

// ── Surface capability ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageHandle {
    Target,
    Projectile,
    Ship,
    Explosion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTone {
    /// Score counter in the corner.
    Hud,
    /// Large heading.
    Title,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub align: TextAlign,
    pub tone: TextTone,
}

impl TextStyle {
    pub const fn new(align: TextAlign, tone: TextTone) -> Self {
        Self { align, tone }
    }
}

/// Something that can be drawn on, sized in logical viewport units.
pub trait DrawSurface {
    fn clear(&mut self, region: Rect);
    fn draw_image(&mut self, image: ImageHandle, rect: Rect);
    /// `x` is interpreted according to `style.align`; `y` is the text row.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

pub const GAME_OVER_TITLE: &str = "Game Over";
pub const NEW_ROUND_HINT: &str = "R - New Game   Q - Quit";

fn viewport(state: &GameState) -> Rect {
    Rect::new(0.0, 0.0, state.width, state.height)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete in-play frame.
pub fn render_scene<S: DrawSurface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(viewport(state));

    for target in &state.targets {
        surface.draw_image(ImageHandle::Target, target.rect);
    }
    for projectile in &state.projectiles {
        surface.draw_image(ImageHandle::Projectile, projectile.rect);
    }
    for explosion in &state.explosions {
        surface.draw_image(ImageHandle::Explosion, explosion.rect);
    }
    surface.draw_image(ImageHandle::Ship, state.ship.rect);

    surface.draw_text(
        &format!("Score: {}", state.score),
        state.width - 10.0,
        30.0,
        TextStyle::new(TextAlign::Right, TextTone::Hud),
    );
}

/// Render the terminal screen shown after the ship is hit.
pub fn render_game_over<S: DrawSurface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(viewport(state));

    let cx = state.width / 2.0;
    let cy = state.height / 2.0;
    surface.draw_text(
        GAME_OVER_TITLE,
        cx,
        cy,
        TextStyle::new(TextAlign::Center, TextTone::Title),
    );
    surface.draw_text(
        &format!("Score: {}", state.score),
        cx,
        cy + 50.0,
        TextStyle::new(TextAlign::Center, TextTone::Body),
    );
    surface.draw_text(
        NEW_ROUND_HINT,
        cx,
        cy + 100.0,
        TextStyle::new(TextAlign::Center, TextTone::Body),
    );
}

mod common;

use std::time::Duration;

use chicken_shooter::compute::*;
use chicken_shooter::entities::*;
use chicken_shooter::geometry::Rect;

use common::{config, doom_target, projectile, seeded_rng, target};

fn make_state() -> GameState {
    init_state(&config())
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_ship_centred_on_bottom_edge() {
    let s = make_state();
    assert_eq!(s.ship.rect, Rect::new(450.0, 700.0, 100.0, 100.0));
    assert_eq!(s.ship.speed, 5.0);
}

#[test]
fn init_state_empty_round() {
    let s = make_state();
    assert!(s.targets.is_empty());
    assert!(s.projectiles.is_empty());
    assert!(s.explosions.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.phase, GamePhase::Playing);
    assert_eq!(s.difficulty.speed_multiplier, 1.0);
    assert_eq!(s.difficulty.spawn_multiplier, 1.0);
    assert_eq!(s.difficulty.spawn_interval, Duration::from_millis(500));
}

// ── ship control ──────────────────────────────────────────────────────────────

#[test]
fn pointer_past_right_edge_clamps() {
    let mut s = make_state();
    s.ship.rect.x = 500.0;
    set_ship_from_pointer(&mut s, 1050.0);
    assert_eq!(s.ship.rect.x, 900.0);
}

#[test]
fn pointer_past_left_edge_clamps() {
    let mut s = make_state();
    set_ship_from_pointer(&mut s, -300.0);
    assert_eq!(s.ship.rect.x, 0.0);
}

#[test]
fn pointer_centres_ship() {
    let mut s = make_state();
    set_ship_from_pointer(&mut s, 300.0);
    assert_eq!(s.ship.rect.x, 250.0);
}

#[test]
fn nudge_moves_by_ship_speed_and_clamps() {
    let mut s = make_state();
    nudge_ship(&mut s, 1.0);
    assert_eq!(s.ship.rect.x, 455.0);
    nudge_ship(&mut s, -2.0);
    assert_eq!(s.ship.rect.x, 445.0);

    s.ship.rect.x = 898.0;
    nudge_ship(&mut s, 1.0);
    assert_eq!(s.ship.rect.x, 900.0);
}

#[test]
fn projectile_launches_from_ship_centre() {
    let mut s = make_state();
    fire_projectile(&mut s, &config());
    assert_eq!(s.projectiles.len(), 1);
    let p = s.projectiles.get(0).unwrap();
    assert_eq!(p.rect, Rect::new(480.0, 700.0, 40.0, 40.0));
    assert_eq!(p.speed, 10.0);
}

// ── spawner ───────────────────────────────────────────────────────────────────

#[test]
fn spawned_target_sits_above_viewport() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_target(&mut s, &config(), &mut rng);
    }
    assert_eq!(s.targets.len(), 50);
    for t in &s.targets {
        assert!(t.rect.x >= 0.0 && t.rect.x <= 950.0, "x = {}", t.rect.x);
        assert_eq!(t.rect.y, -50.0);
        assert_eq!(t.rect.width, 50.0);
        assert_eq!(t.rect.height, 50.0);
        assert_eq!(t.speed, 2.0);
    }
}

#[test]
fn spawned_target_speed_follows_multiplier() {
    let mut s = make_state();
    s.difficulty.speed_multiplier = 1.5;
    spawn_target(&mut s, &config(), &mut seeded_rng());
    assert_eq!(s.targets.get(0).unwrap().speed, 3.0);
}

#[test]
fn spawn_in_viewport_narrower_than_target() {
    let mut s = make_state();
    s.width = 40.0;
    spawn_target(&mut s, &config(), &mut seeded_rng());
    assert_eq!(s.targets.get(0).unwrap().rect.x, 0.0);
}

#[test]
fn spawn_is_deterministic_for_a_seed() {
    let mut a = make_state();
    let mut b = make_state();
    spawn_target(&mut a, &config(), &mut seeded_rng());
    spawn_target(&mut b, &config(), &mut seeded_rng());
    assert_eq!(a.targets, b.targets);
}

#[test]
fn effective_interval_divides_by_spawn_multiplier() {
    let mut d = initial_difficulty(&config());
    assert_eq!(effective_spawn_interval(&d), Duration::from_millis(500));
    d.spawn_multiplier = 2.0;
    assert_eq!(effective_spawn_interval(&d), Duration::from_millis(250));
}

// ── difficulty ramp ───────────────────────────────────────────────────────────

#[test]
fn ramp_after_n_steps_matches_capped_powers() {
    let cfg = config();
    for n in 0..12 {
        let mut d = initial_difficulty(&cfg);
        let (mut speed, mut spawn) = (1.0f32, 1.0f32);
        for _ in 0..n {
            ramp_difficulty(&mut d, &cfg);
            speed = (speed * 1.1).min(1.5);
            spawn = (spawn * 1.2).min(2.0);
        }
        assert_eq!(d.speed_multiplier, speed, "n = {n}");
        assert_eq!(d.spawn_multiplier, spawn, "n = {n}");
        assert!((d.speed_multiplier - 1.1f32.powi(n).min(1.5)).abs() < 1e-5);
        assert!((d.spawn_multiplier - 1.2f32.powi(n).min(2.0)).abs() < 1e-5);
    }
}

#[test]
fn ramp_saturates_at_caps() {
    let cfg = config();
    let mut d = initial_difficulty(&cfg);
    for _ in 0..100 {
        ramp_difficulty(&mut d, &cfg);
    }
    assert_eq!(d.speed_multiplier, 1.5);
    assert_eq!(d.spawn_multiplier, 2.0);
    // base interval itself never changes
    assert_eq!(d.spawn_interval, Duration::from_millis(500));
}

#[test]
fn ramp_reports_change_until_both_capped() {
    let cfg = config();
    let mut d = initial_difficulty(&cfg);
    // 1.2^4 > 2 caps the spawn rate on step four; 1.1^5 > 1.5 caps speed on
    // step five, which still counts as a change
    for _ in 0..4 {
        assert!(ramp_difficulty(&mut d, &cfg));
    }
    assert_eq!(d.spawn_multiplier, 2.0);
    assert!(d.speed_multiplier < 1.5);
    assert!(ramp_difficulty(&mut d, &cfg));
    assert_eq!(d.speed_multiplier, 1.5);
    assert!(!ramp_difficulty(&mut d, &cfg));
}

#[test]
fn ramp_is_monotone() {
    let cfg = config();
    let mut d = initial_difficulty(&cfg);
    let mut prev = d.clone();
    for _ in 0..20 {
        ramp_difficulty(&mut d, &cfg);
        assert!(d.speed_multiplier >= prev.speed_multiplier);
        assert!(d.spawn_multiplier >= prev.spawn_multiplier);
        prev = d.clone();
    }
}

// ── tick — movement & culling ─────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    tick(&mut s, &config());
    assert_eq!(s.frame, 6);
}

#[test]
fn tick_target_moves_down() {
    let mut s = make_state();
    s.targets.push(target(100.0, 100.0, 50.0, 2.0));
    tick(&mut s, &config());
    assert_eq!(s.targets.get(0).unwrap().rect, Rect::new(100.0, 102.0, 50.0, 50.0));
}

#[test]
fn tick_target_removed_past_bottom() {
    let mut s = make_state();
    s.targets.push(target(100.0, 100.0, 50.0, 2.0));
    let mut ticks = 0;
    while !s.targets.is_empty() {
        tick(&mut s, &config());
        ticks += 1;
        assert!(ticks < 1000);
    }
    // y goes 100 → 800 in 350 ticks (kept), 802 on the next (dropped)
    assert_eq!(ticks, 351);
    assert_eq!(s.phase, GamePhase::Playing);
}

#[test]
fn tick_target_exactly_at_bottom_is_kept() {
    let mut s = make_state();
    s.targets.push(target(100.0, 798.0, 50.0, 2.0));
    tick(&mut s, &config());
    assert_eq!(s.targets.len(), 1);
}

#[test]
fn tick_projectile_moves_up_and_leaves_top() {
    let mut s = make_state();
    s.projectiles.push(projectile(10.0, 10.0, 40.0, 10.0));
    s.projectiles.push(projectile(60.0, 5.0, 40.0, 10.0));
    tick(&mut s, &config());
    // 10 → 0 kept, 5 → -5 dropped
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles.get(0).unwrap().rect.y, 0.0);
}

// ── tick — projectile ↔ target ────────────────────────────────────────────────

#[test]
fn tick_overlapping_pair_scores() {
    let mut s = make_state();
    s.projectiles.push(projectile(120.0, 90.0, 40.0, 10.0));
    s.targets.push(target(100.0, 100.0, 50.0, 2.0));
    let outcome = tick(&mut s, &config());

    assert!(s.projectiles.is_empty());
    assert!(s.targets.is_empty());
    assert_eq!(s.score, 1);
    assert_eq!(outcome.hits, vec![Rect::new(100.0, 102.0, 50.0, 50.0)]);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions.get(0).unwrap().rect, outcome.hits[0]);
}

#[test]
fn tick_one_projectile_takes_one_target() {
    let mut s = make_state();
    s.projectiles.push(projectile(100.0, 100.0, 40.0, 0.0));
    s.targets.push(target(90.0, 90.0, 50.0, 0.0));
    s.targets.push(target(110.0, 110.0, 50.0, 0.0));
    tick(&mut s, &config());

    assert_eq!(s.score, 1);
    assert!(s.projectiles.is_empty());
    assert_eq!(s.targets.len(), 1);
    // first match wins
    assert_eq!(s.targets.get(0).unwrap().rect.x, 110.0);
}

#[test]
fn tick_one_target_absorbs_one_projectile() {
    let mut s = make_state();
    s.projectiles.push(projectile(100.0, 100.0, 40.0, 0.0));
    s.projectiles.push(projectile(105.0, 105.0, 40.0, 0.0));
    s.targets.push(target(90.0, 90.0, 50.0, 0.0));
    tick(&mut s, &config());

    assert_eq!(s.score, 1);
    assert!(s.targets.is_empty());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles.get(0).unwrap().rect.x, 105.0);
}

#[test]
fn tick_score_grows_by_hit_count() {
    let mut s = make_state();
    s.score = 7;
    for i in 0..3 {
        let x = 100.0 + i as f32 * 200.0;
        s.projectiles.push(projectile(x, 200.0, 40.0, 0.0));
        s.targets.push(target(x, 200.0, 50.0, 0.0));
    }
    // a miss
    s.projectiles.push(projectile(900.0, 50.0, 40.0, 0.0));
    let outcome = tick(&mut s, &config());

    assert_eq!(outcome.hits.len(), 3);
    assert_eq!(s.score, 10);
    assert_eq!(s.projectiles.len(), 1);
    assert!(s.targets.is_empty());
}

#[test]
fn tick_without_collisions_keeps_score() {
    let mut s = make_state();
    s.projectiles.push(projectile(0.0, 300.0, 40.0, 10.0));
    s.targets.push(target(800.0, 0.0, 50.0, 2.0));
    let outcome = tick(&mut s, &config());
    assert!(outcome.hits.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn explosion_fades_after_configured_frames() {
    let mut s = make_state();
    s.projectiles.push(projectile(100.0, 100.0, 40.0, 0.0));
    s.targets.push(target(100.0, 100.0, 50.0, 0.0));
    tick(&mut s, &config());
    assert_eq!(s.explosions.get(0).unwrap().frames, 8);

    for _ in 0..7 {
        tick(&mut s, &config());
    }
    assert_eq!(s.explosions.len(), 1);
    tick(&mut s, &config());
    assert!(s.explosions.is_empty());
}

// ── tick — target ↔ ship ──────────────────────────────────────────────────────

#[test]
fn tick_target_on_ship_ends_round() {
    let mut s = make_state();
    let t = doom_target(&s);
    s.targets.push(t);
    let outcome = tick(&mut s, &config());
    assert!(outcome.ship_hit);
    assert_eq!(s.phase, GamePhase::GameOver);
}

#[test]
fn tick_shot_down_target_cannot_hit_ship() {
    let mut s = make_state();
    let t = doom_target(&s);
    s.projectiles.push(projectile(t.rect.x, t.rect.y, 40.0, 0.0));
    s.targets.push(t);
    let outcome = tick(&mut s, &config());
    assert!(!outcome.ship_hit);
    assert_eq!(s.phase, GamePhase::Playing);
    assert_eq!(s.score, 1);
}

#[test]
fn tick_game_over_still_resolves_hits_that_frame() {
    let mut s = make_state();
    let doom = doom_target(&s);
    s.targets.push(doom);
    s.projectiles.push(projectile(100.0, 100.0, 40.0, 0.0));
    s.targets.push(target(100.0, 100.0, 50.0, 0.0));
    let outcome = tick(&mut s, &config());
    assert!(outcome.ship_hit);
    assert_eq!(s.score, 1);
}

#[test]
fn tick_is_inert_after_game_over() {
    let mut s = make_state();
    s.phase = GamePhase::GameOver;
    s.targets.push(target(100.0, 100.0, 50.0, 2.0));
    s.frame = 3;
    let outcome = tick(&mut s, &config());
    assert_eq!(outcome, TickOutcome::default());
    assert_eq!(s.frame, 3);
    assert_eq!(s.targets.get(0).unwrap().rect.y, 100.0);
}

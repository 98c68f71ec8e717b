//! Sound cues.  The core only names sounds; a sink decides what playing one
//! means.  Sinks are fire-and-forget: they never report failure back.

use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundHandle {
    Fire,
    Explosion,
    /// Background loop.  Plays for the whole round, paused on game over.
    Ambient,
}

pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle);
    fn pause(&mut self, sound: SoundHandle);
}

/// Terminal stand-in for a mixer: cues go to the trace log and the ambient
/// loop's on/off state is remembered.
#[derive(Clone, Debug, Default)]
pub struct TracedAudio {
    ambient_playing: bool,
    cues: u64,
}

impl TracedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    /// Total cues received, play and pause alike.
    #[cfg(test)]
    fn cues(&self) -> u64 {
        self.cues
    }
}

impl AudioSink for TracedAudio {
    fn play(&mut self, sound: SoundHandle) {
        self.cues += 1;
        if sound == SoundHandle::Ambient {
            self.ambient_playing = true;
        }
        trace!(?sound, cue = self.cues, ambient = self.ambient_playing, "play");
    }

    fn pause(&mut self, sound: SoundHandle) {
        self.cues += 1;
        if sound == SoundHandle::Ambient {
            self.ambient_playing = false;
        }
        trace!(?sound, cue = self.cues, ambient = self.ambient_playing, "pause");
    }
}

//! Sound effect dispatch
//!
//! The simulation only says which effect happened. `AudioManager` turns that
//! into a named sample from the selected set and hands it to a backend.

use crate::settings::{AudioSettings, SettingsChanges};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    BallPaddleHit,
    /// Ball bounces off the top or bottom edge
    BallEdgeHit,
    /// Ball left the field and is served again
    BallReset,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::BallPaddleHit => "BallPaddleHit",
            SoundEffect::BallEdgeHit => "BallEdgeHit",
            SoundEffect::BallReset => "BallReset",
        }
    }
}

/// Plays a named sample, fire-and-forget
pub trait SfxPlayer {
    /// `volume` is 0.0 - 1.0
    fn play(&mut self, sample: &str, volume: f32);
}

/// Backend for headless runs: logs instead of playing
#[derive(Debug, Default)]
pub struct LogSfxPlayer;

impl SfxPlayer for LogSfxPlayer {
    fn play(&mut self, sample: &str, volume: f32) {
        log::debug!("sfx {sample} @ {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager<P> {
    player: P,
    enabled: bool,
    /// 0 - 100
    volume: i32,
    sfx_set: i32,
}

impl<P: SfxPlayer> AudioManager<P> {
    pub fn new(player: P) -> Self {
        let defaults = AudioSettings::default();
        Self {
            player,
            enabled: defaults.enabled,
            volume: defaults.volume,
            sfx_set: defaults.sfx_set,
        }
    }

    /// Pick up new audio settings if they changed
    pub fn apply_settings(&mut self, settings: &AudioSettings, changes: SettingsChanges) {
        if !changes.audio_changed {
            return;
        }
        self.enabled = settings.enabled;
        self.volume = settings.volume;
        self.sfx_set = settings.sfx_set;
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled || self.volume <= 0 {
            return;
        }

        let sample = format!("{}_{}", effect.name(), self.sfx_set);
        self.player.play(&sample, self.volume as f32 / 100.0);
    }

    /// Play whatever sound a game event carries
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let GameEvent::Sound(effect) = event {
            self.play(*effect);
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

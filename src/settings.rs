//! Game settings and preferences
//!
//! Persisted as JSON through [`crate::persistence`]. Every value is
//! sanitised before it is applied, so the rest of the game can trust it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::Key;
use crate::persistence::SettingsStorage;
use crate::sim::{PaddleKind, PaddleSide};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub enabled: bool,
    /// 0 - 100
    pub volume: i32,
    /// Which sound effect set to use, 1-based
    pub sfx_set: i32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 100,
            sfx_set: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub full_screen: bool,
    pub resolution: Vec2,
    pub vsync: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            resolution: DEFAULT_RESOLUTION,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Ramp the game speed up over the course of a match
    pub auto_increase_speed: bool,
    /// Starting game speed
    pub game_speed: f32,
    pub left_paddle: PaddleKind,
    pub right_paddle: PaddleKind,
    pub ball_count: u32,
    /// First side to reach this wins (0 = no limit)
    pub score_limit: i32,
    /// Match length in seconds (0 = no limit)
    pub time_limit_secs: f32,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            auto_increase_speed: false,
            game_speed: GAME_SPEED_MIN,
            left_paddle: PaddleKind::Player,
            right_paddle: PaddleKind::Player,
            ball_count: BALL_MIN_COUNT,
            score_limit: 5,
            time_limit_secs: 0.0,
        }
    }
}

/// Keys that move one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub move_up: Key,
    pub move_down: Key,
}

impl ControlScheme {
    pub const LEFT_DEFAULT: Self = Self {
        move_up: Key::W,
        move_down: Key::S,
    };

    pub const RIGHT_DEFAULT: Self = Self {
        move_up: Key::Up,
        move_down: Key::Down,
    };

    /// Replace unbound keys with the ones from `defaults`
    fn fill_unbound(&mut self, defaults: ControlScheme) {
        if self.move_up == Key::None {
            self.move_up = defaults.move_up;
        }
        if self.move_down == Key::None {
            self.move_down = defaults.move_down;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub left_paddle: ControlScheme,
    pub right_paddle: ControlScheme,
}

impl ControlSettings {
    /// Controls for the paddle on `side`
    pub fn for_side(&self, side: PaddleSide) -> ControlScheme {
        match side {
            PaddleSide::Left => self.left_paddle,
            PaddleSide::Right => self.right_paddle,
        }
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            left_paddle: ControlScheme::LEFT_DEFAULT,
            right_paddle: ControlScheme::RIGHT_DEFAULT,
        }
    }
}

/// Everything the player can configure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub audio: AudioSettings,
    pub video: VideoSettings,
    pub gameplay: GameplaySettings,
    pub controls: ControlSettings,
}

impl GameSettings {
    /// Clamp out-of-range values and replace invalid ones with defaults.
    ///
    /// A resolution not in `supported_resolutions` falls back to the default
    /// one. An empty list accepts any resolution.
    pub fn sanitize(&mut self, supported_resolutions: &[Vec2]) {
        self.audio.volume = self.audio.volume.clamp(0, 100);
        self.audio.sfx_set = self.audio.sfx_set.clamp(1, SFX_SET_COUNT);

        if !supported_resolutions.is_empty()
            && !supported_resolutions.contains(&self.video.resolution)
        {
            log::warn!(
                "Resolution {}x{} is not supported, using default",
                self.video.resolution.x,
                self.video.resolution.y
            );
            self.video.resolution = DEFAULT_RESOLUTION;
        }

        let gameplay = &mut self.gameplay;
        gameplay.ball_count = gameplay.ball_count.clamp(BALL_MIN_COUNT, BALL_MAX_COUNT);
        gameplay.game_speed = if gameplay.game_speed.is_nan() {
            GAME_SPEED_MIN
        } else {
            gameplay.game_speed.clamp(GAME_SPEED_MIN, GAME_SPEED_MAX)
        };
        gameplay.score_limit = gameplay.score_limit.max(0);
        gameplay.time_limit_secs = if gameplay.time_limit_secs.is_nan() {
            0.0
        } else {
            gameplay.time_limit_secs.max(0.0)
        };

        self.controls.left_paddle.fill_unbound(ControlScheme::LEFT_DEFAULT);
        self.controls.right_paddle.fill_unbound(ControlScheme::RIGHT_DEFAULT);
    }
}

/// Which settings categories differ from the previously applied settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChanges {
    pub audio_changed: bool,
    pub video_changed: bool,
    pub gameplay_changed: bool,
    pub controls_changed: bool,
}

impl SettingsChanges {
    pub const ALL: Self = Self {
        audio_changed: true,
        video_changed: true,
        gameplay_changed: true,
        controls_changed: true,
    };

    pub fn between(old: &GameSettings, new: &GameSettings) -> Self {
        Self {
            audio_changed: old.audio != new.audio,
            video_changed: old.video != new.video,
            gameplay_changed: old.gameplay != new.gameplay,
            controls_changed: old.controls != new.controls,
        }
    }

    pub fn any(&self) -> bool {
        self.audio_changed || self.video_changed || self.gameplay_changed || self.controls_changed
    }
}

/// Owns the applied settings and their storage
pub struct SettingsManager<S> {
    storage: S,
    settings: Option<GameSettings>,
    supported_resolutions: Vec<Vec2>,
}

impl<S: SettingsStorage> SettingsManager<S> {
    pub fn new(storage: S, supported_resolutions: Vec<Vec2>) -> Self {
        Self {
            storage,
            settings: None,
            supported_resolutions,
        }
    }

    /// The applied settings, or the defaults if nothing was applied yet
    pub fn settings(&self) -> GameSettings {
        self.settings.clone().unwrap_or_default()
    }

    /// Load stored settings. Failures are logged and reported as `None`.
    pub fn load(&self) -> Option<GameSettings> {
        match self.storage.load() {
            Ok(Some(mut settings)) => {
                settings.sanitize(&self.supported_resolutions);
                log::info!("Loaded settings");
                Some(settings)
            }
            Ok(None) => {
                log::info!("No stored settings, using defaults");
                None
            }
            Err(e) => {
                log::error!("Failed to load settings: {e}");
                None
            }
        }
    }

    /// Store the applied settings. Failures are logged.
    pub fn save(&self) {
        match self.storage.save(&self.settings()) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::error!("Failed to save settings: {e}"),
        }
    }

    /// Sanitise and apply `new_settings`, reporting what changed.
    /// The first apply reports every category as changed.
    pub fn apply(&mut self, mut new_settings: GameSettings) -> SettingsChanges {
        new_settings.sanitize(&self.supported_resolutions);

        let changes = match &self.settings {
            Some(old) => SettingsChanges::between(old, &new_settings),
            None => SettingsChanges::ALL,
        };
        log::debug!("Settings applied: {changes:?}");

        self.settings = Some(new_settings);
        changes
    }

    /// Startup sequence: load, apply (defaults when nothing is stored), then
    /// save so the file always holds the sanitised settings.
    pub fn initialize(&mut self) -> SettingsChanges {
        let stored = self.load().unwrap_or_default();
        let changes = self.apply(stored);
        self.save();
        changes
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

//! Donker Pong - a two-paddle box-collider arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, collisions, match state)
//! - `settings`: Player-facing configuration and sanitising
//! - `persistence`: JSON settings storage
//! - `audio`: Sound effect dispatch
//! - `input`: Keyboard state tracking

pub mod audio;
pub mod input;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use settings::{GameSettings, SettingsChanges, SettingsManager};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    use crate::sim::RectF;

    /// Fixed simulation timestep (60 Hz, one displacement step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Resolution the game logic is laid out for
    pub const DEFAULT_RESOLUTION: Vec2 = Vec2::new(1024.0, 768.0);
    /// World bounds matching the default resolution
    pub const DEFAULT_BOUNDS: RectF = RectF::new(0.0, 0.0, 1024.0, 768.0);

    /// Global game speed
    pub const GAME_SPEED_MIN: f32 = 1.0;
    pub const GAME_SPEED_MAX: f32 = 2.0;
    /// Added to the game speed after every interval when auto-increase is on
    pub const GAME_SPEED_INCREASE_FACTOR: f32 = 0.1;
    /// Seconds between speed increases
    pub const GAME_SPEED_INCREASE_INTERVAL: f32 = 30.0;

    /// Ball defaults
    pub const BALL_MIN_COUNT: u32 = 1;
    pub const BALL_MAX_COUNT: u32 = 2;
    pub const BALL_SIZE: Vec2 = Vec2::new(24.0, 24.0);
    pub const BALL_BOUNDS_PADDING: Vec2 = Vec2::new(0.0, 16.0);
    /// Pixels per tick at game speed 1.0
    pub const BALL_SPEED: f32 = 10.0;
    /// Seconds a ball waits after a reset before it starts moving
    pub const BALL_RESET_DELAY: f32 = 2.0;
    /// Start of the 90 degree cone a ball travelling left is served in
    pub const BALL_LEFT_DIRECTION_ANGLE_START: f32 = 135.0;
    /// Start of the 90 degree cone a ball travelling right is served in
    pub const BALL_RIGHT_DIRECTION_ANGLE_START: f32 = 315.0;
    pub const BALL_ANGLE_RANGE: f32 = 90.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(24.0, 96.0);
    pub const PADDLE_BOUNDS_PADDING: Vec2 = Vec2::new(32.0, 24.0);
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Slows the AI paddle down so it can't always reach the ball
    pub const AI_DIFFICULTY_SPEED_FACTOR: f32 = 0.64;

    /// Number of interchangeable sound effect sets
    pub const SFX_SET_COUNT: i32 = 2;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut angle = angle % 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    // -1e-7 + 360.0 rounds to 360.0 in f32
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Check whether `value` lies between `min` and `max`
#[inline]
pub fn is_between(value: f32, min: f32, max: f32, inclusive: bool) -> bool {
    if inclusive {
        value >= min && value <= max
    } else {
        value > min && value < max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(-1e-7), 0.0);
    }

    #[test]
    fn test_is_between() {
        assert!(is_between(90.0, 90.0, 270.0, true));
        assert!(!is_between(90.0, 90.0, 270.0, false));
        assert!(is_between(180.0, 90.0, 270.0, false));
        assert!(!is_between(300.0, 90.0, 270.0, true));
    }

    proptest! {
        #[test]
        fn prop_normalized_angle_in_range(angle in -100_000.0f32..100_000.0) {
            let normalized = normalize_degrees(angle);
            prop_assert!((0.0..360.0).contains(&normalized));
        }
    }
}

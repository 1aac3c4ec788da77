//! Match status shared by the simulation
//!
//! `GameInfo` is what actors read (bounds, global speed) and what the ball
//! writes (scores). `TickContext` bundles it with the RNG and the event queue
//! so collision reactions have somewhere to put their side effects.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::rect::RectF;
use super::registry::RegistryCommand;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Overall game phase. Ordering matters: moving into `InProgress` from an
/// earlier phase starts a new match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    None,
    InMenu,
    InProgress,
    Paused,
    Ended,
}

/// Which side of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
}

impl PaddleSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleSide::Left => "left",
            PaddleSide::Right => "right",
        }
    }
}

/// Status of the running game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub phase: GamePhase,
    /// World bounds all actors are kept in
    pub bounds: RectF,
    /// Global speed multiplier
    pub speed: f32,
    /// Render scale from world units to screen pixels
    pub scale: f32,
    pub left_score: u32,
    pub right_score: u32,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            phase: GamePhase::None,
            bounds: DEFAULT_BOUNDS,
            speed: GAME_SPEED_MIN,
            scale: 1.0,
            left_score: 0,
            right_score: 0,
        }
    }
}

impl GameInfo {
    pub fn is_in_progress(&self) -> bool {
        self.phase == GamePhase::InProgress
    }
}

/// Something the host should know about after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged {
        previous: GamePhase,
        current: GamePhase,
    },
    ScoreChanged {
        previous_left: u32,
        left: u32,
        previous_right: u32,
        right: u32,
    },
    Sound(SoundEffect),
}

/// Mutable state handed to actors while they react
pub struct TickContext {
    pub info: GameInfo,
    pub rng: Pcg32,
    pub events: Vec<GameEvent>,
    /// Registry changes requested mid-tick, applied once the tick is done
    pub deferred: Vec<RegistryCommand<Actor>>,
}

impl TickContext {
    pub fn new(info: GameInfo, seed: u64) -> Self {
        Self {
            info,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Queue a fire-and-forget sound
    pub fn play(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    /// Give a point to `side`
    pub fn award_point(&mut self, side: PaddleSide) {
        let previous_left = self.info.left_score;
        let previous_right = self.info.right_score;
        match side {
            PaddleSide::Left => self.info.left_score += 1,
            PaddleSide::Right => self.info.right_score += 1,
        }
        log::info!(
            "{} side scored ({} - {})",
            side.as_str(),
            self.info.left_score,
            self.info.right_score
        );
        self.push_score_change(previous_left, previous_right);
    }

    pub fn reset_scores(&mut self) {
        let previous_left = self.info.left_score;
        let previous_right = self.info.right_score;
        self.info.left_score = 0;
        self.info.right_score = 0;
        self.push_score_change(previous_left, previous_right);
    }

    /// Switch phase, returning the previous one if it changed
    pub fn set_phase(&mut self, phase: GamePhase) -> Option<GamePhase> {
        let previous = self.info.phase;
        if previous == phase {
            return None;
        }

        self.info.phase = phase;
        log::info!("Game phase {:?} -> {:?}", previous, phase);
        self.events.push(GameEvent::PhaseChanged {
            previous,
            current: phase,
        });
        Some(previous)
    }

    fn push_score_change(&mut self, previous_left: u32, previous_right: u32) {
        self.events.push(GameEvent::ScoreChanged {
            previous_left,
            left: self.info.left_score,
            previous_right,
            right: self.info.right_score,
        });
    }
}

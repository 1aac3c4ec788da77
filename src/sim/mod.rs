//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod ball;
pub mod collision;
pub mod paddle;
pub mod rect;
pub mod registry;
pub mod state;
pub mod sweep;
pub mod tick;

pub use actor::{Actor, UpdateFrame};
pub use ball::Ball;
pub use collision::{BoxCollider, check_bounds_collision, check_collider_collision};
pub use paddle::{Paddle, PaddleKind};
pub use rect::RectF;
pub use registry::{ActorRegistry, RegistryCommand};
pub use state::{GameEvent, GameInfo, GamePhase, PaddleSide, TickContext};
pub use sweep::run_collision_sweep;
pub use tick::GameSession;

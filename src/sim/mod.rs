//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Per-frame stepping with wall time fed in, never read
//! - No rendering or platform dependencies

pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use spawn::Spawner;
pub use state::{GamePhase, GameState, Lane, Obstacle, Player};
pub use tick::{TickInput, tick};

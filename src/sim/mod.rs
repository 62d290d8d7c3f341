//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected at engine construction
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod engine;
pub mod level;
pub mod physics;
pub mod state;

pub use body::Body;
pub use collision::{CollisionEvent, clamp_to_bounds, resolve_balloon_collisions};
pub use engine::GameEngine;
pub use level::{Level, generate_level};
pub use state::{Balloon, Collectable, GameState, GameStatus, Obstacle, ObstacleKind};

//! Puff Drift - a balloon-drift arcade game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation,
//!   fixed-timestep game loop)
//! - `tuning`: Data-driven game balance
//!
//! The crate is presentation-free. A host render loop hands wall-clock frame
//! deltas to [`sim::GameEngine::update`], sends player input through
//! [`sim::GameEngine::puff`], and reads entity positions plus the camera
//! offset back every frame; [`sim::GameEngine::interpolation_alpha`] exposes
//! the unsimulated remainder for render interpolation.

pub mod sim;
pub mod tuning;

pub use sim::{GameEngine, GameState, GameStatus};
pub use tuning::Tuning;

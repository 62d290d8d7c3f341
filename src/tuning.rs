//! Gameplay tuning
//!
//! Every balance number lives in one immutable struct handed to the engine at
//! construction. Tests build their own variants without touching any global,
//! and two presets cover the supported level styles.

use serde::{Deserialize, Serialize};

/// Immutable gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Simulation loop ===
    /// Seconds simulated per fixed step
    pub fixed_timestep: f32,
    /// Upper clamp on one frame's wall-clock delta
    pub max_frame_time: f32,
    /// World dimensions as a multiple of the viewport
    pub world_scale: f32,

    // === Physics ===
    /// Per-step velocity decay factor
    pub linear_damping: f32,
    /// Per-step angular velocity decay factor
    pub angular_damping: f32,
    /// Energy kept through an elastic bounce
    pub restitution: f32,
    /// Energy kept through a wall bounce
    pub wall_restitution: f32,
    /// Extra separation past touching distance when resolving overlap
    pub separation_bias: f32,
    /// Squared speed below which an airless balloon counts as stopped
    pub rest_threshold: f32,

    // === Balloon ===
    pub max_air: u32,
    /// Impulse magnitude of one puff
    pub puff_force: f32,
    /// Seconds between puffs
    pub puff_cooldown: f32,
    pub balloon_radius: f32,
    pub balloon_mass: f32,

    // === Obstacles ===
    pub obstacle_mass: f32,
    pub min_obstacle_radius: f32,
    pub max_obstacle_radius: f32,
    pub sharp_count: u32,
    pub neutral_count: u32,

    // === Collectables ===
    pub collectable_count: u32,
    pub collectable_radius: f32,
    pub collectable_points: u32,
    /// Air units restored per pickup
    pub air_refill: u32,
    /// Pulse phase advance per second
    pub pulse_rate: f32,

    // === Level generation ===
    /// Clearance reserved around the balloon at spawn; half of it around
    /// everything else
    pub min_spawn_distance: f32,
    /// Rejection-sampling attempts before an entity is dropped
    pub placement_attempts: u32,
    /// Keep-out border along the world edges
    pub edge_margin: f32,
    /// Give entities a randomized starting velocity and spin
    pub initial_motion: bool,
    pub balloon_min_speed: f32,
    pub balloon_max_speed: f32,
    pub obstacle_min_speed: f32,
    pub obstacle_max_speed: f32,
    /// Spin magnitude band; the lower bound keeps rotation visible
    pub min_spin: f32,
    pub max_spin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::scrolling()
    }
}

impl Tuning {
    /// Triple-viewport world with camera follow; everything drifts from the
    /// first frame
    pub fn scrolling() -> Self {
        Self {
            // Simulation loop
            fixed_timestep: 1.0 / 60.0,
            max_frame_time: 0.25,
            world_scale: 3.0,

            // Physics
            linear_damping: 0.99,
            angular_damping: 0.98,
            restitution: 0.8,
            wall_restitution: 0.8,
            separation_bias: 1.0,
            rest_threshold: 1.0,

            // Balloon
            max_air: 10,
            puff_force: 400.0,
            puff_cooldown: 0.2,
            balloon_radius: 40.0,
            balloon_mass: 1.0,

            // Obstacles
            obstacle_mass: 5.0,
            min_obstacle_radius: 30.0,
            max_obstacle_radius: 60.0,
            sharp_count: 12,
            neutral_count: 10,

            // Collectables
            collectable_count: 15,
            collectable_radius: 25.0,
            collectable_points: 100,
            air_refill: 2,
            pulse_rate: 3.0,

            // Level generation
            min_spawn_distance: 100.0,
            placement_attempts: 50,
            edge_margin: 20.0,
            initial_motion: true,
            balloon_min_speed: 30.0,
            balloon_max_speed: 60.0,
            obstacle_min_speed: 20.0,
            obstacle_max_speed: 50.0,
            min_spin: 0.87,
            max_spin: 1.5,
        }
    }

    /// One-screen world: no camera travel, layout starts at rest
    pub fn single_screen() -> Self {
        Self {
            world_scale: 1.0,
            initial_motion: false,
            ..Self::scrolling()
        }
    }
}

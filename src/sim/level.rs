//! Level generation via spatial rejection sampling
//!
//! Placement keeps a running list of (position, clearance) pairs; every
//! candidate position must clear all earlier entries. A candidate that fails
//! its whole attempt budget is dropped silently, so a crowded configuration
//! produces a sparser level rather than an error.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Balloon, Collectable, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// A freshly generated level, built atomically from one RNG pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub balloon: Balloon,
    pub obstacles: Vec<Obstacle>,
    pub collectables: Vec<Collectable>,
}

/// Generate a level for a `width` x `height` world. Identical tuning, seed
/// state, and dimensions produce an identical level.
///
/// The balloon spawns at a fixed spot in the left-center region and reserves
/// a double-size clearance around itself; obstacles and collectables reserve
/// half of that.
pub fn generate_level(width: f32, height: f32, tuning: &Tuning, rng: &mut Pcg32) -> Level {
    let mut placed: Vec<(Vec2, f32)> = Vec::new();

    let balloon_position = Vec2::new(width * 0.15, height * 0.5);
    let mut balloon = Balloon::new(balloon_position, tuning);
    if tuning.initial_motion {
        balloon.body.velocity =
            random_velocity(rng, tuning.balloon_min_speed, tuning.balloon_max_speed);
        balloon.body.angular_velocity = random_spin(rng, tuning);
    }
    placed.push((balloon_position, tuning.balloon_radius + tuning.min_spawn_distance));

    let mut obstacles = Vec::new();
    for (kind, count) in [
        (ObstacleKind::Sharp, tuning.sharp_count),
        (ObstacleKind::Neutral, tuning.neutral_count),
    ] {
        for _ in 0..count {
            let radius =
                rng.random_range(tuning.min_obstacle_radius..tuning.max_obstacle_radius);
            let Some(position) = find_open_position(width, height, radius, &placed, tuning, rng)
            else {
                continue;
            };

            let mut obstacle = match kind {
                ObstacleKind::Sharp => {
                    let spikes: u32 = rng.random_range(4..=8);
                    Obstacle::sharp(position, radius, tuning.obstacle_mass, spikes)
                }
                ObstacleKind::Neutral => {
                    Obstacle::neutral(position, radius, tuning.obstacle_mass)
                }
            };
            if tuning.initial_motion {
                obstacle.body.velocity =
                    random_velocity(rng, tuning.obstacle_min_speed, tuning.obstacle_max_speed);
                obstacle.body.angular_velocity = random_spin(rng, tuning);
            }

            obstacles.push(obstacle);
            placed.push((position, radius + tuning.min_spawn_distance / 2.0));
        }
    }

    let mut collectables = Vec::new();
    for _ in 0..tuning.collectable_count {
        let Some(position) =
            find_open_position(width, height, tuning.collectable_radius, &placed, tuning, rng)
        else {
            continue;
        };

        let pulse_phase = rng.random_range(0.0..TAU);
        collectables.push(Collectable::new(
            position,
            tuning.collectable_radius,
            tuning.collectable_points,
            tuning.air_refill,
            pulse_phase,
        ));
        placed.push((position, tuning.collectable_radius + tuning.min_spawn_distance / 2.0));
    }

    Level { balloon, obstacles, collectables }
}

/// Rejection-sample a center that clears every placed entry, keeping the
/// whole circle at least `edge_margin` inside the world. `None` once the
/// attempt budget runs out, or when the world cannot fit the circle at all.
fn find_open_position(
    width: f32,
    height: f32,
    radius: f32,
    placed: &[(Vec2, f32)],
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Option<Vec2> {
    let padding = radius + tuning.edge_margin;
    if width - padding <= padding || height - padding <= padding {
        log::debug!("world {width}x{height} too small for radius {radius:.0}");
        return None;
    }

    for _ in 0..tuning.placement_attempts {
        let candidate = Vec2::new(
            rng.random_range(padding..width - padding),
            rng.random_range(padding..height - padding),
        );

        let clear = placed.iter().all(|&(position, clearance)| {
            let required = radius + clearance;
            candidate.distance_squared(position) >= required * required
        });

        if clear {
            return Some(candidate);
        }
    }

    log::debug!(
        "no open position for radius {radius:.0} after {} attempts",
        tuning.placement_attempts
    );
    None
}

/// Velocity with a uniform random heading and a speed inside [min, max)
fn random_velocity(rng: &mut Pcg32, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let speed = rng.random_range(min_speed..max_speed);
    Vec2::from_angle(angle) * speed
}

/// Spin with magnitude inside the configured band and a random sign. The
/// band's lower bound keeps rotation visible on everything that moves.
fn random_spin(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let speed = rng.random_range(tuning.min_spin..tuning.max_spin);
    if rng.random_bool(0.5) { speed } else { -speed }
}

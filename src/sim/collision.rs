//! Collision detection and response for the balloon's world
//!
//! One pass per fixed step: obstacles in list order, then collectables. A
//! sharp hit pops the balloon and ends the pass immediately. Neutral hits get
//! positional separation followed by an elastic exchange; only the balloon
//! receives angular impulse from the contact.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::physics;
use super::state::{Balloon, Collectable, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// What happened between the balloon and the world during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// A sharp obstacle reached the balloon; the pass stopped here
    Popped,
    /// Elastic bounce off a neutral obstacle (index into the obstacle list)
    Bounced { obstacle: usize },
    /// Pickup by index, with its point value for score attribution
    Collected { collectable: usize, points: u32 },
}

/// Run one collision pass for the balloon against obstacles and collectables.
/// Events come back in resolution order; a `Popped` event is always last.
pub fn resolve_balloon_collisions(
    balloon: &mut Balloon,
    obstacles: &mut [Obstacle],
    collectables: &mut [Collectable],
    tuning: &Tuning,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for (index, obstacle) in obstacles.iter_mut().enumerate() {
        if !balloon.body.collides_with(&obstacle.body) {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Sharp => {
                balloon.pop();
                events.push(CollisionEvent::Popped);
                return events;
            }
            ObstacleKind::Neutral => {
                bounce(balloon, obstacle, tuning);
                events.push(CollisionEvent::Bounced { obstacle: index });
            }
        }
    }

    for (index, collectable) in collectables.iter_mut().enumerate() {
        if !balloon.body.collides_with(&collectable.body) {
            continue;
        }

        collectable.collect();
        balloon.refill_air(collectable.air_refill, tuning.max_air);
        events.push(CollisionEvent::Collected {
            collectable: index,
            points: collectable.points,
        });
    }

    events
}

/// Separate, exchange velocities elastically, then feed the balloon's
/// velocity change back as an impulse at the contact point for its angular
/// response. The obstacle takes no spin from this interaction.
fn bounce(balloon: &mut Balloon, obstacle: &mut Obstacle, tuning: &Tuning) {
    separate_bodies(&mut balloon.body, &mut obstacle.body, tuning.separation_bias);

    // Elastic exchange uses the post-separation positions
    let (new_v1, new_v2) = physics::elastic_collision(
        balloon.body.velocity,
        obstacle.body.velocity,
        balloon.body.mass,
        obstacle.body.mass,
        balloon.body.position,
        obstacle.body.position,
        tuning.restitution,
    );

    let contact = balloon.body.contact_point(&obstacle.body);
    let impulse = (new_v1 - balloon.body.velocity) * balloon.body.mass;

    balloon.body.velocity = new_v1;
    balloon.body.angular_velocity = physics::apply_angular_impulse(
        balloon.body.angular_velocity,
        contact,
        balloon.body.position,
        impulse,
        balloon.body.moment_of_inertia(),
    );
    obstacle.body.velocity = new_v2;
}

/// Push two overlapping bodies apart along the line of centers. Each moves in
/// proportion to the other's mass, plus a fixed bias past touching distance.
/// Exactly coincident centers have no separation axis and stay put.
fn separate_bodies(a: &mut Body, b: &mut Body, bias: f32) {
    let delta = a.position - b.position;
    let overlap = (a.radius + b.radius) - delta.length();
    if overlap <= 0.0 {
        return;
    }

    let direction = delta.normalize_or_zero();
    let total_mass = a.mass + b.mass;

    a.position += direction * (overlap * b.mass / total_mass + bias);
    b.position -= direction * (overlap * a.mass / total_mass + bias);
}

/// Clamp a body inside the world rectangle. Axes clamp independently; a
/// clamped axis flips and scales its velocity component. Returns whether any
/// clamp hit.
pub fn clamp_to_bounds(
    body: &mut Body,
    width: f32,
    height: f32,
    padding: f32,
    wall_restitution: f32,
) -> bool {
    let min_x = padding + body.radius;
    let max_x = width - padding - body.radius;
    let min_y = padding + body.radius;
    let max_y = height - padding - body.radius;

    let mut hit = false;

    if body.position.x < min_x {
        body.position.x = min_x;
        body.velocity.x = -body.velocity.x * wall_restitution;
        hit = true;
    } else if body.position.x > max_x {
        body.position.x = max_x;
        body.velocity.x = -body.velocity.x * wall_restitution;
        hit = true;
    }

    if body.position.y < min_y {
        body.position.y = min_y;
        body.velocity.y = -body.velocity.y * wall_restitution;
        hit = true;
    } else if body.position.y > max_y {
        body.position.y = max_y;
        body.velocity.y = -body.velocity.y * wall_restitution;
        hit = true;
    }

    hit
}

//! Stateless physics math
//!
//! Pure functions over kinematic quantities. Damping factors are per-fixed-step
//! multipliers and must be applied exactly once per step; everything else is
//! plain Euler integration and impulse accounting.

use glam::Vec2;

#[inline]
pub fn integrate_position(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * dt
}

#[inline]
pub fn apply_drag(velocity: Vec2, damping: f32) -> Vec2 {
    velocity * damping
}

#[inline]
pub fn integrate_rotation(rotation: f32, angular_velocity: f32, dt: f32) -> f32 {
    rotation + angular_velocity * dt
}

#[inline]
pub fn apply_angular_drag(angular_velocity: f32, damping: f32) -> f32 {
    angular_velocity * damping
}

/// Instantaneous velocity change from a linear impulse
#[inline]
pub fn apply_impulse(velocity: Vec2, impulse: Vec2, mass: f32) -> Vec2 {
    velocity + impulse / mass
}

/// Angular velocity change from a linear impulse applied off-center. The
/// torque is the 2D cross product of the contact offset and the impulse.
#[inline]
pub fn apply_angular_impulse(
    angular_velocity: f32,
    contact: Vec2,
    center: Vec2,
    impulse: Vec2,
    moment_of_inertia: f32,
) -> f32 {
    let offset = contact - center;
    let torque = offset.perp_dot(impulse);
    angular_velocity + torque / moment_of_inertia
}

/// Elastic collision between two circles, resolved along the line of centers.
///
/// Returns the post-collision velocities. Restitution below 1.0 bleeds energy
/// out of the exchange; total momentum is conserved either way. Exactly
/// coincident centers leave both velocities unchanged since there is no line
/// of centers to resolve along.
pub fn elastic_collision(
    v1: Vec2,
    v2: Vec2,
    m1: f32,
    m2: f32,
    x1: Vec2,
    x2: Vec2,
    restitution: f32,
) -> (Vec2, Vec2) {
    let delta = x1 - x2;
    let dist_sq = delta.length_squared();
    if dist_sq == 0.0 {
        return (v1, v2);
    }

    let total_mass = m1 + m2;
    let along = (v1 - v2).dot(delta) / dist_sq;

    let new_v1 = v1 - delta * (2.0 * m2 / total_mass * along * restitution);
    let new_v2 = v2 + delta * (2.0 * m1 / total_mass * along * restitution);

    (new_v1, new_v2)
}

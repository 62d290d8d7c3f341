//! Shared kinematic body embedded in every simulated entity
//!
//! A body is a circle with linear and angular motion. Physics integration and
//! collision checks operate on bodies uniformly; entity-specific behavior
//! (air, spikes, pulse) lives next to the embedding entity instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics;

/// Circular rigid body. Radius and mass are fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation in radians
    pub rotation: f32,
    /// Radians per second
    pub angular_velocity: f32,
    /// Collision radius, > 0
    pub radius: f32,
    /// Mass, > 0
    pub mass: f32,
    /// Inactive bodies are skipped by integration and by collision checks
    pub active: bool,
}

impl Body {
    pub fn new(position: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            radius,
            mass,
            active: true,
        }
    }

    /// Moment of inertia of a solid disc about its center
    #[inline]
    pub fn moment_of_inertia(&self) -> f32 {
        0.5 * self.mass * self.radius * self.radius
    }

    /// One fixed step of kinematics: advance position and rotation, then apply
    /// the per-step damping factors. No-op for inactive bodies.
    pub fn integrate(&mut self, dt: f32, linear_damping: f32, angular_damping: f32) {
        if !self.active {
            return;
        }

        self.position = physics::integrate_position(self.position, self.velocity, dt);
        self.velocity = physics::apply_drag(self.velocity, linear_damping);
        self.rotation = physics::integrate_rotation(self.rotation, self.angular_velocity, dt);
        self.angular_velocity = physics::apply_angular_drag(self.angular_velocity, angular_damping);
    }

    /// Circle-circle overlap test. Symmetric; always false when either body is
    /// inactive, regardless of distance.
    pub fn collides_with(&self, other: &Body) -> bool {
        if !self.active || !other.active {
            return false;
        }
        let radius_sum = self.radius + other.radius;
        self.position.distance_squared(other.position) <= radius_sum * radius_sum
    }

    /// Point on this body's surface along the line of centers toward `other`.
    /// Coincident centers degenerate to this body's center.
    pub fn contact_point(&self, other: &Body) -> Vec2 {
        let direction = (other.position - self.position).normalize_or_zero();
        self.position + direction * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collides_with_symmetric() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 1.0);
        let b = Body::new(Vec2::new(15.0, 0.0), 10.0, 1.0);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));

        let far = Body::new(Vec2::new(100.0, 0.0), 10.0, 1.0);
        assert!(!a.collides_with(&far));
        assert!(!far.collides_with(&a));
    }

    #[test]
    fn test_collides_with_touching_edge() {
        // Distance exactly equal to the radius sum still counts as contact
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 1.0);
        let b = Body::new(Vec2::new(20.0, 0.0), 10.0, 1.0);
        assert!(a.collides_with(&b));
    }

    #[test]
    fn test_inactive_never_collides() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 1.0);
        let mut b = Body::new(Vec2::new(5.0, 0.0), 10.0, 1.0);
        b.active = false;
        // Overlapping, but inactive on either side kills the check
        assert!(!a.collides_with(&b));
        assert!(!b.collides_with(&a));
    }

    #[test]
    fn test_contact_point_on_surface() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0, 1.0);
        let b = Body::new(Vec2::new(30.0, 0.0), 10.0, 1.0);
        let contact = a.contact_point(&b);
        assert!((contact.x - 10.0).abs() < 0.001);
        assert!(contact.y.abs() < 0.001);
    }

    #[test]
    fn test_contact_point_coincident_centers() {
        // Zero-vector normalization yields the zero vector, so the contact
        // falls back to the body's own center
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);

        let a = Body::new(Vec2::new(5.0, 5.0), 10.0, 1.0);
        let b = Body::new(Vec2::new(5.0, 5.0), 10.0, 1.0);
        assert_eq!(a.contact_point(&b), a.position);
    }

    #[test]
    fn test_integrate_moves_and_damps() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 1.0);
        body.velocity = Vec2::new(60.0, 0.0);
        body.angular_velocity = 1.0;

        body.integrate(1.0 / 60.0, 0.99, 0.98);

        assert!((body.position.x - 1.0).abs() < 0.001);
        assert!((body.velocity.x - 59.4).abs() < 0.001);
        assert!((body.rotation - 1.0 / 60.0).abs() < 0.001);
        assert!((body.angular_velocity - 0.98).abs() < 0.001);
    }

    #[test]
    fn test_integrate_skips_inactive() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 1.0);
        body.velocity = Vec2::new(60.0, 0.0);
        body.active = false;

        body.integrate(1.0 / 60.0, 0.99, 0.98);

        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::new(60.0, 0.0));
    }

    #[test]
    fn test_moment_of_inertia() {
        let body = Body::new(Vec2::ZERO, 4.0, 2.0);
        assert!((body.moment_of_inertia() - 16.0).abs() < 0.001);
    }
}

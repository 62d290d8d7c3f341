//! Game entities and the derived per-frame snapshot
//!
//! Each entity embeds a [`Body`] and keeps its own gameplay fields next to it.
//! `GameState` is a plain value the engine recomputes and hands out wholesale;
//! consumers never mutate it.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::physics;
use crate::tuning::Tuning;

/// The player's balloon: air-limited thrust, pops on sharp contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub body: Body,
    air: u32,
    popped: bool,
    puff_cooldown: f32,
}

impl Balloon {
    pub fn new(position: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(position, tuning.balloon_radius, tuning.balloon_mass),
            air: tuning.max_air,
            popped: false,
            puff_cooldown: 0.0,
        }
    }

    /// Unit vector along the balloon's nose; puffs push the opposite way
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.body.rotation)
    }

    /// Air units left
    pub fn air(&self) -> u32 {
        self.air
    }

    pub fn popped(&self) -> bool {
        self.popped
    }

    /// A puff needs air, an elapsed cooldown, and an intact balloon
    pub fn can_puff(&self) -> bool {
        self.air > 0 && self.puff_cooldown <= 0.0 && !self.popped
    }

    /// Expel one unit of air for an impulse opposite the facing direction.
    /// Returns whether the puff landed.
    pub fn puff(&mut self, tuning: &Tuning) -> bool {
        if !self.can_puff() {
            return false;
        }

        let impulse = self.facing() * -tuning.puff_force;
        self.body.velocity = physics::apply_impulse(self.body.velocity, impulse, self.body.mass);
        self.air -= 1;
        self.puff_cooldown = tuning.puff_cooldown;
        true
    }

    /// Top up air, saturating at `max_air`
    pub fn refill_air(&mut self, amount: u32, max_air: u32) {
        self.air = (self.air + amount).min(max_air);
    }

    /// Deflate and drop out of the simulation
    pub fn pop(&mut self) {
        self.popped = true;
        self.body.active = false;
    }

    /// Restore a fresh balloon at `position`: full air, intact, at rest, with
    /// no cooldown pending. Radius and mass are untouched.
    pub fn reset(&mut self, position: Vec2, tuning: &Tuning) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.body.rotation = 0.0;
        self.body.angular_velocity = 0.0;
        self.body.active = true;
        self.air = tuning.max_air;
        self.popped = false;
        self.puff_cooldown = 0.0;
    }

    /// Kinematics plus cooldown decay. The timer may dip below zero for one
    /// step; `can_puff` treats anything <= 0 as elapsed.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.body.integrate(dt, tuning.linear_damping, tuning.angular_damping);
        if self.puff_cooldown > 0.0 {
            self.puff_cooldown -= dt;
        }
    }
}

/// Obstacle flavor. Sharp pops the balloon on contact; neutral bounces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Sharp,
    Neutral,
}

/// A drifting hazard the balloon can hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub kind: ObstacleKind,
    /// Spikes rendered on sharp obstacles, drawn once at creation. Zero for
    /// neutral obstacles.
    pub spike_count: u32,
}

impl Obstacle {
    pub fn neutral(position: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            body: Body::new(position, radius, mass),
            kind: ObstacleKind::Neutral,
            spike_count: 0,
        }
    }

    pub fn sharp(position: Vec2, radius: f32, mass: f32, spike_count: u32) -> Self {
        Self {
            body: Body::new(position, radius, mass),
            kind: ObstacleKind::Sharp,
            spike_count,
        }
    }

    pub fn is_sharp(&self) -> bool {
        self.kind == ObstacleKind::Sharp
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.body.integrate(dt, tuning.linear_damping, tuning.angular_damping);
    }
}

/// A pickup that refills air and scores points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectable {
    pub body: Body,
    pub points: u32,
    pub air_refill: u32,
    pulse_phase: f32,
}

impl Collectable {
    /// Mass is nominal; collectables never take part in physics resolution
    pub fn new(position: Vec2, radius: f32, points: u32, air_refill: u32, pulse_phase: f32) -> Self {
        Self {
            body: Body::new(position, radius, 0.1),
            points,
            air_refill,
            pulse_phase,
        }
    }

    /// Remove from play; the balloon picked it up
    pub fn collect(&mut self) {
        self.body.active = false;
    }

    pub fn collected(&self) -> bool {
        !self.body.active
    }

    /// Render scale for the idle pulse animation, oscillating around 1.0
    #[inline]
    pub fn pulse_scale(&self) -> f32 {
        1.0 + 0.1 * self.pulse_phase.sin()
    }

    /// Advance the pulse. Runs on raw frame time, not the fixed step; the
    /// phase wraps at a full turn to keep it bounded.
    pub fn update_pulse(&mut self, dt: f32, pulse_rate: f32) {
        self.pulse_phase += dt * pulse_rate;
        if self.pulse_phase > TAU {
            self.pulse_phase -= TAU;
        }
    }
}

/// Where the current run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Level generated, waiting for the start signal
    Ready,
    /// Simulation live
    Playing,
    /// Balloon popped, or out of air and drifted to a stop
    GameOver,
    /// Every collectable picked up
    LevelComplete,
}

/// Snapshot of the run, replaced wholesale whenever it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    pub collectables_remaining: u32,
    pub air_remaining: u32,
}

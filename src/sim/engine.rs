//! Game engine: fixed-timestep loop, camera follow, and the run status machine
//!
//! The host calls [`GameEngine::update`] once per rendered frame with the
//! wall-clock delta; the engine drains whole fixed steps from an accumulator
//! so simulation behavior is independent of display rate. Leftover time is
//! exposed as an interpolation alpha for rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, CollisionEvent};
use super::level::{self, Level};
use super::state::{Balloon, Collectable, GameState, GameStatus, Obstacle};
use crate::tuning::Tuning;

/// Owns the level, drives the simulation, and derives [`GameState`]
#[derive(Debug, Clone)]
pub struct GameEngine {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    balloon: Balloon,
    obstacles: Vec<Obstacle>,
    collectables: Vec<Collectable>,
    game_state: GameState,
    screen_size: Vec2,
    world_size: Vec2,
    camera: Vec2,
    accumulator: f32,
}

impl GameEngine {
    /// Build an engine with all tuning fixed up front. The seed fully
    /// determines every level and entity draw this engine will ever make.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let balloon = Balloon::new(Vec2::new(100.0, 100.0), &tuning);
        let game_state = GameState {
            status: GameStatus::Ready,
            score: 0,
            collectables_remaining: 0,
            air_remaining: tuning.max_air,
        };

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            balloon,
            obstacles: Vec::new(),
            collectables: Vec::new(),
            game_state,
            screen_size: Vec2::ZERO,
            world_size: Vec2::ZERO,
            camera: Vec2::ZERO,
            accumulator: 0.0,
            tuning,
        }
    }

    /// Record the viewport, size the world from it, and build the first
    /// level. Call once the display dimensions are known.
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.screen_size = Vec2::new(width, height);
        self.world_size = self.screen_size * self.tuning.world_scale;
        log::info!(
            "initialized: viewport {width}x{height}, world {}x{}, seed {}",
            self.world_size.x,
            self.world_size.y,
            self.seed
        );
        self.reset_game();
    }

    /// Regenerate the level and derived state. Status returns to Ready and
    /// the accumulator starts empty.
    pub fn reset_game(&mut self) {
        let Level { balloon, obstacles, collectables } = level::generate_level(
            self.world_size.x,
            self.world_size.y,
            &self.tuning,
            &mut self.rng,
        );
        self.balloon = balloon;
        self.obstacles = obstacles;
        self.collectables = collectables;

        self.recenter_camera();
        self.accumulator = 0.0;
        self.game_state = GameState {
            status: GameStatus::Ready,
            score: 0,
            collectables_remaining: self.collectables.len() as u32,
            air_remaining: self.balloon.air(),
        };

        log::info!(
            "level ready: {} obstacles, {} collectables",
            self.obstacles.len(),
            self.collectables.len()
        );
    }

    /// Ready -> Playing. Any other starting status is a no-op returning false.
    pub fn start_game(&mut self) -> bool {
        if self.game_state.status != GameStatus::Ready {
            return false;
        }
        self.game_state = GameState { status: GameStatus::Playing, ..self.game_state };
        log::info!("game started");
        true
    }

    /// Advance the simulation by one frame's wall-clock delta (seconds).
    ///
    /// Only Playing frames simulate. The delta is clamped before it enters
    /// the accumulator so a long stall cannot snowball into a step spiral,
    /// and a pop mid-drain drops the remaining queued steps. Collectable
    /// pulses animate on the raw delta rather than the fixed step.
    pub fn update(&mut self, delta_time: f32) {
        if self.game_state.status != GameStatus::Playing {
            return;
        }

        self.accumulator += delta_time.min(self.tuning.max_frame_time);
        while self.accumulator >= self.tuning.fixed_timestep {
            self.step(self.tuning.fixed_timestep);
            self.accumulator -= self.tuning.fixed_timestep;

            if self.game_state.status != GameStatus::Playing {
                break;
            }
        }

        for collectable in &mut self.collectables {
            collectable.update_pulse(delta_time, self.tuning.pulse_rate);
        }

        self.refresh_derived_state();
    }

    /// Spend one unit of air on an impulse. Only lands while Playing and the
    /// balloon itself allows it.
    pub fn puff(&mut self) -> bool {
        if self.game_state.status != GameStatus::Playing {
            return false;
        }

        let landed = self.balloon.puff(&self.tuning);
        if landed {
            self.game_state =
                GameState { air_remaining: self.balloon.air(), ..self.game_state };
            log::debug!("puff: {} air left", self.balloon.air());
        }
        landed
    }

    /// One fixed simulation step: integrate, clamp to the world, follow with
    /// the camera, then resolve collisions
    fn step(&mut self, dt: f32) {
        self.balloon.update(dt, &self.tuning);
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, &self.tuning);
        }

        collision::clamp_to_bounds(
            &mut self.balloon.body,
            self.world_size.x,
            self.world_size.y,
            0.0,
            self.tuning.wall_restitution,
        );
        for obstacle in &mut self.obstacles {
            collision::clamp_to_bounds(
                &mut obstacle.body,
                self.world_size.x,
                self.world_size.y,
                0.0,
                self.tuning.wall_restitution,
            );
        }

        self.recenter_camera();

        let events = collision::resolve_balloon_collisions(
            &mut self.balloon,
            &mut self.obstacles,
            &mut self.collectables,
            &self.tuning,
        );

        for event in events {
            match event {
                CollisionEvent::Popped => {
                    self.game_state =
                        GameState { status: GameStatus::GameOver, ..self.game_state };
                    log::info!("balloon popped: game over, score {}", self.game_state.score);
                }
                CollisionEvent::Collected { points, .. } => {
                    self.game_state =
                        GameState { score: self.game_state.score + points, ..self.game_state };
                    log::debug!("collected: +{points}");
                }
                CollisionEvent::Bounced { obstacle } => {
                    log::debug!("bounce off obstacle {obstacle}");
                }
            }
        }
    }

    /// Recompute the snapshot after a frame: remaining collectables, air,
    /// and the two terminal checks
    fn refresh_derived_state(&mut self) {
        let remaining =
            self.collectables.iter().filter(|c| !c.collected()).count() as u32;
        self.game_state = GameState {
            collectables_remaining: remaining,
            air_remaining: self.balloon.air(),
            ..self.game_state
        };

        if remaining == 0 && self.game_state.status == GameStatus::Playing {
            self.game_state =
                GameState { status: GameStatus::LevelComplete, ..self.game_state };
            log::info!("level complete: score {}", self.game_state.score);
        }

        // Out of air only ends the run once the balloon has effectively
        // stopped; a drifting balloon may still reach a refill
        if self.balloon.air() == 0
            && self.balloon.body.velocity.length_squared() < self.tuning.rest_threshold
        {
            if self.game_state.status != GameStatus::GameOver {
                log::info!("out of air at rest: game over, score {}", self.game_state.score);
            }
            self.game_state = GameState { status: GameStatus::GameOver, ..self.game_state };
        }
    }

    /// Center the camera on the balloon, clamped so the view never leaves
    /// the world
    fn recenter_camera(&mut self) {
        let target = self.balloon.body.position - self.screen_size / 2.0;
        let max = (self.world_size - self.screen_size).max(Vec2::ZERO);
        self.camera = target.clamp(Vec2::ZERO, max);
    }

    /// Fraction of a fixed step left unsimulated. Hosts blend the previous
    /// and current transforms with it when rendering. Below 1.0 whenever the
    /// last frame's drain ran to completion.
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator / self.tuning.fixed_timestep
    }

    pub fn balloon(&self) -> &Balloon {
        &self.balloon
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn collectables(&self) -> &[Collectable] {
        &self.collectables
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// World-space position of the view's top-left corner
    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing_engine(tuning: Tuning, seed: u64) -> GameEngine {
        let mut engine = GameEngine::new(tuning, seed);
        engine.initialize(800.0, 600.0);
        assert!(engine.start_game());
        engine
    }

    /// Strip the level to a bare stage so tests control every body. One
    /// far-off collectable stays behind to keep the completion check idle.
    fn clear_stage(engine: &mut GameEngine) {
        engine.obstacles.clear();
        engine.collectables.clear();
        engine.collectables.push(Collectable::new(Vec2::new(750.0, 550.0), 25.0, 100, 2, 0.0));
        engine.balloon.body.velocity = Vec2::ZERO;
        engine.balloon.body.angular_velocity = 0.0;
        engine.balloon.body.rotation = 0.0;
        engine.balloon.body.position = Vec2::new(400.0, 300.0);
    }

    /// Spend every unit of air, waiting out the cooldown between puffs
    fn drain_air(engine: &mut GameEngine) {
        for _ in 0..engine.tuning.max_air {
            assert!(engine.balloon.puff(&engine.tuning));
            for _ in 0..13 {
                engine.balloon.update(DT, &engine.tuning);
            }
        }
    }

    #[test]
    fn test_start_requires_ready() {
        let mut engine = GameEngine::new(Tuning::single_screen(), 1);
        engine.initialize(800.0, 600.0);

        assert_eq!(engine.game_state().status, GameStatus::Ready);
        assert!(engine.start_game());
        assert_eq!(engine.game_state().status, GameStatus::Playing);
        // Second start is rejected
        assert!(!engine.start_game());
    }

    #[test]
    fn test_update_is_inert_before_start() {
        let mut engine = GameEngine::new(Tuning::default(), 1);
        engine.initialize(800.0, 600.0);

        let before = engine.balloon().body.position;
        for _ in 0..30 {
            engine.update(DT);
        }
        assert_eq!(engine.balloon().body.position, before);
        assert_eq!(engine.game_state().status, GameStatus::Ready);
    }

    #[test]
    fn test_puff_only_while_playing() {
        let mut engine = GameEngine::new(Tuning::single_screen(), 1);
        engine.initialize(800.0, 600.0);

        assert!(!engine.puff());
        engine.start_game();
        assert!(engine.puff());
        assert_eq!(engine.game_state().air_remaining, engine.tuning().max_air - 1);
    }

    #[test]
    fn test_fixed_steps_match_across_frame_sizes() {
        // Same total time in different frame slices lands on the same state.
        // Doubled frames drain exactly two steps each, so both engines run
        // the identical step sequence.
        let mut coarse = playing_engine(Tuning::single_screen(), 9);
        let mut fine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut coarse);
        clear_stage(&mut fine);
        coarse.balloon.body.velocity = Vec2::new(40.0, -25.0);
        fine.balloon.body.velocity = Vec2::new(40.0, -25.0);

        for _ in 0..15 {
            coarse.update(DT * 2.0);
        }
        for _ in 0..30 {
            fine.update(DT);
        }

        assert_eq!(coarse.balloon().body.position, fine.balloon().body.position);
        assert_eq!(coarse.balloon().body.velocity, fine.balloon().body.velocity);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut engine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut engine);
        engine.balloon.body.velocity = Vec2::new(10.0, 0.0);

        // A 10 second stall simulates at most max_frame_time worth of steps
        engine.update(10.0);
        let traveled = engine.balloon().body.position.x - 400.0;
        assert!(traveled <= 10.0 * engine.tuning().max_frame_time + 0.001);
        // Nowhere near the 100 units an unclamped stall would cover
        assert!(traveled < 5.0);
    }

    #[test]
    fn test_interpolation_alpha_stays_in_unit_range() {
        let mut engine = playing_engine(Tuning::single_screen(), 4);
        clear_stage(&mut engine);

        // Awkward frame sizes leave fractional steps behind
        for frame in 0..200 {
            engine.update(0.0117 + (frame % 3) as f32 * 0.0041);
            let alpha = engine.interpolation_alpha();
            assert!((0.0..1.0).contains(&alpha));
        }
    }

    #[test]
    fn test_sharp_hit_ends_run_and_aborts_queued_steps() {
        let mut engine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut engine);
        engine.obstacles.push(Obstacle::sharp(Vec2::new(430.0, 300.0), 30.0, 5.0, 5));

        // Several queued steps; the pop lands on the first
        engine.update(DT * 8.0);

        assert_eq!(engine.game_state().status, GameStatus::GameOver);
        assert!(engine.balloon().popped());
        // The balloon stopped where it popped instead of simulating on
        let rest = engine.balloon().body.position;
        engine.update(DT);
        assert_eq!(engine.balloon().body.position, rest);
    }

    #[test]
    fn test_collecting_last_collectable_completes_level() {
        let mut engine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut engine);
        // Replace the stage sentinel with one pickup inside the balloon
        engine.collectables.clear();
        engine.collectables.push(Collectable::new(Vec2::new(430.0, 300.0), 25.0, 100, 2, 0.0));

        engine.update(DT);

        let state = engine.game_state();
        assert_eq!(state.status, GameStatus::LevelComplete);
        assert_eq!(state.score, 100);
        assert_eq!(state.collectables_remaining, 0);
    }

    #[test]
    fn test_out_of_air_at_rest_is_game_over() {
        let mut engine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut engine);

        drain_air(&mut engine);
        engine.balloon.body.position = Vec2::new(400.0, 300.0);
        engine.balloon.body.velocity = Vec2::new(0.3, 0.0);

        engine.update(DT);

        assert_eq!(engine.game_state().air_remaining, 0);
        assert_eq!(engine.game_state().status, GameStatus::GameOver);
    }

    #[test]
    fn test_out_of_air_while_drifting_keeps_playing() {
        let mut engine = playing_engine(Tuning::single_screen(), 9);
        clear_stage(&mut engine);

        drain_air(&mut engine);
        engine.balloon.body.position = Vec2::new(400.0, 300.0);
        engine.balloon.body.velocity = Vec2::new(60.0, 0.0);

        engine.update(DT);

        assert_eq!(engine.game_state().air_remaining, 0);
        assert_eq!(engine.game_state().status, GameStatus::Playing);
    }

    #[test]
    fn test_long_session_stays_playing_on_empty_stage() {
        let mut engine = playing_engine(Tuning::single_screen(), 13);
        clear_stage(&mut engine);

        // Ten simulated seconds of sitting still with full air
        for _ in 0..600 {
            engine.update(DT);
            assert_eq!(engine.game_state().status, GameStatus::Playing);
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = |engine: &mut GameEngine| {
            for frame in 0..240 {
                if frame % 30 == 7 {
                    engine.puff();
                }
                engine.update(DT);
            }
        };

        let mut a = playing_engine(Tuning::default(), 77);
        let mut b = playing_engine(Tuning::default(), 77);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.balloon().body, b.balloon().body);
        assert_eq!(a.game_state(), b.game_state());
        for (oa, ob) in a.obstacles().iter().zip(b.obstacles()) {
            assert_eq!(oa.body, ob.body);
        }
    }

    #[test]
    fn test_reset_regenerates_and_rearms() {
        let mut engine = playing_engine(Tuning::default(), 5);
        for _ in 0..120 {
            engine.update(DT);
        }

        engine.reset_game();
        let state = engine.game_state();
        assert_eq!(state.status, GameStatus::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.air_remaining, engine.tuning().max_air);
        assert_eq!(state.collectables_remaining, engine.collectables().len() as u32);
        assert!(engine.start_game());
    }

    #[test]
    fn test_world_scale_and_camera_follow() {
        let mut engine = playing_engine(Tuning::default(), 2);
        assert_eq!(engine.world_size(), Vec2::new(2400.0, 1800.0));

        clear_stage(&mut engine);
        engine.balloon.body.position = Vec2::new(1200.0, 900.0);
        engine.update(DT);

        let camera = engine.camera();
        // Balloon sits at the view center when nothing clamps
        assert!((camera.x - (engine.balloon().body.position.x - 400.0)).abs() < 0.5);
        assert!((camera.y - (engine.balloon().body.position.y - 300.0)).abs() < 0.5);
    }

    #[test]
    fn test_camera_clamps_at_world_edges() {
        let mut engine = playing_engine(Tuning::default(), 2);
        clear_stage(&mut engine);

        engine.balloon.body.position = Vec2::new(10.0, 10.0);
        engine.update(DT);
        assert_eq!(engine.camera(), Vec2::ZERO);

        engine.balloon.body.position = Vec2::new(2390.0, 1790.0);
        engine.update(DT);
        assert_eq!(engine.camera(), Vec2::new(1600.0, 1200.0));
    }

    #[test]
    fn test_single_screen_camera_never_moves() {
        let mut engine = playing_engine(Tuning::single_screen(), 2);
        clear_stage(&mut engine);
        engine.balloon.body.velocity = Vec2::new(80.0, 60.0);

        for _ in 0..120 {
            engine.update(DT);
            assert_eq!(engine.camera(), Vec2::ZERO);
        }
    }

    #[test]
    fn test_bodies_stay_inside_world() {
        let mut engine = playing_engine(Tuning::default(), 31);

        // The collision pass runs after the wall clamp within a step, so a
        // bounce right at a wall can nudge a body a few units past it until
        // the next step's clamp. Bound the excursion rather than pin the edge.
        let slack = 10.0;

        for frame in 0..600 {
            if frame % 20 == 0 {
                engine.puff();
            }
            engine.update(DT);

            let world = engine.world_size();
            let balloon = &engine.balloon().body;
            assert!(balloon.position.x >= balloon.radius - slack);
            assert!(balloon.position.x <= world.x - balloon.radius + slack);
            assert!(balloon.position.y >= balloon.radius - slack);
            assert!(balloon.position.y <= world.y - balloon.radius + slack);

            for obstacle in engine.obstacles() {
                let body = &obstacle.body;
                assert!(body.position.x >= body.radius - slack);
                assert!(body.position.x <= world.x - body.radius + slack);
                assert!(body.position.y >= body.radius - slack);
                assert!(body.position.y <= world.y - body.radius + slack);
            }

            if engine.game_state().status != GameStatus::Playing {
                break;
            }
        }
    }
}

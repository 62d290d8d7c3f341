//! Headless demo driver
//!
//! Runs a scripted session against the engine at a simulated 60 Hz and prints
//! the final game state as JSON. Useful for eyeballing engine behavior and
//! comparing runs across seeds without a renderer.

use puff_drift::sim::GameStatus;
use puff_drift::{GameEngine, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB0B0);

    let mut engine = GameEngine::new(Tuning::default(), seed);
    engine.initialize(800.0, 600.0);
    engine.start_game();

    let mut frames = 0;
    while engine.game_state().status == GameStatus::Playing && frames < MAX_FRAMES {
        // Puff twice a second; drift the rest of the time
        if frames % 30 == 0 {
            engine.puff();
        }
        engine.update(FRAME_DT);
        frames += 1;
    }

    log::info!(
        "session ended after {frames} frames: {:?}",
        engine.game_state().status
    );

    match serde_json::to_string_pretty(&engine.game_state()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("state dump failed: {err}"),
    }
}

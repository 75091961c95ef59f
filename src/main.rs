//! Minion Catch entry point
//!
//! On the web the page drives `WebEngine` (see `platform::web`). Natively
//! this runs a headless session with a simple autopilot and logs the result.
//!
//! Usage: `minion-catch [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use minion_catch::Tuning;
    use minion_catch::consts::TICK_MS;
    use minion_catch::engine::Engine;
    use minion_catch::platform::{Clock, ManualClock};

    env_logger::init();
    log::info!("Minion Catch (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(120.0);

    let clock = ManualClock::new(0.0);
    let mut engine = Engine::new(seed, Tuning::default(), clock.clone());
    engine.start();

    let end_ms = seconds * 1000.0;
    while clock.now_ms() < end_ms {
        let snapshot = engine.snapshot();
        if snapshot.game_over {
            break;
        }
        if let Some(x) = autopilot::target_x(&snapshot, engine.tuning()) {
            engine.set_catcher_position(x);
        }
        clock.advance(TICK_MS);
        engine.update();
    }
    engine.stop();

    let snapshot = engine.snapshot();
    let stats = engine.stats();
    log::info!(
        "Session over at {:.1}s: score {}, lives {}, game over: {}",
        clock.now_ms() / 1000.0,
        snapshot.score,
        snapshot.lives,
        snapshot.game_over
    );
    match serde_json::to_string_pretty(stats) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize stats: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use minion_catch::sim::ItemKind;
    use minion_catch::{FrameSnapshot, Tuning};

    /// Chase the lowest egg still above the catch line, sliding away from
    /// any rotten egg closing in on the same column.
    pub fn target_x(snapshot: &FrameSnapshot, tuning: &Tuning) -> Option<f32> {
        let line = tuning.catch_line_y();
        let half_item = tuning.item_size / 2.0;
        let half_catcher = tuning.catcher_size / 2.0;

        let egg = snapshot
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Egg && i.y + half_item <= line)
            .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))?;

        let mut x = egg.x + half_item - half_catcher;

        let danger = snapshot.items.iter().any(|i| {
            i.kind == ItemKind::RottenEgg
                && i.y > egg.y
                && i.y + half_item <= line
                && ((i.x + half_item) - (x + half_catcher)).abs() < tuning.catch_radius
        });
        if danger {
            x += tuning.catch_radius * 2.0;
        }
        Some(x)
    }

}

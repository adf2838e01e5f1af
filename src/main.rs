//! Hex Pop entry point
//!
//! The browser build is driven from JavaScript through `hex_pop::web`. Natively
//! this runs a headless demo: the autopilot plays Classic levels until it
//! loses or hits the level limit, then logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hex_pop::audio::SilentAudio;
    use hex_pop::daily::today_string;
    use hex_pop::host::Session;
    use hex_pop::persistence::MemoryStore;
    use hex_pop::sim::{GameMode, GamePhase};

    /// Ticks per level before the demo gives up on it
    const MAX_TICKS_PER_LEVEL: u32 = 60 * 60 * 5;
    const MAX_LEVELS: u32 = 10;

    env_logger::init();
    log::info!("Hex Pop (native) starting headless demo...");

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let mut session = Session::new(seed, MemoryStore::new(), SilentAudio, &today_string());
    session.input.set_idle_mode(true);
    session.start(GameMode::Classic);

    'levels: loop {
        let mut ticks = 0;
        while session.state.phase == GamePhase::Playing {
            session.frame();
            ticks += 1;
            if ticks >= MAX_TICKS_PER_LEVEL {
                log::warn!("Level {} did not finish, stopping", session.state.level);
                break 'levels;
            }
        }

        match session.state.phase {
            GamePhase::Victory if session.state.level < MAX_LEVELS => session.restart(),
            _ => break,
        }
    }

    println!(
        "Finished on level {} ({:?}) with score {}",
        session.state.level, session.state.phase, session.state.score
    );
    for entry in session.achievements.entries.iter().filter(|e| e.unlocked) {
        println!("  * {} - {}", entry.title, entry.description);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is hex_pop::web::init, this is just to satisfy the compiler
}

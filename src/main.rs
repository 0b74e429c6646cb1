//! Pixel Rush entry point
//!
//! Native builds run a headless scripted session and dump the final frame as
//! JSON, which is handy for eyeballing the simulation without a renderer.
//! The web build drives the session from its own animation-frame loop.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_rush::{GameSession, MemoryStore, SessionState, TickInput, WorldConfig};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB157);
    log::info!("Pixel Rush headless run, seed {seed}");

    let mut session = match GameSession::new(WorldConfig::default(), seed, Box::new(MemoryStore::new()))
    {
        Ok(session) => session,
        Err(err) => {
            eprintln!("bad world config: {err}");
            std::process::exit(1);
        }
    };

    for event in session.start() {
        log::info!("{event:?}");
    }

    // Jump on a fixed cadence until the run ends
    let mut ticks = 0u64;
    while session.state() == SessionState::Running && ticks < 100_000 {
        let input = TickInput {
            jump: ticks % 50 == 0,
            ..TickInput::default()
        };
        for event in session.tick(&input, 1.0) {
            log::info!("{event:?}");
        }
        ticks += 1;
    }

    let snapshot = session.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
    log::info!(
        "run over after {ticks} ticks, score {} (high score {})",
        snapshot.score,
        snapshot.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the host page's loop, this just satisfies
    // the compiler
}

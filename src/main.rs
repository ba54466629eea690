//! Dodge Arena headless runner
//!
//! Plays a short scripted session through the fixed-timestep loop and
//! prints the final snapshot as JSON. Usage:
//!
//! ```text
//! dodge-arena [tuning.json] [settings.json]
//! ```

use std::path::Path;

use dodge_arena::audio::{AudioManager, LogBackend};
use dodge_arena::consts::*;
use dodge_arena::input::{Key, KeyboardState};
use dodge_arena::sim::{GamePhase, GameState, TickInput, tick};
use dodge_arena::{Settings, Tuning};

/// Frames rendered by the scripted session (30 seconds at 60 fps)
const SESSION_FRAMES: u32 = 1800;

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager,
    keys: KeyboardState,
    accumulator: f32,
    log_events: bool,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        let state = GameState::with_tuning(seed, tuning).unwrap_or_else(|e| {
            log::error!("Invalid tuning: {}; using defaults", e);
            GameState::new(seed)
        });
        Self {
            state,
            audio: AudioManager::from_settings(Some(Box::new(LogBackend)), settings),
            keys: KeyboardState::default(),
            accumulator: 0.0,
            log_events: settings.log_events,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput::poll(&self.keys);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.keys.end_tick();

            let events = self.state.drain_events();
            if self.log_events && !events.is_empty() {
                log::debug!("t={:.2} {:?}", self.state.clock, events);
            }
            self.audio.play_events(&events);
        }
    }

    /// Scripted keyboard: start, then circle the arena firing now and then
    fn script(&mut self, frame: u32) {
        if frame == 0 {
            self.keys.press(Key::Start);
        }

        let leg = (frame / 90) % 4;
        let dirs = [Key::Right, Key::Down, Key::Left, Key::Up];
        for (i, key) in dirs.into_iter().enumerate() {
            if i as u32 == leg {
                self.keys.press(key);
            } else {
                self.keys.release(key);
            }
        }

        if frame % 30 == 0 {
            self.keys.release(Key::Fire);
            self.keys.press(Key::Fire);
        }
        if frame % 120 == 60 {
            self.keys.release(Key::Skill);
            self.keys.press(Key::Skill);
        }
    }
}

fn read_config(path: &str) -> Option<String> {
    match std::fs::read_to_string(Path::new(path)) {
        Ok(text) => Some(text),
        Err(e) => {
            log::error!("Cannot read {}: {}", path, e);
            None
        }
    }
}

fn run() {
    let mut args = std::env::args().skip(1);

    let tuning = args
        .next()
        .and_then(|path| read_config(&path))
        .map(|json| {
            Tuning::from_json(&json).unwrap_or_else(|e| {
                log::error!("Invalid tuning: {}; using defaults", e);
                Tuning::default()
            })
        })
        .unwrap_or_default();

    let settings = args
        .next()
        .and_then(|path| read_config(&path))
        .map(|json| Settings::from_json(&json))
        .unwrap_or_default();

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Dodge Arena (headless) starting, seed {}", seed);

    let mut game = Game::new(seed, tuning, &settings);
    for frame in 0..SESSION_FRAMES {
        game.script(frame);
        game.update(SIM_DT);
        if game.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = game.state.snapshot();
    log::info!(
        "Session over: score {}, survived {:.1}s",
        snapshot.player.score,
        snapshot.survival_secs
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

fn main() {
    env_logger::init();
    run();
}

//! Voxel Vault entry point
//!
//! Headless runner: plays a session on the fixed tick (autopilot unless
//! disabled in settings), renders every frame into a line buffer and records
//! the final score.
//!
//! Usage: `voxel-vault [seed] [max_ticks] [--realtime]`
//!
//! Files are read from (and the leaderboard written to) the directory named
//! by `VOXEL_VAULT_DIR`, or the current directory.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use voxel_vault::renderer::{LineVertex, Viewport, render_frame};
    use voxel_vault::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use voxel_vault::{HighScores, Settings, Tuning};

    /// Don't spiral when the host stalls
    const MAX_SUBSTEPS: u32 = 8;
    const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

    struct Options {
        seed: u64,
        max_ticks: u64,
        realtime: bool,
        data_dir: PathBuf,
    }

    impl Options {
        fn from_env() -> Self {
            let mut positional = Vec::new();
            let mut realtime = false;
            for arg in std::env::args().skip(1) {
                if arg == "--realtime" {
                    realtime = true;
                } else {
                    positional.push(arg);
                }
            }

            let seed = positional
                .first()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(clock_seed);
            let max_ticks = positional
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_TICKS);
            let data_dir = std::env::var_os("VOXEL_VAULT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));

            Self {
                seed,
                max_ticks,
                realtime,
                data_dir,
            }
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Session plus the bits of the loop that outlive a single tick
    struct Game {
        state: GameState,
        input: TickInput,
        viewport: Viewport,
        tick_dt: f32,
        accumulator: f32,
        frame: Vec<LineVertex>,
        max_lines: usize,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
            let mut state = GameState::with_tuning(seed, tuning);
            state.camera = settings.initial_camera();
            state.controls = settings.camera_controls();
            Self {
                state,
                input: TickInput {
                    autopilot: settings.autopilot,
                    ..Default::default()
                },
                viewport: settings.viewport(),
                tick_dt: settings.tick_seconds(),
                accumulator: 0.0,
                frame: Vec::new(),
                max_lines: 0,
            }
        }

        /// Run as many ticks as `dt` seconds cover. Returns the final score on game over.
        fn update(&mut self, dt: f32) -> Option<u64> {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
                self.accumulator -= self.tick_dt;
                substeps += 1;
                if let Some(score) = self.step() {
                    return Some(score);
                }
            }
            None
        }

        /// One tick and one frame
        fn step(&mut self) -> Option<u64> {
            let mut game_over = None;
            let events = tick(&mut self.state, &self.input, self.tick_dt);
            let ticks = self.state.time_ticks;
            for event in events {
                match event {
                    GameEvent::Spawned { count } => {
                        log::debug!("tick {}: {} obstacle(s) spawned", ticks, count)
                    }
                    GameEvent::Despawned { .. } => {
                        log::debug!("tick {}: score {}", ticks, self.state.score)
                    }
                    GameEvent::GameOver { score } => game_over = Some(score),
                }
            }
            self.render();
            game_over
        }

        fn render(&mut self) {
            self.frame.clear();
            let lines = render_frame(&self.state.snapshot(), self.viewport, &mut self.frame);
            self.max_lines = self.max_lines.max(lines);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Voxel Vault (headless) starting...");

        let options = Options::from_env();
        let settings = Settings::load(&options.data_dir.join("settings.json"));
        let tuning = Tuning::load(&options.data_dir.join("tuning.json"));
        let scores_path = options.data_dir.join("highscores.json");

        let mut game = Game::new(options.seed, tuning, &settings);
        log::info!("Game initialized with seed: {}", options.seed);

        let final_score = if options.realtime {
            let period = Duration::from_millis(settings.tick_period_ms);
            let mut last = Instant::now();
            loop {
                std::thread::sleep(period);
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;
                if let Some(score) = game.update(dt) {
                    break score;
                }
                if game.state.time_ticks >= options.max_ticks {
                    break game.state.score;
                }
            }
        } else {
            loop {
                if let Some(score) = game.step() {
                    break score;
                }
                if game.state.time_ticks >= options.max_ticks {
                    break game.state.score;
                }
            }
        };

        let outcome = if game.state.phase == GamePhase::GameOver {
            "fell"
        } else {
            "survived"
        };
        log::info!(
            "Run {} after {} ticks: score {}, {} spawns, up to {} lines per frame",
            outcome,
            game.state.time_ticks,
            final_score,
            game.state.spawner.spawn_count,
            game.max_lines
        );

        let mut scores = HighScores::load(&scores_path);
        let name = std::env::var("VOXEL_VAULT_PLAYER").unwrap_or_else(|_| "autopilot".to_string());
        match scores.add_score(&name, final_score) {
            Some(rank) => {
                log::info!("New high score #{} for {}", rank, name);
                if let Err(e) = scores.save_to(&scores_path) {
                    log::warn!("Could not save high scores: {}", e);
                }
            }
            None => log::info!("Score {} did not make the leaderboard", final_score),
        }

        println!("seed {} score {}", options.seed, final_score);
        for (i, entry) in scores.entries.iter().enumerate() {
            println!("{}. {} {}", i + 1, entry.name, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser surface; the library is the wasm deliverable
}

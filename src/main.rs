//! Burger Arena entry point
//!
//! Headless runner: loads settings and tuning, drives the simulation with a
//! fixed-timestep accumulator and an autopilot, and forwards cues and frames
//! to the logging backends.

use burger_arena::audio::{AudioManager, LogCuePlayer};
use burger_arena::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use burger_arena::renderer::{HudText, RecordingRenderer, render_frame};
use burger_arena::sim::{GameState, TickInput, tick};
use burger_arena::{Settings, Tuning};

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager<LogCuePlayer>,
    renderer: RecordingRenderer,
    accumulator: f32,
    input: TickInput,
    frames: u64,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            audio: AudioManager::from_settings(LogCuePlayer, settings),
            renderer: RecordingRenderer::default(),
            accumulator: 0.0,
            input: TickInput::default(),
            frames: 0,
        }
    }

    /// Run simulation ticks for `frame_ms` of wall time
    fn update(&mut self, frame_ms: f32) {
        let frame_ms = frame_ms.min(SIM_DT_MS * MAX_SUBSTEPS as f32);
        self.accumulator += frame_ms;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.input = autopilot(&self.state);
            tick(&mut self.state, &self.input, SIM_DT_MS);
            self.audio.play_all(&self.state.events);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
        }
    }

    /// Render the current frame
    fn render(&mut self) {
        render_frame(&mut self.renderer, &self.state);
        self.frames += 1;
    }
}

/// Scripted input: chase the bear nearest in x and keep firing
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        exit: state.burger_dead,
        ..Default::default()
    };

    let burger_x = state.burger.rect.center().x;
    let target = state
        .bears
        .iter()
        .filter(|b| b.active)
        .map(|b| b.rect().center().x)
        .min_by(|a, b| {
            (a - burger_x)
                .abs()
                .partial_cmp(&(b - burger_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target_x) = target {
        let dead_zone = state.tuning.burger_step;
        if target_x < burger_x - dead_zone {
            input.left = true;
        } else if target_x > burger_x + dead_zone {
            input.right = true;
        }
        input.fire = (target_x - burger_x).abs() < state.tuning.burger_size.x / 2.0;
    }

    input
}

fn load_tuning(settings: &Settings) -> Tuning {
    let Some(path) = &settings.tuning_path else {
        return Tuning::default();
    };
    match Tuning::load(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Failed to load tuning from {}: {}", path.display(), e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Burger Arena (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let tuning = load_tuning(&settings);
    let seed = settings.effective_seed();
    let mut game = Game::new(seed, tuning, &settings);
    log::info!("Seed: {}, cue volume {:.2}", seed, game.audio.effective_volume());

    while game.frames < settings.max_frames && !game.input.exit {
        game.update(SIM_DT_MS);
        game.render();

        if settings.hud_log_interval > 0 && game.frames % settings.hud_log_interval == 0 {
            let hud = HudText::from_state(&game.state);
            log::info!("[frame {}] {} | {}", game.frames, hud.health, hud.score);
        }
    }

    log::info!(
        "Finished after {} frames ({} ticks, {} cues)",
        game.frames,
        game.state.time_ticks,
        game.audio.cues_played()
    );

    match serde_json::to_string_pretty(&game.state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
    }
}

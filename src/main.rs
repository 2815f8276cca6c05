//! Flappy Sim headless runner
//!
//! Drives the simulation with a simple autopilot at a fixed tick, logging
//! runs as they end. Useful for checking tuning changes without a renderer.
//!
//! ```text
//! flappy-sim [--seed N] [--ticks N] [--runs N] [--variant classic|scenery]
//!            [--settings path.json] [--shapes solid|box] [--json]
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use flappy_sim::sim::{
    BoxShapes, GameEvent, GameState, ShapeProvider, SolidShapes, TickInput, tick,
};
use flappy_sim::{Settings, SettingsError, Variant};

/// Command-line options
#[derive(Debug)]
struct Options {
    seed: u64,
    ticks: u64,
    runs: u32,
    variant: Option<Variant>,
    settings_path: Option<String>,
    box_shapes: bool,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 1,
            ticks: 60 * 60,
            runs: 3,
            variant: None,
            settings_path: None,
            box_shapes: false,
            json: false,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--seed" => {
                options.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("bad --seed: {e}"))?
            }
            "--ticks" => {
                options.ticks = value("--ticks")?
                    .parse()
                    .map_err(|e| format!("bad --ticks: {e}"))?
            }
            "--runs" => {
                options.runs = value("--runs")?
                    .parse()
                    .map_err(|e| format!("bad --runs: {e}"))?
            }
            "--variant" => {
                let name = value("--variant")?;
                options.variant =
                    Some(Variant::from_str(&name).ok_or_else(|| format!("unknown variant {name}"))?);
            }
            "--settings" => options.settings_path = Some(value("--settings")?),
            "--shapes" => {
                options.box_shapes = match value("--shapes")?.as_str() {
                    "box" => true,
                    "solid" => false,
                    other => return Err(format!("unknown shapes {other}")),
                }
            }
            "--json" => options.json = true,
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(options)
}

fn load_settings(options: &Options) -> Result<Settings, SettingsError> {
    let mut settings = match &options.settings_path {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    if let Some(variant) = options.variant {
        settings.apply_variant(variant);
    }
    Ok(settings)
}

/// Flap when the bird sinks below the middle of the next gap
fn autopilot(state: &GameState) -> TickInput {
    let bird = &state.bird;
    let settings = state.settings();

    let target = state
        .obstacles
        .iter()
        .find(|o| o.x as i32 + o.width() > bird.rect.left())
        .map(|o| o.gap_top + settings.gap_size / 2)
        .unwrap_or(settings.play_height / 2);

    let bird_center = bird.rect.top() + bird.rect.height() / 2;
    TickInput {
        jump: bird_center > target + 8 && bird.vel >= 0.0,
        restart: true,
    }
}

fn run(options: &Options) -> Result<(), SettingsError> {
    let settings = load_settings(options)?;
    let shapes: Arc<dyn ShapeProvider> = if options.box_shapes {
        Arc::new(BoxShapes)
    } else {
        Arc::new(SolidShapes)
    };

    let mut state = GameState::new(settings, shapes, options.seed)?;
    let mut finished = 0u32;
    let mut best = 0u64;

    for _ in 0..options.ticks {
        let input = autopilot(&state);
        let result = tick(&mut state, &input);

        for event in &result.events {
            if let GameEvent::Restarted { run, seed } = event {
                log::debug!("Run {} seeded with {}", run, seed);
            }
        }

        if let Some(cause) = result.crash {
            finished += 1;
            best = best.max(state.display_score());
            log::info!(
                "Run {} ended after {} ticks: {:?}, score {}",
                state.run,
                state.time_ticks,
                cause,
                state.display_score()
            );
            if finished >= options.runs {
                break;
            }
        }
    }

    best = best.max(state.display_score());
    log::info!("{} runs finished, best score {}", finished, best);

    if options.json {
        match state.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            log::error!("{}", message);
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Headless platformer runner.
//!
//! Usage: `tp_game <replay.json> <level.json>...`
//!
//! Loads every level up front (a malformed level aborts the run before any
//! simulation), expands the replay into one input per fixed tick and plays it
//! through the levels in order. See `runner` for the restart/advance rules.

mod level_file;
mod replay;
mod runner;

use std::path::Path;
use std::process::ExitCode;

use level_file::load_level_from_path;
use replay::load_replay_from_path;
use runner::run_replay;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [replay_path, level_paths @ ..] = args.as_slice() else {
        log::error!("usage: tp_game <replay.json> <level.json>...");
        return ExitCode::from(2);
    };
    if level_paths.is_empty() {
        log::error!("usage: tp_game <replay.json> <level.json>...");
        return ExitCode::from(2);
    }

    let replay = match load_replay_from_path(Path::new(replay_path)) {
        Ok(replay) => replay,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut levels = Vec::with_capacity(level_paths.len());
    for path in level_paths {
        match load_level_from_path(Path::new(path)) {
            Ok(level) => levels.push(level),
            Err(err) => {
                log::error!("Level load aborted: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let inputs = replay.expanded_inputs();
    log::info!(
        "Playing {} ticks across {} level(s)",
        inputs.len(),
        levels.len()
    );

    match run_replay(&levels, &inputs) {
        Ok(summary) => {
            log::info!(
                "Run finished: ticks={} deaths={} levels_cleared={} items={} jump_presses={} won={}",
                summary.ticks,
                summary.deaths,
                summary.levels_cleared,
                summary.items,
                summary.jump_presses,
                summary.won
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

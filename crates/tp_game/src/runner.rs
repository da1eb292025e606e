//! Headless game loop: plays a replay through a list of levels.
//!
//! This is the "outside" of the kernel. It owns restart and level-advance
//! policy: a death rebuilds the session for the same level, reaching the exit
//! moves on to the next one, and clearing the last level wins the run.

use tp_core::{GameEvent, GameSession, InputState, Key, LevelError, MovementIntent};

use crate::level_file::Level;
use crate::replay::ReplayInput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub deaths: u32,
    pub levels_cleared: usize,
    pub items: usize,
    /// Jump key presses, whether or not a jump started.
    pub jump_presses: u32,
    pub won: bool,
}

fn start_session(level: &Level) -> Result<GameSession, LevelError> {
    log::info!("Starting level '{}'", level.id);
    GameSession::new(level.layout.clone(), level.spawn, level.config)
}

fn apply_input(input: &mut InputState, frame: ReplayInput) -> MovementIntent {
    input.set_key(Key::Left, frame.move_x < 0);
    input.set_key(Key::Right, frame.move_x > 0);
    input.set_key(Key::Jump, frame.jump);
    input.intent()
}

pub fn run_replay(levels: &[Level], inputs: &[ReplayInput]) -> Result<RunSummary, LevelError> {
    let mut summary = RunSummary::default();
    let Some(first) = levels.first() else {
        return Ok(summary);
    };

    let mut level_index = 0;
    let mut session = start_session(first)?;
    let mut input = InputState::new();

    for &frame in inputs {
        let intent = apply_input(&mut input, frame);
        if input.is_just_pressed(Key::Jump) {
            summary.jump_presses += 1;
        }
        let events = session.tick(intent);
        input.end_frame();
        summary.ticks += 1;

        let mut restart = false;
        let mut advance = false;
        for event in &events {
            match event {
                GameEvent::Jumped | GameEvent::Landed => log::trace!("{event:?}"),
                GameEvent::CollectedItem { index, .. } => {
                    summary.items += 1;
                    log::info!("Collected item {index} in '{}'", levels[level_index].id);
                }
                GameEvent::FellOffWorld | GameEvent::TouchedHazard => {
                    summary.deaths += 1;
                    log::info!("{event:?} in '{}', restarting", levels[level_index].id);
                    restart = true;
                }
                GameEvent::ReachedExit => {
                    summary.levels_cleared += 1;
                    log::info!("Cleared '{}'", levels[level_index].id);
                    advance = true;
                }
            }
        }

        if restart {
            session = start_session(&levels[level_index])?;
        } else if advance {
            level_index += 1;
            match levels.get(level_index) {
                Some(next) => session = start_session(next)?,
                None => {
                    summary.won = true;
                    break;
                }
            }
        }
    }

    Ok(summary)
}

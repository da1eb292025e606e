//! One playthrough of one level.
//!
//! `GameSession` owns everything a tick touches: the level layout, the actor,
//! the controller tuning and the outcome latch. Callers hold it explicitly and
//! drop it to restart or change level; nothing lives in process-wide state.

use crate::actor::ActorState;
use crate::controller::{MovementConfig, MovementController, MovementIntent};
use crate::error::LevelError;
use crate::events::GameEvent;
use crate::geometry::{CollisionRect, LevelGeometry, LevelLayout};
use crate::outcome::{evaluate, Outcome, OutcomeTracker};

pub struct GameSession {
    layout: LevelLayout,
    /// Uncollected items, tagged with their index in the authored list.
    collectibles: Vec<(usize, CollisionRect)>,
    actor: ActorState,
    controller: MovementController,
    outcomes: OutcomeTracker,
    ticks: u64,
}

impl GameSession {
    pub fn new(
        layout: LevelLayout,
        spawn: CollisionRect,
        config: MovementConfig,
    ) -> Result<Self, LevelError> {
        if spawn.width <= 0.0 || spawn.height <= 0.0 {
            return Err(LevelError::malformed(format!(
                "spawn box must have positive size, got {}x{}",
                spawn.width, spawn.height
            )));
        }
        if layout.geometry.overlaps(&spawn) {
            return Err(LevelError::malformed(format!(
                "spawn box {spawn:?} overlaps solid geometry"
            )));
        }

        let collectibles = layout.collectibles.iter().copied().enumerate().collect();
        Ok(Self {
            layout,
            collectibles,
            actor: ActorState::spawn(spawn),
            controller: MovementController::new(config),
            outcomes: OutcomeTracker::new(),
            ticks: 0,
        })
    }

    /// Advances one simulation step and returns what happened, in order:
    /// movement events, pickups, then at most one outcome event.
    pub fn tick(&mut self, intent: MovementIntent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.ticks += 1;

        let report = self
            .controller
            .tick(&mut self.actor, intent, &self.layout.geometry);
        if report.jumped {
            events.push(GameEvent::Jumped);
        }
        if report.landed {
            events.push(GameEvent::Landed);
        }

        let bounds = self.actor.bounds();
        self.collectibles.retain(|&(index, item)| {
            if item.intersects(&bounds) {
                events.push(GameEvent::CollectedItem {
                    index,
                    bounds: item,
                });
                false
            } else {
                true
            }
        });

        let outcome = evaluate(
            &bounds,
            self.controller.config.world_height,
            &self.layout.hazards,
            self.layout.exit.as_ref(),
        );
        if let Some(event) = self.outcomes.observe(outcome).and_then(GameEvent::from_outcome) {
            log::debug!("Tick {}: {:?}", self.ticks, event);
            events.push(event);
        }

        events
    }

    pub fn actor(&self) -> &ActorState {
        &self.actor
    }

    pub fn geometry(&self) -> &LevelGeometry {
        &self.layout.geometry
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn config(&self) -> &MovementConfig {
        &self.controller.config
    }

    /// Latest outcome; stays terminal until the actor leaves the trigger.
    pub fn outcome(&self) -> Outcome {
        self.outcomes.current()
    }

    pub fn remaining_collectibles(&self) -> impl Iterator<Item = &CollisionRect> {
        self.collectibles.iter().map(|(_, rect)| rect)
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

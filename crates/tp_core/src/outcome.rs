//! Terminal and transition signals for the surrounding game loop.
//!
//! The kernel only reports these; restarting a level or advancing to the next
//! one is the caller's job.

use crate::geometry::CollisionRect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[default]
    Alive,
    /// Top of the actor's box is below the bottom of the world.
    FellOffWorld,
    /// Actor's box intersects a hazard trigger (lava).
    TouchedHazard,
    /// Actor's box intersects the exit door trigger.
    ReachedExit,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Self::Alive
    }

    pub fn is_death(self) -> bool {
        matches!(self, Self::FellOffWorld | Self::TouchedHazard)
    }
}

/// Classifies the actor's box for this tick. Death outranks reaching the exit
/// when both happen at once.
pub fn evaluate(
    bounds: &CollisionRect,
    world_height: f32,
    hazards: &[CollisionRect],
    exit: Option<&CollisionRect>,
) -> Outcome {
    if bounds.top() > world_height {
        Outcome::FellOffWorld
    } else if hazards.iter().any(|h| h.intersects(bounds)) {
        Outcome::TouchedHazard
    } else if exit.is_some_and(|e| e.intersects(bounds)) {
        Outcome::ReachedExit
    } else {
        Outcome::Alive
    }
}

/// Turns per-tick outcomes into one report per episode: a terminal outcome is
/// reported on the tick it is entered and stays quiet while it persists.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeTracker {
    current: Outcome,
}

impl OutcomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Outcome {
        self.current
    }

    /// Returns the outcome if it is terminal and was not already reported.
    pub fn observe(&mut self, outcome: Outcome) -> Option<Outcome> {
        let previous = std::mem::replace(&mut self.current, outcome);
        (outcome.is_terminal() && outcome != previous).then_some(outcome)
    }

    pub fn reset(&mut self) {
        self.current = Outcome::Alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXIT: CollisionRect = CollisionRect::new(900.0, 800.0, 50.0, 100.0);

    fn actor_at(x: f32, y: f32) -> CollisionRect {
        CollisionRect::new(x, y, 40.0, 80.0)
    }

    #[test]
    fn fell_off_world_when_top_passes_world_height() {
        assert_eq!(evaluate(&actor_at(0.0, 1000.0), 1000.0, &[], None), Outcome::Alive);
        assert_eq!(
            evaluate(&actor_at(0.0, 1001.0), 1000.0, &[], None),
            Outcome::FellOffWorld
        );
    }

    #[test]
    fn exit_trigger_is_a_rect_overlap() {
        assert_eq!(
            evaluate(&actor_at(880.0, 820.0), 1000.0, &[], Some(&EXIT)),
            Outcome::ReachedExit
        );
        // Touching the door edge is not entering it.
        assert_eq!(
            evaluate(&actor_at(860.0, 820.0), 1000.0, &[], Some(&EXIT)),
            Outcome::Alive
        );
    }

    #[test]
    fn hazard_outranks_exit() {
        let lava = [CollisionRect::new(850.0, 880.0, 100.0, 20.0)];
        assert_eq!(
            evaluate(&actor_at(880.0, 820.0), 1000.0, &lava, Some(&EXIT)),
            Outcome::TouchedHazard
        );
    }

    #[test]
    fn tracker_reports_each_fall_once() {
        let mut tracker = OutcomeTracker::new();
        assert_eq!(tracker.observe(Outcome::Alive), None);
        assert_eq!(tracker.observe(Outcome::FellOffWorld), Some(Outcome::FellOffWorld));
        for _ in 0..10 {
            assert_eq!(tracker.observe(Outcome::FellOffWorld), None);
        }
        assert_eq!(tracker.current(), Outcome::FellOffWorld);

        tracker.reset();
        assert_eq!(tracker.observe(Outcome::FellOffWorld), Some(Outcome::FellOffWorld));
    }

    #[test]
    fn tracker_rearms_after_leaving_trigger() {
        let mut tracker = OutcomeTracker::new();
        assert!(tracker.observe(Outcome::ReachedExit).is_some());
        assert!(tracker.observe(Outcome::Alive).is_none());
        assert!(tracker.observe(Outcome::ReachedExit).is_some());
    }

    #[test]
    fn death_classification() {
        assert!(Outcome::FellOffWorld.is_death());
        assert!(Outcome::TouchedHazard.is_death());
        assert!(!Outcome::ReachedExit.is_death());
        assert!(!Outcome::Alive.is_terminal());
    }
}

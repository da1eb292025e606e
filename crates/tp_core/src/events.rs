use crate::geometry::CollisionRect;
use crate::outcome::Outcome;

/// Discrete things that happened during a tick, for audio, score and UI
/// systems outside the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    Landed,
    /// `index` is the item's position in the level's collectible list.
    CollectedItem {
        index: usize,
        bounds: CollisionRect,
    },
    ReachedExit,
    FellOffWorld,
    TouchedHazard,
}

impl GameEvent {
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Alive => None,
            Outcome::FellOffWorld => Some(Self::FellOffWorld),
            Outcome::TouchedHazard => Some(Self::TouchedHazard),
            Outcome::ReachedExit => Some(Self::ReachedExit),
        }
    }
}

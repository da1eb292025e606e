//! Tile platformer kernel: static level geometry, axis-separated collision,
//! gravity/jump movement and outcome signalling for a single actor.
//!
//! Each tick runs synchronously on the caller's thread:
//!
//!   1. sample one `MovementIntent`
//!   2. `MovementController` integrates gravity and the jump latch into (dx, dy)
//!   3. `collision::resolve` corrects the displacement against `LevelGeometry`
//!   4. the corrected box is committed and checked against trigger rectangles
//!
//! Rendering, audio, score and menus are outside the kernel. They read
//! `ActorState` and the geometry, and react to `GameEvent`s.

pub mod actor;
pub mod collision;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod outcome;
pub mod session;

pub use actor::{ActorState, Facing};
pub use collision::{resolve, ContactPolicy, Resolution};
pub use controller::{MovementConfig, MovementController, MovementIntent, TickReport};
pub use error::LevelError;
pub use events::GameEvent;
pub use geometry::{CollisionRect, LevelGeometry, LevelLayout, TileDescriptor, TileKind};
pub use input::{InputState, Key};
pub use outcome::{Outcome, OutcomeTracker};
pub use session::GameSession;

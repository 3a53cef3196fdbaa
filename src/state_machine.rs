//! Interaction state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! one request/response cycle is `Idle → UserTurnRecorded →
//! AwaitingCompletion → {Revealing → Recorded} | Failed`, returning to
//! `Idle` at the end of every interaction.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::TurnEvent;
pub use state::TurnState;
pub use transition::{transition, TransitionError, TransitionResult};

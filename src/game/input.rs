use serde::{Deserialize, Serialize};
use strum::Display;

use crate::game::state::Phase;

/// The two inputs the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum GameInput {
    /// Pointer click (or a key bound to it).
    Click,
    /// The designated flap key.
    Flap,
}

/// What an input does in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignore,
    Start,
    Restart,
    Flap,
}

/// Dispatch table keyed by input and phase. The flap key deliberately does not start a fresh game,
/// only a click does.
pub fn route(input: GameInput, phase: Phase) -> Transition {
    match (input, phase) {
        (GameInput::Click, Phase::NotStarted) => Transition::Start,
        (GameInput::Click, Phase::Playing) => Transition::Ignore,
        (GameInput::Click, Phase::GameOver) => Transition::Restart,
        (GameInput::Flap, Phase::NotStarted) => Transition::Ignore,
        (GameInput::Flap, Phase::Playing) => Transition::Flap,
        (GameInput::Flap, Phase::GameOver) => Transition::Restart,
    }
}

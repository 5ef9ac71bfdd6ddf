use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::game::GameInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    // Page actions
    Game(GameInput),
}

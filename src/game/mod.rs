//! Host-independent game core: entities, the phase machine and the per-frame tick.

mod bird;
mod input;
mod object;
mod obstacle;
mod render;
mod settings;
mod state;

pub use bird::Bird;
pub use input::{route, GameInput, Transition};
pub use object::Object;
pub use obstacle::{Obstacle, ObstacleStream};
pub use render::{Renderer, Scene};
pub use settings::{GameSettings, GameSettingsBuilder};
pub use state::{GameState, Phase};

use color_eyre::eyre::Result;

use crate::game::{bird::Bird, obstacle::ObstacleStream, settings::GameSettings, state::Phase};

/// Read-only view of the game handed to a [`Renderer`] once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub phase: Phase,
    pub bird: &'a Bird,
    pub obstacles: &'a ObstacleStream,
    pub score: u64,
    pub settings: &'a GameSettings,
}

/// Paints a scene. The game never reads anything back from it.
pub trait Renderer {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()>;
}

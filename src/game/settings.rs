use color_eyre::eyre::{ensure, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::constants::game;

/// Geometry and physics of a game session, in world units and per-tick rates.
///
/// Every field is optional in the config file; missing ones fall back to the defaults in
/// [`crate::constants::game`].
#[derive(Builder, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct GameSettings {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub lift: f32,
    pub pipe_width: f32,
    pub gap: f32,
    pub min_margin: f32,
    pub spawn_interval: u64,
    pub scroll_speed: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: game::WIDTH,
            height: game::HEIGHT,
            ground_height: game::GROUND_HEIGHT,
            bird_x: game::BIRD_X,
            bird_width: game::BIRD_WIDTH,
            bird_height: game::BIRD_HEIGHT,
            gravity: game::GRAVITY,
            lift: game::LIFT,
            pipe_width: game::PIPE_WIDTH,
            gap: game::PIPE_GAP,
            min_margin: game::PIPE_MIN_MARGIN,
            spawn_interval: game::SPAWN_INTERVAL,
            scroll_speed: game::SCROLL_SPEED,
        }
    }
}

impl GameSettings {
    /// Top edge of the ground band.
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    pub fn bird_start_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Rejects settings that would produce an unplayable or degenerate field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("bird_x", self.bird_x),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("gravity", self.gravity),
            ("lift", self.lift),
            ("pipe_width", self.pipe_width),
            ("gap", self.gap),
            ("min_margin", self.min_margin),
            ("scroll_speed", self.scroll_speed),
        ] {
            ensure!(value.is_finite(), "{name} must be a finite number, got {value}");
        }
        ensure!(self.width > 0.0 && self.height > 0.0, "play area must have a positive size");
        ensure!(
            self.ground_height >= 0.0 && self.ground_height < self.height,
            "ground height {} must lie within the play area height {}",
            self.ground_height,
            self.height
        );
        ensure!(
            self.gap + 2.0 * self.min_margin < self.ground_y(),
            "gap {} plus two margins of {} does not fit in a play height of {}",
            self.gap,
            self.min_margin,
            self.ground_y()
        );
        ensure!(self.gap > 0.0 && self.min_margin >= 0.0, "gap must be positive and margin non-negative");
        ensure!(self.spawn_interval > 0, "spawn interval must be at least one frame");
        ensure!(self.scroll_speed > 0.0, "scroll speed must be positive");
        // A fresh obstacle must survive the frame it spawns in.
        ensure!(
            self.scroll_speed < self.width + self.pipe_width,
            "scroll speed {} would retire an obstacle in the frame it spawns",
            self.scroll_speed
        );
        ensure!(self.pipe_width > 0.0, "pipe width must be positive");
        ensure!(self.bird_width > 0.0 && self.bird_height > 0.0, "bird must have a positive size");
        ensure!(
            self.bird_x >= 0.0 && self.bird_x + self.bird_width <= self.width,
            "bird at x={} does not fit horizontally",
            self.bird_x
        );
        ensure!(
            self.bird_start_y() + self.bird_height <= self.ground_y(),
            "bird of height {} does not fit above the ground",
            self.bird_height
        );
        ensure!(self.gravity >= 0.0, "gravity must pull downwards");
        ensure!(self.lift < 0.0, "lift must push upwards");
        Ok(())
    }
}

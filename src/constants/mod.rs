pub mod game;

// Terminal cells reserved for the playfield, border included.
pub const WIDTH: u16 = 42;
pub const HEIGHT: u16 = 32;

pub const TITLE_TEXT: &str = "Flappy Bird";
pub const START_TEXT: &str = "Click to Start";
pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RESTART_TEXT: &str = "Click to Restart";

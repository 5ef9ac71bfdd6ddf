use ratatui::style::Color;

// World geometry, in world units.
pub const WIDTH: f32 = 320.0;
pub const HEIGHT: f32 = 480.0;
pub const GROUND_HEIGHT: f32 = 40.0;

pub const BIRD_X: f32 = 50.0;
pub const BIRD_WIDTH: f32 = 20.0;
pub const BIRD_HEIGHT: f32 = 20.0;
pub const BEAK_LENGTH: f32 = 10.0;

// Per-tick kinematics.
pub const GRAVITY: f32 = 0.2;
pub const LIFT: f32 = -4.0;

pub const PIPE_WIDTH: f32 = 40.0;
pub const PIPE_GAP: f32 = 150.0;
pub const PIPE_MIN_MARGIN: f32 = 50.0;
pub const SPAWN_INTERVAL: u64 = 120;
pub const SCROLL_SPEED: f32 = 2.0;

pub const SKY_COLOR: Color = Color::Rgb(135, 206, 235);
pub const GROUND_COLOR: Color = Color::Rgb(139, 69, 19);
pub const PIPE_COLOR: Color = Color::LightGreen;
pub const BIRD_COLOR: Color = Color::Yellow;
pub const BEAK_COLOR: Color = Color::Rgb(255, 165, 0);
pub const SCORE_COLOR: Color = Color::White;

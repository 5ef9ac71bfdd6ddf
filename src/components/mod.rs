pub mod help;
pub mod playfield;

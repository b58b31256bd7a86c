// Frame-driven combat core for a 2D platform fighter
//
// - `core`: small math helpers
// - `engine`: input commands and platform physics
// - `game`: fighters, moves, hit resolution and the level tick driver
// - `error`: authoring and match errors

pub mod core;
pub mod engine;
pub mod error;
pub mod game;

pub use error::{ConfigError, MatchError};

// Game layer: fighters, moves, hit resolution and the level that drives them

pub mod characters;
pub mod combat;
pub mod events;
pub mod level;
pub mod projectile;
pub mod roster;

pub use events::{MatchEvent, SoundCue};
pub use level::Level;

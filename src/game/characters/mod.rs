// Character system
//
// This module contains everything related to fighters:
// - Character entity and registry
// - Per-type stats, sprites and movesets (profiles)
// - State machine for character behaviour
// - Draw requests handed to the renderer

pub mod animation;
pub mod character;
pub mod profile;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{DebugInfo, DrawRequest, ImageKey, SpriteTable};
pub use character::{Character, CharacterManager, EntityId, HitOutcome};
pub use profile::{CharacterProfile, MoveSlot, Moveset, STATE_SPRITES};
pub use state::{CharacterState, CharacterStateMachine, Facing, Timer};
pub use stats::{CharacterStats, BASE_STATS};

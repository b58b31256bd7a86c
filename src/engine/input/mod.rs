// Input command layer
//
// The device layer (keyboards, controllers, key remapping) lives outside this
// crate. All the combat core needs is one `Command` snapshot per fighter per
// tick, which `CommandState` turns into pressed/held/released queries.
//
// ## Architecture
//
// - `action`: Game actions and attack directions
// - `buffer`: Input buffering so presses made during lag are not lost
// - `command`: Per-tick snapshots and the derived per-fighter input state
//
// ## Usage Example
//
// ```rust
// use rusted_punch::engine::input::{Action, Command, CommandState};
//
// let mut input = CommandState::new();
// input.apply(&Command::new().with(Action::Jump));
// assert!(input.just_pressed(Action::Jump));
// ```

pub mod action;
pub mod buffer;
pub mod command;

// Re-export commonly used types
pub use action::{Action, AttackDirection};
pub use buffer::InputBuffer;
pub use command::{Command, CommandState};

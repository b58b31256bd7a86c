// Platform-fighter physics: kinematic bodies, stage contact and motion rules

pub mod body;
pub mod collision;
pub mod integrator;
pub mod stage;

pub use body::Body;
pub use collision::{Aabb, OrientedRect};
pub use stage::{Contacts, Platform, Stage, WallSide};

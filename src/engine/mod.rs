// Engine modules: input commands and physics

pub mod input;
pub mod physics;

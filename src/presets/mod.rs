//! Saved light scenes, recalled from the numeric keys.

pub mod engine;
pub mod menu;
pub mod store;

pub use store::{Preset, PresetStore};

//! Platform abstraction layer
//!
//! Translates host input (pointer, touch, keys) into per-tick simulation input.

pub mod input;

pub use input::{CanvasMapping, InputQueue};

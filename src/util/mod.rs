//! Shared utilities.
//!
//! Easing curves for camera transitions and color helpers for the scene
//! mirror.

pub mod color;
pub mod easing;

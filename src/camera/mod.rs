//! Camera state for the in-memory stage.
//!
//! Provides an orbital camera with fit-to-view and eased focus transitions.

/// Eased transition between two camera poses.
pub mod animation;
/// Orbital camera controller: focus point, distance and transitions.
pub mod controller;

pub use animation::CameraTransition;
pub use controller::CameraController;

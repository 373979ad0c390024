use std::time::Duration;

use glam::Vec3;

use super::{Representation, Shape};

/// The rendering engine surface the synchronizer and the controller talk
/// to.
///
/// A stage holds named components, each wrapping one [`Shape`] drawn with
/// one [`Representation`]. It also owns the camera.
pub trait Stage {
    /// Remove every component.
    fn remove_all_components(&mut self);

    /// Whether a component called `name` exists.
    fn has_component(&self, name: &str) -> bool;

    /// Add a component for `shape` (named after `shape.name`).
    fn add_component(&mut self, shape: Shape, representation: Representation);

    /// Swap the shape of the existing component named `shape.name` in
    /// place, resetting its representation. Returns false if no such
    /// component exists.
    fn replace_shape(&mut self, shape: Shape, representation: Representation) -> bool;

    /// Remove the component called `name`. Returns false if it did not
    /// exist.
    fn remove_component(&mut self, name: &str) -> bool;

    /// Ask for a redraw.
    fn request_render(&mut self);

    /// Fit the camera to everything on stage.
    fn auto_view(&mut self);

    /// Current camera eye position.
    fn camera_position(&self) -> Vec3;

    /// Animate the camera to look at `center` from `distance` away.
    fn zoom_move(&mut self, center: Vec3, distance: f32, duration: Duration);

    /// Advance running animations by `dt` seconds. Returns true while any
    /// is still running.
    fn tick(&mut self, _dt: f32) -> bool {
        false
    }
}

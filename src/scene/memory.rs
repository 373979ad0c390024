//! In-memory stage: keeps components and camera state without drawing
//! anything.
//!
//! Used for headless sessions and as the reference stage in tests.

use std::time::Duration;

use glam::Vec3;

use super::{Representation, Shape, Stage};
use crate::camera::CameraController;
use crate::options::CameraOptions;
use crate::util::easing::EasingFunction;

/// A component on a [`MemoryStage`].
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// The primitives.
    pub shape: Shape,
    /// How they are drawn.
    pub representation: Representation,
}

/// A [`Stage`] that records components in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStage {
    components: Vec<Component>,
    camera: CameraController,
    easing: EasingFunction,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation at the last `request_render()`.
    rendered_generation: u64,
    render_requests: usize,
}

impl Default for MemoryStage {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

impl MemoryStage {
    /// Empty stage with a camera configured from `options`.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            components: Vec::new(),
            camera: CameraController::new(options),
            easing: options.easing,
            generation: 0,
            rendered_generation: 0,
            render_requests: 0,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The component called `name`.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.shape.name == name)
    }

    /// Components sorted by name, for order-insensitive comparison.
    #[must_use]
    pub fn sorted_components(&self) -> Vec<&Component> {
        let mut sorted: Vec<&Component> = self.components.iter().collect();
        sorted.sort_by(|a, b| a.shape.name.cmp(&b.shape.name));
        sorted
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// How many redraws were requested.
    #[must_use]
    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    /// Whether components changed since the last redraw request.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    fn positions(&self) -> Vec<Vec3> {
        self.components
            .iter()
            .flat_map(|c| {
                c.shape
                    .spheres
                    .iter()
                    .map(|s| s.position)
                    .chain(c.shape.cylinders.iter().flat_map(|cy| [cy.start, cy.end]))
            })
            .collect()
    }
}

impl Stage for MemoryStage {
    fn remove_all_components(&mut self) {
        self.components.clear();
        self.invalidate();
    }

    fn has_component(&self, name: &str) -> bool {
        self.component(name).is_some()
    }

    fn add_component(&mut self, shape: Shape, representation: Representation) {
        self.components.push(Component {
            shape,
            representation,
        });
        self.invalidate();
    }

    fn replace_shape(&mut self, shape: Shape, representation: Representation) -> bool {
        let Some(existing) =
            self.components.iter_mut().find(|c| c.shape.name == shape.name)
        else {
            return false;
        };
        existing.shape = shape;
        existing.representation = representation;
        self.invalidate();
        true
    }

    fn remove_component(&mut self, name: &str) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.shape.name != name);
        let removed = self.components.len() != before;
        if removed {
            self.invalidate();
        }
        removed
    }

    fn request_render(&mut self) {
        self.rendered_generation = self.generation;
        self.render_requests += 1;
    }

    fn auto_view(&mut self) {
        let positions = self.positions();
        self.camera.fit_to_positions(&positions);
    }

    fn camera_position(&self) -> Vec3 {
        self.camera.eye()
    }

    fn zoom_move(&mut self, center: Vec3, distance: f32, duration: Duration) {
        self.camera.zoom_move(center, distance, duration, self.easing);
    }

    fn tick(&mut self, dt: f32) -> bool {
        self.camera.update_animation(dt)
    }
}

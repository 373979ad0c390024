use std::time::Duration;

use glam::{Quat, Vec3};

use super::animation::CameraTransition;
use crate::options::CameraOptions;
use crate::util::easing::EasingFunction;

/// Orbital camera: an orientation around a focus point at some distance.
#[derive(Debug, Clone)]
pub struct CameraController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    fovy: f32,
    fit_padding: f32,
    transition: Option<CameraTransition>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

impl CameraController {
    /// Camera looking down -Z at the origin from 150 units away.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            distance: 150.0,
            focus_point: Vec3::ZERO,
            fovy: options.fovy,
            fit_padding: options.fit_padding,
            transition: None,
        }
    }

    /// World-space eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.orientation * Vec3::Z * self.distance
    }

    /// Point the camera orbits around.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Eye-to-focus distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The running focus transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    /// Center on the centroid of `positions` at a distance that keeps their
    /// bounding sphere in view. Cancels any running transition.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        if positions.is_empty() {
            return;
        }

        let centroid: Vec3 =
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        let fovy_rad = self.fovy.to_radians();
        let fit_distance = radius / (fovy_rad / 2.0).tan();

        self.transition = None;
        self.focus_point = centroid;
        self.distance = (fit_distance * self.fit_padding).max(1.0);
    }

    /// Start an eased move to `center` at eye distance `distance`.
    ///
    /// A move started while another is running replaces it, starting from
    /// wherever the camera currently is.
    pub fn zoom_move(
        &mut self,
        center: Vec3,
        distance: f32,
        duration: Duration,
        easing: EasingFunction,
    ) {
        self.transition = Some(CameraTransition::new(
            (self.focus_point, self.distance),
            (center, distance.max(f32::EPSILON)),
            duration,
            easing,
        ));
    }

    /// Advance the running transition by `dt` seconds. Returns true while a
    /// transition is still in progress.
    pub fn update_animation(&mut self, dt: f32) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let (focus, distance) = transition.advance(dt);
        self.focus_point = focus;
        self.distance = distance;
        if transition.is_finished() {
            self.transition = None;
            return false;
        }
        true
    }
}

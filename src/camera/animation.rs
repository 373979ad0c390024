use std::time::Duration;

use glam::Vec3;

use crate::util::easing::EasingFunction;

/// An in-flight move of the camera focus point and eye distance.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    from_focus: Vec3,
    to_focus: Vec3,
    from_distance: f32,
    to_distance: f32,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl CameraTransition {
    /// Start a transition from the current pose to the target pose.
    #[must_use]
    pub fn new(
        from: (Vec3, f32),
        to: (Vec3, f32),
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from_focus: from.0,
            to_focus: to.0,
            from_distance: from.1,
            to_distance: to.1,
            duration: duration.as_secs_f32(),
            elapsed: 0.0,
            easing,
        }
    }

    /// Target focus point.
    #[must_use]
    pub fn target_focus(&self) -> Vec3 {
        self.to_focus
    }

    /// Target eye distance.
    #[must_use]
    pub fn target_distance(&self) -> f32 {
        self.to_distance
    }

    /// Normalized progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Whether the transition has reached its target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the interpolated pose.
    pub fn advance(&mut self, dt: f32) -> (Vec3, f32) {
        self.elapsed += dt.max(0.0);
        self.sample()
    }

    /// Pose at the current progress.
    #[must_use]
    pub fn sample(&self) -> (Vec3, f32) {
        let t = self.easing.evaluate(self.progress());
        (
            self.from_focus.lerp(self.to_focus, t),
            self.from_distance + (self.to_distance - self.from_distance) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_duration() {
        let mut tr = CameraTransition::new(
            (Vec3::ZERO, 100.0),
            (Vec3::new(4.0, 0.0, 0.0), 20.0),
            Duration::from_secs(1),
            EasingFunction::Linear,
        );
        let (focus, distance) = tr.advance(0.5);
        assert_eq!(focus, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(distance, 60.0);
        assert!(!tr.is_finished());

        let (focus, distance) = tr.advance(0.75);
        assert_eq!(focus, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(distance, 20.0);
        assert!(tr.is_finished());
    }

    #[test]
    fn zero_duration_snaps() {
        let tr = CameraTransition::new(
            (Vec3::ZERO, 10.0),
            (Vec3::ONE, 5.0),
            Duration::ZERO,
            EasingFunction::DEFAULT,
        );
        assert!(tr.is_finished());
        assert_eq!(tr.sample(), (Vec3::ONE, 5.0));
    }
}

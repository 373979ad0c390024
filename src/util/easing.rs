//! Easing curves for camera transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve applied to the normalized progress of a transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Constant speed.
    Linear,
    /// Fast start, slow end.
    QuadraticOut,
    /// Slow start and end, fast middle.
    SmoothStep,
    /// Cubic Bezier-style ease with two inner control values:
    /// `c1·3t(1-t)² + c2·3(1-t)t² + t³`.
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Gentle ease-out used for camera focus moves.
    pub const DEFAULT: Self = Self::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Map progress `t` to eased progress. `t` is clamped to `[0, 1]`;
    /// both ends are fixed points for every curve.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let rest = 1.0 - t;
                1.0 - rest * rest
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::CubicHermite { c1, c2 } => {
                let rest = 1.0 - t;
                c1 * 3.0 * t * rest * rest + c2 * 3.0 * rest * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 4] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticOut,
        EasingFunction::SmoothStep,
        EasingFunction::DEFAULT,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for f in ALL {
            assert_eq!(f.evaluate(0.0), 0.0, "{f:?} at 0");
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6, "{f:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for f in ALL {
            assert_eq!(f.evaluate(-3.0), f.evaluate(0.0));
            assert_eq!(f.evaluate(7.5), f.evaluate(1.0));
        }
    }

    #[test]
    fn default_eases_out() {
        let f = EasingFunction::default();
        assert!(f.evaluate(0.25) > 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
        assert_eq!(EasingFunction::SmoothStep.evaluate(0.5), 0.5);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&EasingFunction::SmoothStep).unwrap();
        assert_eq!(json, "\"smooth_step\"");
        let parsed: EasingFunction =
            serde_json::from_str(r#"{"cubic_hermite":{"c1":0.2,"c2":0.9}}"#)
                .unwrap();
        assert_eq!(parsed, EasingFunction::CubicHermite { c1: 0.2, c2: 0.9 });
    }
}

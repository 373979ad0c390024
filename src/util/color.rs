//! Color helpers for scene primitives.

/// RGB color with channels in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Scale every channel by `factor`, clamping to 1.0.
///
/// Used to brighten picked atoms without changing their hue family.
#[must_use]
pub fn brighten(color: Rgb, factor: f32) -> Rgb {
    color.map(|c| (c * factor).min(1.0))
}

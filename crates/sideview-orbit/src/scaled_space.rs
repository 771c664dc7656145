//! Local-to-render space conversion.

use glam::{DVec3, Vec3};

/// Ratio between local (physical) space and scaled space used by the map view.
pub const DEFAULT_SCALE_FACTOR: f64 = 6000.0;

/// Maps a local orbit position into the space lines are drawn in.
pub trait RenderTransform {
    /// Convert one local position.
    fn to_render(&self, local: DVec3) -> Vec3;
}

impl<F> RenderTransform for F
where
    F: Fn(DVec3) -> Vec3,
{
    fn to_render(&self, local: DVec3) -> Vec3 {
        self(local)
    }
}

/// Scaled-space transform: shift by a floating origin, then shrink.
///
/// Positions are kept in f64 until after the origin shift so that large
/// orbits do not lose precision before the narrowing to f32.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSpace {
    /// Local-space point that maps to the render origin.
    pub origin: DVec3,
    /// `1 / scale_factor`.
    pub inverse_scale_factor: f64,
}

impl ScaledSpace {
    /// Scaled space with the given scale factor and a zero origin.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            origin: DVec3::ZERO,
            inverse_scale_factor: 1.0 / scale_factor,
        }
    }

    /// Same scale, shifted origin.
    pub fn with_origin(self, origin: DVec3) -> Self {
        Self { origin, ..self }
    }

    /// Scale factor (`local / scaled`).
    pub fn scale_factor(&self) -> f64 {
        1.0 / self.inverse_scale_factor
    }

    /// Local position to scaled space.
    pub fn local_to_scaled(&self, local: DVec3) -> Vec3 {
        ((local - self.origin) * self.inverse_scale_factor).as_vec3()
    }

    /// Scaled position back to local space.
    pub fn scaled_to_local(&self, scaled: Vec3) -> DVec3 {
        scaled.as_dvec3() * self.scale_factor() + self.origin
    }
}

impl Default for ScaledSpace {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_FACTOR)
    }
}

impl RenderTransform for ScaledSpace {
    fn to_render(&self, local: DVec3) -> Vec3 {
        self.local_to_scaled(local)
    }
}

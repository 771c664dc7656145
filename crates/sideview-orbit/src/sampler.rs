//! Orbit curve tessellation.
//!
//! Turns a [`ConicOrbit`] into line segments ready for immediate-mode
//! drawing. The object's current position is always one of the emitted
//! points, so the drawn line passes through the vessel or body instead of
//! cutting a chord next to it.
//!
//! Closed conics are tiled with a fixed angular step starting at the seam
//! and wrapping modulo a full revolution. Open conics walk away from the seam
//! in both directions and stop short of the asymptotes, where the radius
//! goes to infinity.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::conic::{ConicOrbit, CurveKind, asymptote_bound};
use crate::error::OrbitError;

/// Default angular resolution in degrees.
pub const DEFAULT_ANGULAR_STEP_DEGREES: f64 = 2.0;

/// Upper bound on points per revolution, reached at a 0.01° step.
pub const MAX_POINT_COUNT: usize = 36_000;

/// Fixed-resolution sampler for conic orbits.
///
/// Holds no per-frame state. Every call to [`sample`](Self::sample) builds
/// its segment list from scratch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCurveSampler {
    angular_step_degrees: f64,
    point_count: usize,
}

/// Line segments approximating one orbit.
///
/// For open conics the backward arm comes first, followed by the forward
/// arm. Both arms start at the seam.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPolyline<P> {
    /// Tessellation strategy that produced the segments.
    pub kind: CurveKind,
    /// The point at the object's current anomaly.
    pub seam: P,
    /// Connected segments in emission order.
    pub segments: Vec<(P, P)>,
    backward_len: usize,
}

impl<P> OrbitPolyline<P> {
    /// Segments walking toward decreasing anomaly. Empty for closed conics.
    pub fn backward_arm(&self) -> &[(P, P)] {
        &self.segments[..self.backward_len]
    }

    /// Segments walking toward increasing anomaly. The whole loop for closed
    /// conics.
    pub fn forward_arm(&self) -> &[(P, P)] {
        &self.segments[self.backward_len..]
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segment was produced.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for OrbitCurveSampler {
    fn default() -> Self {
        Self {
            angular_step_degrees: DEFAULT_ANGULAR_STEP_DEGREES,
            point_count: 180,
        }
    }
}

impl OrbitCurveSampler {
    /// Create a sampler with the given angular step.
    ///
    /// The step must give at least two and at most [`MAX_POINT_COUNT`]
    /// points per revolution.
    pub fn new(angular_step_degrees: f64) -> Result<Self, OrbitError> {
        if !angular_step_degrees.is_finite() || angular_step_degrees <= 0.0 {
            return Err(OrbitError::InvalidAngularStep(angular_step_degrees));
        }
        let points = (360.0 / angular_step_degrees).floor();
        if !(2.0..=MAX_POINT_COUNT as f64).contains(&points) {
            return Err(OrbitError::InvalidAngularStep(angular_step_degrees));
        }
        Ok(Self {
            angular_step_degrees,
            point_count: points as usize,
        })
    }

    /// Angular step in degrees.
    pub fn angular_step_degrees(&self) -> f64 {
        self.angular_step_degrees
    }

    /// Points per revolution: `floor(360 / step)`.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Angular step in radians.
    pub fn radian_step(&self) -> f64 {
        self.angular_step_degrees.to_radians()
    }

    /// Tessellate one orbit.
    ///
    /// `project` maps each local position into the space the caller draws
    /// in. It is called once per emitted point, seam first.
    pub fn sample<O, P, F>(&self, orbit: &O, mut project: F) -> Result<OrbitPolyline<P>, OrbitError>
    where
        O: ConicOrbit + ?Sized,
        P: Copy,
        F: FnMut(DVec3) -> P,
    {
        let eccentricity = orbit.eccentricity();
        if !eccentricity.is_finite() || eccentricity < 0.0 {
            return Err(OrbitError::DegenerateConic { eccentricity });
        }
        let seam_anomaly = orbit.eccentric_anomaly();
        if !seam_anomaly.is_finite() {
            return Err(OrbitError::NonFiniteAnomaly(seam_anomaly));
        }

        match CurveKind::of(eccentricity) {
            CurveKind::Closed => Ok(self.sample_closed(orbit, seam_anomaly, &mut project)),
            CurveKind::Open => {
                let boundary =
                    asymptote_bound(eccentricity).ok_or(OrbitError::DegenerateConic { eccentricity })?;
                if seam_anomaly <= -boundary || seam_anomaly >= boundary {
                    return Err(OrbitError::SeamOutsideDomain {
                        anomaly: seam_anomaly,
                        boundary,
                    });
                }
                Ok(self.sample_open(orbit, seam_anomaly, boundary, &mut project))
            }
        }
    }

    fn sample_closed<O, P, F>(&self, orbit: &O, origin: f64, project: &mut F) -> OrbitPolyline<P>
    where
        O: ConicOrbit + ?Sized,
        P: Copy,
        F: FnMut(DVec3) -> P,
    {
        let radian_step = self.radian_step();
        let first = project(orbit.position_at(origin));
        let mut segments = Vec::with_capacity(self.point_count);

        let mut previous = first;
        for i in 1..self.point_count {
            let anomaly = (origin + i as f64 * radian_step).rem_euclid(TAU);
            let point = project(orbit.position_at(anomaly));
            segments.push((previous, point));
            previous = point;
        }
        segments.push((previous, first));

        OrbitPolyline {
            kind: CurveKind::Closed,
            seam: first,
            segments,
            backward_len: 0,
        }
    }

    fn sample_open<O, P, F>(
        &self,
        orbit: &O,
        origin: f64,
        boundary: f64,
        project: &mut F,
    ) -> OrbitPolyline<P>
    where
        O: ConicOrbit + ?Sized,
        P: Copy,
        F: FnMut(DVec3) -> P,
    {
        let start = -boundary;
        let end = boundary;
        let step = (end - start) / (self.point_count - 1) as f64;

        let first = project(orbit.position_at(origin));
        let mut segments = Vec::with_capacity(self.point_count);

        // Arms are cut where they cross the asymptote bound, not resampled, so
        // an off-centre seam gives arms of different lengths.
        let mut previous = first;
        let mut i = 1;
        let mut anomaly = origin - step;
        while anomaly > start {
            let point = project(orbit.position_at(anomaly));
            segments.push((previous, point));
            previous = point;
            i += 1;
            anomaly = origin - i as f64 * step;
        }
        let backward_len = segments.len();

        previous = first;
        i = 1;
        anomaly = origin + step;
        while anomaly < end {
            let point = project(orbit.position_at(anomaly));
            segments.push((previous, point));
            previous = point;
            i += 1;
            anomaly = origin + i as f64 * step;
        }

        OrbitPolyline {
            kind: CurveKind::Open,
            seam: first,
            segments,
            backward_len,
        }
    }
}

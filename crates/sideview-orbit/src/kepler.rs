//! Keplerian two-body orbits, closed and open.
//!
//! A reference implementation of [`ConicOrbit`] for hosts that do not bring
//! their own orbital mechanics, and for headless runs.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::conic::{ConicOrbit, CurveKind};
use crate::error::OrbitError;

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 50;
const NEAR_ZERO: f64 = 1e-11;

/// Orbital elements of a two-body orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerOrbit {
    /// Semi-major axis in meters. Negative for hyperbolic orbits.
    pub semi_major_axis: f64,
    /// Eccentricity. `[0, 1)` closed, `> 1` hyperbolic.
    pub eccentricity: f64,
    /// Inclination in radians relative to the reference plane.
    pub inclination: f64,
    /// Longitude of ascending node in radians.
    pub longitude_ascending: f64,
    /// Argument of periapsis in radians.
    pub argument_periapsis: f64,
    /// Mean anomaly at epoch (t = 0) in radians.
    pub mean_anomaly_epoch: f64,
    /// Gravitational parameter of the central body in m³/s².
    pub gravitational_parameter: f64,
}

impl KeplerOrbit {
    /// Circular equatorial orbit of radius `radius`.
    pub fn circular(radius: f64, gravitational_parameter: f64) -> Self {
        Self {
            semi_major_axis: radius,
            eccentricity: 0.0,
            inclination: 0.0,
            longitude_ascending: 0.0,
            argument_periapsis: 0.0,
            mean_anomaly_epoch: 0.0,
            gravitational_parameter,
        }
    }

    /// Derive elements from a position and velocity relative to the central
    /// body.
    ///
    /// Parabolic trajectories (zero specific energy) and radial or
    /// stationary state vectors have no usable element set and are rejected.
    pub fn from_state_vectors(
        position: DVec3,
        velocity: DVec3,
        gravitational_parameter: f64,
    ) -> Result<Self, OrbitError> {
        if !(gravitational_parameter > 0.0) {
            return Err(OrbitError::InvalidStateVectors("gravitational parameter must be positive"));
        }
        let r = position.length();
        if !(r > 0.0) || !velocity.is_finite() {
            return Err(OrbitError::InvalidStateVectors("position must be non-zero and finite"));
        }

        let mu = gravitational_parameter;
        let h = position.cross(velocity);
        let h_len = h.length();
        if h_len < NEAR_ZERO * r * velocity.length().max(1.0) {
            return Err(OrbitError::InvalidStateVectors("radial trajectory has no orbital plane"));
        }
        let h_hat = h / h_len;

        let energy = velocity.length_squared() / 2.0 - mu / r;
        if energy.abs() < NEAR_ZERO * mu / r {
            return Err(OrbitError::InvalidStateVectors("parabolic trajectory"));
        }
        let semi_major_axis = -mu / (2.0 * energy);

        let e_vec = velocity.cross(h) / mu - position / r;
        let eccentricity = e_vec.length();

        let inclination = (h_hat.z).clamp(-1.0, 1.0).acos();
        let node = DVec3::new(-h.y, h.x, 0.0);
        let (longitude_ascending, reference) = if node.length() > NEAR_ZERO * h_len {
            (node.y.atan2(node.x), node.normalize())
        } else {
            (0.0, DVec3::X)
        };

        // Angles in the orbital plane, signed about the angular momentum.
        let angle_from = |from: DVec3, to: DVec3| h_hat.dot(from.cross(to)).atan2(from.dot(to));

        let (argument_periapsis, true_anomaly) = if eccentricity > NEAR_ZERO {
            (angle_from(reference, e_vec), angle_from(e_vec, position))
        } else {
            (0.0, angle_from(reference, position))
        };

        let mean_anomaly_epoch = if eccentricity < 1.0 {
            let e_anom = ((1.0 - eccentricity * eccentricity).sqrt() * true_anomaly.sin())
                .atan2(eccentricity + true_anomaly.cos());
            (e_anom - eccentricity * e_anom.sin()).rem_euclid(TAU)
        } else {
            let h_anom = 2.0
                * (((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt() * (true_anomaly / 2.0).tan())
                    .atanh();
            eccentricity * h_anom.sinh() - h_anom
        };

        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination,
            longitude_ascending: longitude_ascending.rem_euclid(TAU),
            argument_periapsis: argument_periapsis.rem_euclid(TAU),
            mean_anomaly_epoch,
            gravitational_parameter,
        })
    }

    /// Closed or open.
    pub fn kind(&self) -> CurveKind {
        CurveKind::of(self.eccentricity)
    }

    /// Semi-minor axis; negative for hyperbolic orbits.
    pub fn semi_minor_axis(&self) -> f64 {
        let e2 = self.eccentricity * self.eccentricity;
        match self.kind() {
            CurveKind::Closed => self.semi_major_axis * (1.0 - e2).sqrt(),
            CurveKind::Open => self.semi_major_axis * (e2 - 1.0).sqrt(),
        }
    }

    /// Periapsis distance from the focus.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Mean motion in radians per second.
    pub fn mean_motion(&self) -> f64 {
        (self.gravitational_parameter / self.semi_major_axis.abs().powi(3)).sqrt()
    }

    /// Orbital period in seconds. `None` for open orbits.
    pub fn period(&self) -> Option<f64> {
        match self.kind() {
            CurveKind::Closed => Some(TAU / self.mean_motion()),
            CurveKind::Open => None,
        }
    }

    /// Mean anomaly at `time_seconds` after epoch.
    pub fn mean_anomaly_at(&self, time_seconds: f64) -> f64 {
        let mean_anomaly = self.mean_anomaly_epoch + self.mean_motion() * time_seconds;
        match self.kind() {
            CurveKind::Closed => mean_anomaly.rem_euclid(TAU),
            CurveKind::Open => mean_anomaly,
        }
    }

    /// Eccentric (or hyperbolic) anomaly at `time_seconds` after epoch.
    ///
    /// Solves Kepler's equation by Newton-Raphson.
    pub fn eccentric_anomaly_at(&self, time_seconds: f64) -> f64 {
        let mean_anomaly = self.mean_anomaly_at(time_seconds);
        let e = self.eccentricity;
        match self.kind() {
            CurveKind::Closed => {
                let mut e_anom = if e > 0.8 { std::f64::consts::PI } else { mean_anomaly };
                for _ in 0..KEPLER_MAX_ITERATIONS {
                    let delta = (e_anom - e * e_anom.sin() - mean_anomaly) / (1.0 - e * e_anom.cos());
                    e_anom -= delta;
                    if delta.abs() < KEPLER_TOLERANCE {
                        break;
                    }
                }
                e_anom.rem_euclid(TAU)
            }
            CurveKind::Open => {
                let mut h_anom = (mean_anomaly / e).asinh();
                for _ in 0..KEPLER_MAX_ITERATIONS {
                    let delta = (e * h_anom.sinh() - h_anom - mean_anomaly) / (e * h_anom.cosh() - 1.0);
                    h_anom -= delta;
                    if delta.abs() < KEPLER_TOLERANCE {
                        break;
                    }
                }
                h_anom
            }
        }
    }

    /// Unit vectors toward periapsis (`p`) and 90° ahead of it (`q`).
    pub fn orbit_frame(&self) -> (DVec3, DVec3) {
        let (sin_o, cos_o) = self.longitude_ascending.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();
        let (sin_w, cos_w) = self.argument_periapsis.sin_cos();

        let p = DVec3::new(
            cos_o * cos_w - sin_o * sin_w * cos_i,
            sin_o * cos_w + cos_o * sin_w * cos_i,
            sin_w * sin_i,
        );
        let q = DVec3::new(
            -(cos_o * sin_w + sin_o * cos_w * cos_i),
            -(sin_o * sin_w - cos_o * cos_w * cos_i),
            cos_w * sin_i,
        );
        (p, q)
    }

    /// Position relative to the focus at an eccentric anomaly, using the
    /// given semi-minor axis.
    pub fn position_from_eccentric_anomaly(&self, eccentric_anomaly: f64, semi_minor_axis: f64) -> DVec3 {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let (x, y) = match self.kind() {
            CurveKind::Closed => (a * (eccentric_anomaly.cos() - e), semi_minor_axis * eccentric_anomaly.sin()),
            CurveKind::Open => (
                -a * (e - eccentric_anomaly.cosh()),
                -semi_minor_axis * eccentric_anomaly.sinh(),
            ),
        };
        let (p, q) = self.orbit_frame();
        p * x + q * y
    }

    /// Position relative to the focus at `time_seconds` after epoch.
    pub fn position_at_time(&self, time_seconds: f64) -> DVec3 {
        self.position_from_eccentric_anomaly(self.eccentric_anomaly_at(time_seconds), self.semi_minor_axis())
    }

    /// Freeze the orbit at `time_seconds` for sampling.
    pub fn at_time(&self, time_seconds: f64) -> OrbitSnapshot {
        OrbitSnapshot {
            orbit: *self,
            semi_minor_axis: self.semi_minor_axis(),
            eccentric_anomaly: self.eccentric_anomaly_at(time_seconds),
            focus: DVec3::ZERO,
        }
    }
}

/// A [`KeplerOrbit`] at one instant, positioned around a moving focus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSnapshot {
    /// Underlying elements.
    pub orbit: KeplerOrbit,
    /// Cached semi-minor axis.
    pub semi_minor_axis: f64,
    /// Anomaly of the orbiting object at this instant.
    pub eccentric_anomaly: f64,
    /// Position of the central body in local space.
    pub focus: DVec3,
}

impl OrbitSnapshot {
    /// Place the orbit around a central body at `focus`.
    pub fn around(self, focus: DVec3) -> Self {
        Self { focus, ..self }
    }

    /// Current position of the orbiting object.
    pub fn position(&self) -> DVec3 {
        self.position_at(self.eccentric_anomaly)
    }
}

impl ConicOrbit for OrbitSnapshot {
    fn eccentricity(&self) -> f64 {
        self.orbit.eccentricity
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    fn eccentric_anomaly(&self) -> f64 {
        self.eccentric_anomaly
    }

    fn position_at(&self, eccentric_anomaly: f64) -> DVec3 {
        self.focus
            + self
                .orbit
                .position_from_eccentric_anomaly(eccentric_anomaly, self.semi_minor_axis)
    }
}

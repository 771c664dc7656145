//! The conic-orbit seam between the sampler and an external orbit model.

use glam::DVec3;

/// One orbit frozen at a sampling instant.
///
/// Implemented by whatever owns the orbital mechanics. The sampler only
/// reads it.
pub trait ConicOrbit {
    /// Eccentricity, `>= 0`. Values `>= 1` are drawn as open conics.
    fn eccentricity(&self) -> f64;

    /// Semi-minor axis. Negative for hyperbolic orbits.
    fn semi_minor_axis(&self) -> f64;

    /// Eccentric anomaly of the orbiting object, in radians.
    fn eccentric_anomaly(&self) -> f64;

    /// Position in the orbit's local, unscaled frame at the given eccentric
    /// anomaly.
    fn position_at(&self, eccentric_anomaly: f64) -> DVec3;
}

/// A [`ConicOrbit`] backed by a plain position function.
///
/// Lets a host inject its orbit model as a closure without implementing the
/// trait on its own types.
pub struct FnConic<F> {
    /// Eccentricity of the conic.
    pub eccentricity: f64,
    /// Signed semi-minor axis.
    pub semi_minor_axis: f64,
    /// Seam anomaly.
    pub eccentric_anomaly: f64,
    position: F,
}

impl<F> FnConic<F>
where
    F: Fn(f64) -> DVec3,
{
    /// Wrap a position function.
    pub fn new(eccentricity: f64, semi_minor_axis: f64, eccentric_anomaly: f64, position: F) -> Self {
        Self {
            eccentricity,
            semi_minor_axis,
            eccentric_anomaly,
            position,
        }
    }
}

impl<F> ConicOrbit for FnConic<F>
where
    F: Fn(f64) -> DVec3,
{
    fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    fn eccentric_anomaly(&self) -> f64 {
        self.eccentric_anomaly
    }

    fn position_at(&self, eccentric_anomaly: f64) -> DVec3 {
        (self.position)(eccentric_anomaly)
    }
}

/// Which tessellation strategy a conic takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// `e < 1`: a full revolution closed back onto the seam.
    Closed,
    /// `e >= 1`: two arms from the seam, cut at the asymptotes.
    Open,
}

impl CurveKind {
    /// Classify an eccentricity. Parabolas fall on the open side.
    pub fn of(eccentricity: f64) -> Self {
        if eccentricity < 1.0 {
            CurveKind::Closed
        } else {
            CurveKind::Open
        }
    }
}

/// Half-width of the drawable eccentric-anomaly domain of an open conic.
///
/// Returns `None` when `acos(-1/e)` is undefined.
pub fn asymptote_bound(eccentricity: f64) -> Option<f64> {
    let bound = (-1.0 / eccentricity).acos();
    if bound.is_nan() { None } else { Some(bound) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parabola_is_open() {
        assert_eq!(CurveKind::of(0.0), CurveKind::Closed);
        assert_eq!(CurveKind::of(0.999_999), CurveKind::Closed);
        assert_eq!(CurveKind::of(1.0), CurveKind::Open);
        assert_eq!(CurveKind::of(3.0), CurveKind::Open);
    }

    #[test]
    fn test_asymptote_bound_values() {
        let parabola = asymptote_bound(1.0).unwrap();
        assert!((parabola - std::f64::consts::PI).abs() < 1e-12);

        let e2 = asymptote_bound(2.0).unwrap();
        assert!((e2 - 2.094_395).abs() < 1e-6);
    }

    #[test]
    fn test_asymptote_bound_rejects_out_of_domain() {
        assert!(asymptote_bound(0.5).is_none());
        assert!(asymptote_bound(f64::NAN).is_none());
    }

    #[test]
    fn test_fn_conic_forwards_to_closure() {
        let conic = FnConic::new(0.2, 3.0, 0.5, |e: f64| DVec3::new(e, 0.0, 0.0));
        assert_eq!(conic.eccentricity(), 0.2);
        assert_eq!(conic.semi_minor_axis(), 3.0);
        assert_eq!(conic.eccentric_anomaly(), 0.5);
        assert_eq!(conic.position_at(1.25), DVec3::new(1.25, 0.0, 0.0));
    }
}

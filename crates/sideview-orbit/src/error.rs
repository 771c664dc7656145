//! Orbit sampling error types.

/// Errors raised while building or sampling orbit curves.
///
/// Every variant except [`OrbitError::InvalidAngularStep`] is a broken
/// precondition on data handed over by the orbit model. They abort the orbit
/// pass instead of being skipped, so a corrupted curve is never drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// The angular resolution gives fewer than two sample points, or more
    /// than [`MAX_POINT_COUNT`](crate::sampler::MAX_POINT_COUNT).
    #[error("angular step of {0} degrees is outside the supported resolution")]
    InvalidAngularStep(f64),

    /// Eccentricity is negative or non-finite, or puts the asymptote bound
    /// outside the domain of `acos`.
    #[error("degenerate conic with eccentricity {eccentricity}")]
    DegenerateConic {
        /// The offending eccentricity.
        eccentricity: f64,
    },

    /// The seam anomaly is not a finite number.
    #[error("non-finite eccentric anomaly {0}")]
    NonFiniteAnomaly(f64),

    /// The seam anomaly of an open conic lies on or beyond its asymptotes.
    #[error("seam anomaly {anomaly} lies outside the drawable domain (-{boundary}, {boundary})")]
    SeamOutsideDomain {
        /// Eccentric anomaly of the orbiting object.
        anomaly: f64,
        /// Asymptotic bound `acos(-1/e)`.
        boundary: f64,
    },

    /// State vectors cannot be turned into a conic.
    #[error("invalid state vectors: {0}")]
    InvalidStateVectors(&'static str),
}

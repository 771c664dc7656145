//! A small Kerbin-centred system for headless runs.
//!
//! Stands in for the host's vessels and bodies: a moon, a few vessels on
//! closed and escape trajectories, and objects the observer does not track.

use glam::DVec3;
use sideview_camera::{MapTarget, MapTargetKind, TargetList};
use sideview_orbit::{
    DiscoveryLevels, KeplerOrbit, OrbitColor, OrbitEntry, OrbitError, OrbitSnapshot, ScaledSpace,
};

/// Gravitational parameter of Kerbin in m³/s².
pub const KERBIN_MU: f64 = 3.5316e12;
/// Kerbin sphere of influence in meters.
pub const KERBIN_SOI: f64 = 84_159_286.0;
/// Gravitational parameter of the Mun in m³/s².
pub const MUN_MU: f64 = 6.5138398e10;
/// Mun sphere of influence in meters.
pub const MUN_SOI: f64 = 2_429_559.1;

/// Periapsis of the escape stage in meters.
const ESCAPE_PERIAPSIS: f64 = 3_000_000.0;
/// Semi-major axis of the escape stage in meters.
const ESCAPE_SEMI_MAJOR_AXIS: f64 = -15_000_000.0;

struct Orbiter {
    name: &'static str,
    orbit: KeplerOrbit,
    parent: Option<usize>,
    discovery: Option<DiscoveryLevels>,
    color: OrbitColor,
    kind: MapTargetKind,
}

/// The demo system: Kerbin at the origin and everything orbiting it.
pub struct DemoSystem {
    orbiters: Vec<Orbiter>,
    active_vessel: usize,
}

/// The system frozen at one instant.
pub struct DemoFrame {
    /// Seconds since epoch.
    pub time: f64,
    /// One snapshot per orbiter, in local space around its parent.
    pub snapshots: Vec<OrbitSnapshot>,
    /// Map targets in scaled space. Kerbin is always first.
    pub targets: Vec<MapTarget>,
    /// Index of the active vessel in `targets`.
    pub active_vessel: Option<usize>,
    discovery: Vec<Option<DiscoveryLevels>>,
    colors: Vec<OrbitColor>,
}

impl DemoSystem {
    /// Build the system.
    pub fn new() -> Result<Self, OrbitError> {
        // Slow enough that the stage crosses Kerbin's sphere of influence
        // before its anomaly reaches the asymptote bound.
        let periapsis_speed =
            (KERBIN_MU * (2.0 / ESCAPE_PERIAPSIS - 1.0 / ESCAPE_SEMI_MAJOR_AXIS)).sqrt();
        let tilt: f64 = 0.1;
        let escape = KeplerOrbit::from_state_vectors(
            DVec3::new(0.0, ESCAPE_PERIAPSIS, 0.0),
            DVec3::new(-tilt.cos(), 0.0, tilt.sin()) * periapsis_speed,
            KERBIN_MU,
        )?;

        let orbiters = vec![
            Orbiter {
                name: "Mun",
                orbit: KeplerOrbit::circular(12_000_000.0, KERBIN_MU),
                parent: None,
                discovery: Some(DiscoveryLevels::OWNED),
                color: [0.6, 0.6, 0.6, 1.0],
                kind: MapTargetKind::Body {
                    sphere_of_influence: MUN_SOI,
                },
            },
            Orbiter {
                name: "Kerbal X",
                orbit: KeplerOrbit {
                    semi_major_axis: 1_500_000.0,
                    eccentricity: 0.3,
                    inclination: 0.1,
                    longitude_ascending: 0.4,
                    argument_periapsis: 1.2,
                    mean_anomaly_epoch: 0.0,
                    gravitational_parameter: KERBIN_MU,
                },
                parent: None,
                discovery: Some(DiscoveryLevels::OWNED),
                color: [0.2, 0.8, 1.0, 1.0],
                kind: MapTargetKind::Vessel {
                    semi_major_axis: 1_500_000.0,
                },
            },
            Orbiter {
                name: "Escape Stage",
                orbit: escape,
                parent: None,
                discovery: Some(DiscoveryLevels::OWNED),
                color: [1.0, 0.5, 0.1, 1.0],
                kind: MapTargetKind::Vessel {
                    semi_major_axis: escape.semi_major_axis,
                },
            },
            Orbiter {
                name: "Mun Lander",
                orbit: KeplerOrbit::circular(250_000.0, MUN_MU),
                parent: Some(0),
                discovery: Some(DiscoveryLevels::OWNED),
                color: [0.9, 0.9, 0.2, 1.0],
                kind: MapTargetKind::Vessel {
                    semi_major_axis: 250_000.0,
                },
            },
            Orbiter {
                name: "Unknown Object",
                orbit: KeplerOrbit {
                    semi_major_axis: 5_000_000.0,
                    eccentricity: 0.6,
                    mean_anomaly_epoch: 2.0,
                    ..KeplerOrbit::circular(5_000_000.0, KERBIN_MU)
                },
                parent: None,
                discovery: Some(DiscoveryLevels::PRESENCE),
                color: [0.5, 0.5, 0.5, 1.0],
                kind: MapTargetKind::Vessel {
                    semi_major_axis: 5_000_000.0,
                },
            },
            Orbiter {
                name: "Debris",
                orbit: KeplerOrbit::circular(900_000.0, KERBIN_MU),
                parent: None,
                discovery: None,
                color: [0.4, 0.4, 0.4, 1.0],
                kind: MapTargetKind::Vessel {
                    semi_major_axis: 900_000.0,
                },
            },
        ];

        Ok(Self {
            orbiters,
            active_vessel: 1,
        })
    }

    /// Freeze the system at `time` seconds after epoch.
    ///
    /// Orbiters farther from their parent than the parent's sphere of
    /// influence have left it: they lose their discovery info and are no
    /// longer targets.
    pub fn frame_at(&self, time: f64, space: &ScaledSpace) -> DemoFrame {
        let mut snapshots: Vec<OrbitSnapshot> = Vec::with_capacity(self.orbiters.len());
        let mut discovery = Vec::with_capacity(self.orbiters.len());
        let mut colors = Vec::with_capacity(self.orbiters.len());
        let mut targets = vec![MapTarget {
            name: "Kerbin".to_string(),
            position: space.local_to_scaled(DVec3::ZERO).as_dvec3(),
            kind: MapTargetKind::Body {
                sphere_of_influence: KERBIN_SOI,
            },
        }];
        let mut active_vessel = None;

        for (index, orbiter) in self.orbiters.iter().enumerate() {
            let focus = orbiter
                .parent
                .and_then(|parent| snapshots.get(parent))
                .map_or(DVec3::ZERO, OrbitSnapshot::position);
            let snapshot = orbiter.orbit.at_time(time).around(focus);

            let escaped = (snapshot.position() - focus).length() > self.parent_soi(orbiter);
            let known = if escaped { None } else { orbiter.discovery };

            if known.is_some() {
                if index == self.active_vessel {
                    active_vessel = Some(targets.len());
                }
                targets.push(MapTarget {
                    name: orbiter.name.to_string(),
                    position: space.local_to_scaled(snapshot.position()).as_dvec3(),
                    kind: orbiter.kind,
                });
            }

            snapshots.push(snapshot);
            discovery.push(known);
            colors.push(orbiter.color);
        }

        DemoFrame {
            time,
            snapshots,
            targets,
            active_vessel,
            discovery,
            colors,
        }
    }
}

impl DemoSystem {
    fn parent_soi(&self, orbiter: &Orbiter) -> f64 {
        match orbiter.parent.and_then(|parent| self.orbiters.get(parent)) {
            Some(Orbiter {
                kind: MapTargetKind::Body {
                    sphere_of_influence,
                },
                ..
            }) => *sphere_of_influence,
            _ => KERBIN_SOI,
        }
    }
}

impl DemoFrame {
    /// Orbit entries for the orbit pass.
    pub fn entries(&self) -> Vec<OrbitEntry<'_>> {
        self.snapshots
            .iter()
            .zip(&self.discovery)
            .zip(&self.colors)
            .map(|((snapshot, discovery), color)| OrbitEntry {
                conic: snapshot,
                discovery: *discovery,
                color: *color,
            })
            .collect()
    }

    /// Targets for the camera controller.
    pub fn target_list(&self) -> TargetList<'_> {
        TargetList {
            targets: &self.targets,
            active_vessel: self.active_vessel,
            home_body: Some(0),
        }
    }
}

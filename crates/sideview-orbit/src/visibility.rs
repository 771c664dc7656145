//! Which orbits are eligible for drawing.

use std::ops::BitOr;

/// Global orbit display mode, ordered from least to most permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OrbitDisplayMode {
    /// No orbit lines at all.
    #[default]
    None,
    /// Every known orbit, no patched conics.
    AllOrbits,
    /// Every known orbit plus patched-conic predictions.
    PatchedConics,
}

impl OrbitDisplayMode {
    /// Display mode unlocked by a tracking-station upgrade tier.
    ///
    /// Tier 0 shows nothing, tier 1 shows orbits, tier 2 and above add
    /// patched conics.
    pub fn for_tracking_station_tier(tier: u8) -> Self {
        match tier {
            0 => OrbitDisplayMode::None,
            1 => OrbitDisplayMode::AllOrbits,
            _ => OrbitDisplayMode::PatchedConics,
        }
    }

    /// Whether this mode draws orbit lines.
    pub fn shows_orbits(self) -> bool {
        self >= OrbitDisplayMode::AllOrbits
    }
}

/// What an observer knows about an object, as a set of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiscoveryLevels(u8);

impl DiscoveryLevels {
    /// Nothing known.
    pub const NONE: Self = Self(0);
    /// The object is known to exist.
    pub const PRESENCE: Self = Self(1 << 0);
    /// The object has a name.
    pub const NAME: Self = Self(1 << 2);
    /// Position and velocity are tracked.
    pub const STATE_VECTORS: Self = Self(1 << 3);
    /// Size and appearance are known.
    pub const APPEARANCE: Self = Self(1 << 4);
    /// Everything an owner knows.
    pub const OWNED: Self = Self(Self::PRESENCE.0 | Self::NAME.0 | Self::STATE_VECTORS.0 | Self::APPEARANCE.0);

    /// Raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, keeping unknown bits.
    pub const fn from_bits_retain(bits: u8) -> Self {
        Self(bits)
    }

    /// Whether every flag in `other` is also set here.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DiscoveryLevels {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether an orbit may be drawn this frame.
pub fn is_orbit_visible(mode: OrbitDisplayMode, discovery: DiscoveryLevels) -> bool {
    mode.shows_orbits() && discovery.contains(DiscoveryLevels::STATE_VECTORS)
}

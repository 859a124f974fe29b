use std::fmt::{self, Display};


/// an instantaneous power-supply measurement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reading {
    /// remaining charge, as a percentage of full.
    pub percent: Percent,
    /// whether the device is drawing from mains power.
    pub plugged: bool,
}

/// a charge percentage, clamped to `0..=100`.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Percent(u8);

/// a health tier derived from the charge percentage.
///
/// tiers partition `0..=100` with inclusive lower bounds: `0..20` is
/// critical, `20..50` is warning, `50..=100` is healthy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Tier {
    #[default]
    Healthy,
    Warning,
    Critical,
}

// === impl Reading ===

impl Reading {
    /// the label journaled and displayed for this reading's power source.
    pub fn source(&self) -> &'static str {
        if self.plugged { "Secteur" } else { "Batterie" }
    }
}

// === impl Percent ===

impl Percent {
    /// clamps the given value into `0..=100`.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// converts a state-of-charge ratio in `0.0..=1.0` into a percentage.
    ///
    /// out-of-range input saturates at the nearest bound; a non-finite
    /// ratio becomes zero.
    pub fn from_ratio(ratio: f32) -> Self {
        let scaled = (ratio * 100.0).round().clamp(0.0, 100.0);
        Self(scaled as u8)
    }

    pub fn get(self) -> u8 {
        let Self(value) = self;
        value
    }

    /// the tier this percentage falls into.
    pub fn tier(self) -> Tier {
        let Self(value) = self;
        match value {
            0..20 => Tier::Critical,
            20..50 => Tier::Warning,
            _ => Tier::Healthy,
        }
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(value) = self;
        write!(f, "{value}")
    }
}

//! Severity zones derived from blood pressure and pulse.

use core::fmt;
use core::str::FromStr;

/// Severity tier assigned to an entry.
///
/// Ordered by severity, so `Zone::Red > Zone::Green` and the worst of
/// several zones is simply their `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Zone {
    #[default]
    Green,
    Yellow,
    Orange,
    Red,
}

impl Zone {
    /// All zones from least to most severe.
    pub const ALL: [Zone; 4] = [Zone::Green, Zone::Yellow, Zone::Orange, Zone::Red];

    /// Lowercase identifier, as stored in serialized logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Green => "green",
            Zone::Yellow => "yellow",
            Zone::Orange => "orange",
            Zone::Red => "red",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Green => "Green zone",
            Zone::Yellow => "Yellow zone",
            Zone::Orange => "Orange zone",
            Zone::Red => "Red zone",
        }
    }

    /// Colored circle used in tables and exports.
    pub fn emoji(&self) -> &'static str {
        match self {
            Zone::Green => "🟢",
            Zone::Yellow => "🟡",
            Zone::Orange => "🟠",
            Zone::Red => "🔴",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown zone name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseZoneError(String);

impl fmt::Display for ParseZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown zone: {}", self.0)
    }
}

impl std::error::Error for ParseZoneError {}

impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Zone::Green),
            "yellow" => Ok(Zone::Yellow),
            "orange" => Ok(Zone::Orange),
            "red" => Ok(Zone::Red),
            other => Err(ParseZoneError(other.to_string())),
        }
    }
}

/// Lower-inclusive entry bounds for a single tier.
///
/// A reading enters the tier when *any* one of the three vitals reaches
/// its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneBounds {
    pub systolic: u16,
    pub diastolic: u16,
    pub pulse: u16,
}

impl ZoneBounds {
    pub const fn new(systolic: u16, diastolic: u16, pulse: u16) -> Self {
        Self {
            systolic,
            diastolic,
            pulse,
        }
    }

    /// True if any metric is at or above its bound.
    pub fn reached_by(&self, systolic: u16, diastolic: u16, pulse: u16) -> bool {
        systolic >= self.systolic || diastolic >= self.diastolic || pulse >= self.pulse
    }
}

/// Threshold table for the three non-green tiers.
///
/// Green has no bounds; it is whatever falls below yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneThresholds {
    pub yellow: ZoneBounds,
    pub orange: ZoneBounds,
    pub red: ZoneBounds,
}

impl ZoneThresholds {
    /// The standard table.
    pub const STANDARD: ZoneThresholds = ZoneThresholds {
        yellow: ZoneBounds::new(141, 91, 86),
        orange: ZoneBounds::new(151, 101, 101),
        red: ZoneBounds::new(171, 106, 131),
    };

    /// Classify a reading against this table.
    ///
    /// Tiers are checked from most to least severe and the first tier
    /// reached by any metric wins. Total over all inputs.
    pub fn classify(&self, systolic: u16, diastolic: u16, pulse: u16) -> Zone {
        if self.red.reached_by(systolic, diastolic, pulse) {
            Zone::Red
        } else if self.orange.reached_by(systolic, diastolic, pulse) {
            Zone::Orange
        } else if self.yellow.reached_by(systolic, diastolic, pulse) {
            Zone::Yellow
        } else {
            Zone::Green
        }
    }
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Classify a reading against the standard thresholds.
pub fn classify(systolic: u16, diastolic: u16, pulse: u16) -> Zone {
    ZoneThresholds::STANDARD.classify(systolic, diastolic, pulse)
}

//! Unit handling
//!
//! Tracks the unit mode a program declares (G20/G21) and converts feed rates
//! between the operator's units and the program's units.

use serde::{Deserialize, Serialize};
use std::fmt;

const MM_PER_INCH: f64 = 25.4;

/// Unit mode declared by a program through G20/G21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    /// G20, inches
    Inch,
    /// G21, millimetres
    Millimetre,
}

impl UnitMode {
    /// Map a G-code number to a unit mode (20 or 21)
    pub fn from_gcode(code: u32) -> Option<Self> {
        match code {
            20 => Some(Self::Inch),
            21 => Some(Self::Millimetre),
            _ => None,
        }
    }

    /// The command that selects this mode, e.g. `G21`
    pub fn command(self) -> &'static str {
        match self {
            Self::Inch => "G20",
            Self::Millimetre => "G21",
        }
    }

    /// Lowercase name, matching the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Millimetre => "millimetre",
        }
    }
}

/// Side-channel label for an optional unit mode (`none`, `inch`, `millimetre`)
pub fn unit_label(mode: Option<UnitMode>) -> &'static str {
    mode.map_or("none", UnitMode::label)
}

/// Feed rate units selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedRateUnits {
    /// Millimeters per minute
    MmPerMin,
    /// Millimeters per second
    MmPerSec,
    /// Inches per minute
    InPerMin,
    /// Inches per second
    InPerSec,
}

impl Default for FeedRateUnits {
    fn default() -> Self {
        Self::InPerMin
    }
}

impl FeedRateUnits {
    /// Express `value` (in these units) as mm/min
    pub fn to_mm_per_min(self, value: f64) -> f64 {
        match self {
            Self::MmPerMin => value,
            Self::MmPerSec => value * 60.0,
            Self::InPerMin => value * MM_PER_INCH,
            Self::InPerSec => value * MM_PER_INCH * 60.0,
        }
    }
}

impl fmt::Display for FeedRateUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MmPerMin => write!(f, "mm/min"),
            Self::MmPerSec => write!(f, "mm/sec"),
            Self::InPerMin => write!(f, "in/min"),
            Self::InPerSec => write!(f, "in/sec"),
        }
    }
}

/// Convert a feed rate into the per-minute units of the program.
///
/// A program without a unit declaration gets the value unconverted, since
/// there is nothing to convert it to.
pub fn convert_feed_rate(value: f64, units: FeedRateUnits, program: Option<UnitMode>) -> f64 {
    match program {
        None => value,
        Some(UnitMode::Millimetre) => units.to_mm_per_min(value),
        Some(UnitMode::Inch) => units.to_mm_per_min(value) / MM_PER_INCH,
    }
}

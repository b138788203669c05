//! AQI health categories
//!
//! Breakpoints follow the US EPA scale that the WAQI feed reports in:
//! each bound is an inclusive upper limit and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health category derived from an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    /// Unhealthy for sensitive groups
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    /// No value, or a value that is not a number
    NoData,
}

/// Upper bounds, ascending. Anything above the last one is hazardous.
const BREAKPOINTS: [(f64, AqiCategory); 5] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (150.0, AqiCategory::UnhealthySensitive),
    (200.0, AqiCategory::Unhealthy),
    (300.0, AqiCategory::VeryUnhealthy),
];

/// Map an AQI value to its health category.
///
/// Total over every input: `None` and NaN are [`AqiCategory::NoData`],
/// negative values are `Good` and anything above 300 is `Hazardous`.
/// Values are neither rounded nor clamped.
#[must_use]
pub fn classify(aqi: Option<f64>) -> AqiCategory {
    let Some(value) = aqi.filter(|v| !v.is_nan()) else {
        return AqiCategory::NoData;
    };

    BREAKPOINTS
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map_or(AqiCategory::Hazardous, |(_, category)| *category)
}

impl AqiCategory {
    /// All categories, least to most severe, with `NoData` first
    pub const ALL: [AqiCategory; 7] = [
        AqiCategory::NoData,
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy (SG)",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
            AqiCategory::NoData => "No data",
        }
    }

    /// Severity tier, 0 for no data up to 6 for hazardous
    #[must_use]
    pub fn severity_rank(self) -> u8 {
        match self {
            AqiCategory::NoData => 0,
            AqiCategory::Good => 1,
            AqiCategory::Moderate => 2,
            AqiCategory::UnhealthySensitive => 3,
            AqiCategory::Unhealthy => 4,
            AqiCategory::VeryUnhealthy => 5,
            AqiCategory::Hazardous => 6,
        }
    }

    /// Palette name used when rendering this category
    #[must_use]
    pub fn style_token(self) -> &'static str {
        match self {
            AqiCategory::Good => "emerald",
            AqiCategory::Moderate => "yellow",
            AqiCategory::UnhealthySensitive => "orange",
            AqiCategory::Unhealthy => "red",
            AqiCategory::VeryUnhealthy => "fuchsia",
            AqiCategory::Hazardous => "rose",
            AqiCategory::NoData => "zinc",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

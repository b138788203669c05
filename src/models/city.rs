//! Cities offered by the dashboard

use crate::AqPulseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A city on the dashboard's allow-list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[default]
    Delhi,
    Mumbai,
    Bengaluru,
    Chennai,
    Hyderabad,
    Kolkata,
    Pune,
    Ahmedabad,
    Jaipur,
    Lucknow,
    Chandigarh,
    Patna,
}

impl City {
    /// Every supported city, in selector order
    pub const ALL: [City; 12] = [
        City::Delhi,
        City::Mumbai,
        City::Bengaluru,
        City::Chennai,
        City::Hyderabad,
        City::Kolkata,
        City::Pune,
        City::Ahmedabad,
        City::Jaipur,
        City::Lucknow,
        City::Chandigarh,
        City::Patna,
    ];

    /// Name as sent to the feed endpoint
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Bengaluru => "Bengaluru",
            City::Chennai => "Chennai",
            City::Hyderabad => "Hyderabad",
            City::Kolkata => "Kolkata",
            City::Pune => "Pune",
            City::Ahmedabad => "Ahmedabad",
            City::Jaipur => "Jaipur",
            City::Lucknow => "Lucknow",
            City::Chandigarh => "Chandigarh",
            City::Patna => "Patna",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = AqPulseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(input))
            .ok_or_else(|| {
                AqPulseError::validation(format!(
                    "Unknown city '{input}'. Must be one of: {}",
                    City::ALL.map(City::name).join(", ")
                ))
            })
    }
}

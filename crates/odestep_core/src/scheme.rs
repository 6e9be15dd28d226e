//! The closed set of integration schemes and their names.

use crate::error::OdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Explicit single-step scheme used by the steppers.
///
/// There is no "unknown" variant: an unrecognised name is rejected when it is
/// parsed, so a stepper can never be handed an invalid scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Forward Euler, one stage, first order.
    Euler,
    /// Heun (improved Euler / RK2), two stages, second order.
    #[default]
    Heun,
    /// Classical Runge-Kutta, four stages, fourth order.
    Rk4,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Euler, Scheme::Heun, Scheme::Rk4];

    /// Case-insensitive lookup. `None` stands for an unrecognised name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(name))
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Euler => "Euler",
            Scheme::Heun => "Heun",
            Scheme::Rk4 => "RK4",
        }
    }

    /// Position in the numbering Euler = 0, Heun = 1, RK4 = 2.
    pub fn index(self) -> usize {
        match self {
            Scheme::Euler => 0,
            Scheme::Heun => 1,
            Scheme::Rk4 => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Vector field evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            Scheme::Euler => 1,
            Scheme::Heun => 2,
            Scheme::Rk4 => 4,
        }
    }

    /// Global order of accuracy.
    pub fn order(self) -> u32 {
        match self {
            Scheme::Euler => 1,
            Scheme::Heun => 2,
            Scheme::Rk4 => 4,
        }
    }
}

/// Inverse of the index numbering; `None` for out-of-range input.
pub fn scheme_name(index: usize) -> Option<&'static str> {
    Scheme::from_index(index).map(Scheme::name)
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = OdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| OdeError::UnknownScheme(s.to_string()))
    }
}

impl Serialize for Scheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

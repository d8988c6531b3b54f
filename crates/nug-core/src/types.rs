//! Projectile, channel and isotope identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NugError};

/// Incident particle of the measured reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Projectile {
    /// Incident neutrons.
    #[serde(rename = "n")]
    Neutron,
    /// Incident protons.
    #[serde(rename = "p")]
    Proton,
}

impl Projectile {
    /// Short symbol used in data keys and file names.
    pub fn symbol(&self) -> &'static str {
        match self {
            Projectile::Neutron => "n",
            Projectile::Proton => "p",
        }
    }
}

impl fmt::Display for Projectile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Projectile {
    type Err = NugError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "n" | "neutron" | "neutrons" => Ok(Projectile::Neutron),
            "p" | "proton" | "protons" => Ok(Projectile::Proton),
            other => Err(NugError::Configuration(
                ErrorInfo::new("unknown-projectile", format!("unknown projectile '{other}'"))
                    .with_hint("expected 'n' or 'p'"),
            )),
        }
    }
}

/// Reaction channel identified by its MT-equivalent code and symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Channel {
    /// MT-equivalent reaction code (e.g. 1 for the total cross section).
    pub code: u32,
    /// Symbolic reaction name (e.g. `N,TOT`).
    pub name: String,
}

impl Channel {
    /// Creates a channel from its code and name.
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) [MT = {}]", self.name, self.code)
    }
}

/// One catalog row: an isotope to be graded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsotopeId {
    /// Proton number.
    pub z: u32,
    /// Mass number.
    pub a: u32,
    /// Element symbol (e.g. `Li`).
    pub symbol: String,
}

impl IsotopeId {
    /// Creates a catalog entry.
    pub fn new(z: u32, a: u32, symbol: impl Into<String>) -> Self {
        Self {
            z,
            a,
            symbol: symbol.into(),
        }
    }

    /// Neutron number `A - Z`.
    pub fn neutron_number(&self) -> u32 {
        self.a.saturating_sub(self.z)
    }

    /// Display label in `<A><Symbol>` form, e.g. `7Li`.
    pub fn label(&self) -> String {
        format!("{}{}", self.a, self.symbol)
    }
}

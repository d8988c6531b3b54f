//! Immutable per-pass grading configuration.
//!
//! A [`GradingOptions`] value is constructed (and validated) once per grading
//! pass and handed to every component by shared reference. Nothing in the
//! engine mutates it, so a pass can never observe fields left over from an
//! earlier one.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NugError};
use crate::hash::stable_hash_string;
use crate::types::{Channel, Projectile};

fn unknown_name(kind: &str, value: &str, expected: &[&str]) -> NugError {
    NugError::Configuration(
        ErrorInfo::new(
            format!("unknown-{kind}"),
            format!("unknown {kind} '{value}'"),
        )
        .with_hint(format!("expected one of: {}", expected.join(", "))),
    )
}

/// Axis on which energy coverage is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageScale {
    /// Coverage on the raw energy axis.
    #[default]
    Linear,
    /// Coverage on the base-10 logarithm of energy.
    Log,
}

impl CoverageScale {
    const NAMES: [&'static str; 2] = ["linear", "log"];

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageScale::Linear => "linear",
            CoverageScale::Log => "log",
        }
    }
}

impl FromStr for CoverageScale {
    type Err = NugError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(CoverageScale::Linear),
            "log" | "log10" => Ok(CoverageScale::Log),
            other => Err(unknown_name("coverage-scale", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for CoverageScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrepancy metric scored against the reference evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScoredMetric {
    /// Squared deviation normalised by the reported uncertainty.
    #[default]
    #[serde(alias = "chi_squared")]
    ChiSquared,
    /// Percentage deviation from the reference curve.
    #[serde(alias = "relative_error")]
    RelativeError,
}

impl ScoredMetric {
    const NAMES: [&'static str; 2] = ["chi-squared", "relative-error"];

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoredMetric::ChiSquared => "chi-squared",
            ScoredMetric::RelativeError => "relative-error",
        }
    }

    /// Human readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ScoredMetric::ChiSquared => "Average Chi-Squared",
            ScoredMetric::RelativeError => "Average Absolute Relative Error (%)",
        }
    }
}

impl FromStr for ScoredMetric {
    type Err = NugError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "chi-squared" => Ok(ScoredMetric::ChiSquared),
            "relative-error" => Ok(ScoredMetric::RelativeError),
            other => Err(unknown_name("scored-metric", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for ScoredMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named neutron flux spectrum used to weight per-point discrepancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeightingSpectrum {
    /// Constant flux, every point weighs one.
    #[default]
    #[serde(rename = "none", alias = "constant")]
    Constant,
    /// Maxwell-Boltzmann spectrum at room temperature (293.61 K).
    #[serde(rename = "maxwell-boltzmann-room-temp")]
    MaxwellBoltzmannRoomTemp,
    /// Maxwell-Boltzmann spectrum at 320 C (593 K).
    #[serde(rename = "maxwell-boltzmann-320c", alias = "maxwell-boltzmann-320C")]
    MaxwellBoltzmann320C,
    /// Watt fission spectrum.
    #[serde(rename = "watt")]
    Watt,
}

impl WeightingSpectrum {
    const NAMES: [&'static str; 4] = [
        "none",
        "maxwell-boltzmann-room-temp",
        "maxwell-boltzmann-320c",
        "watt",
    ];

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightingSpectrum::Constant => "none",
            WeightingSpectrum::MaxwellBoltzmannRoomTemp => "maxwell-boltzmann-room-temp",
            WeightingSpectrum::MaxwellBoltzmann320C => "maxwell-boltzmann-320c",
            WeightingSpectrum::Watt => "watt",
        }
    }
}

impl FromStr for WeightingSpectrum {
    type Err = NugError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "constant" => Ok(WeightingSpectrum::Constant),
            "maxwell-boltzmann-room-temp" => Ok(WeightingSpectrum::MaxwellBoltzmannRoomTemp),
            "maxwell-boltzmann-320c" => Ok(WeightingSpectrum::MaxwellBoltzmann320C),
            "watt" => Ok(WeightingSpectrum::Watt),
            other => Err(unknown_name("weighting-spectrum", other, &Self::NAMES)),
        }
    }
}

impl fmt::Display for WeightingSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one grading pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradingOptions {
    /// Incident particle whose measurements are graded.
    pub projectile: Projectile,
    /// Lower energy bound (eV) of the graded window.
    pub lower_energy: f64,
    /// Upper energy bound (eV) of the graded window.
    pub upper_energy: f64,
    /// Reach width associated with each measurement for coverage.
    pub energy_width: f64,
    /// Axis on which coverage is measured.
    #[serde(default)]
    pub coverage_scale: CoverageScale,
    /// Reference evaluation (library) identifier, e.g. `endf8`.
    pub evaluation: String,
    /// Discrepancy metric that feeds the score.
    #[serde(default)]
    pub scored_metric: ScoredMetric,
    /// Flux spectrum used to weight discrepancies.
    #[serde(default)]
    pub weighting_spectrum: WeightingSpectrum,
    /// Reaction channels graded for every isotope, in report order.
    pub required_channels: Vec<Channel>,
}

impl Default for GradingOptions {
    fn default() -> Self {
        Self::neutrons()
    }
}

impl GradingOptions {
    /// Default settings for incident-neutron grading.
    pub fn neutrons() -> Self {
        Self {
            projectile: Projectile::Neutron,
            lower_energy: 1.0e-8,
            upper_energy: 5.0e6,
            energy_width: 0.01,
            coverage_scale: CoverageScale::Linear,
            evaluation: "endf8".to_string(),
            scored_metric: ScoredMetric::ChiSquared,
            weighting_spectrum: WeightingSpectrum::Constant,
            required_channels: vec![Channel::new(1, "N,TOT")],
        }
    }

    /// Default settings for incident-proton grading.
    pub fn protons() -> Self {
        Self {
            projectile: Projectile::Proton,
            lower_energy: 0.01,
            upper_energy: 5.0e6,
            energy_width: 0.01,
            coverage_scale: CoverageScale::Linear,
            evaluation: "endf8".to_string(),
            scored_metric: ScoredMetric::ChiSquared,
            weighting_spectrum: WeightingSpectrum::Constant,
            required_channels: vec![Channel::new(2, "P,EL"), Channel::new(3, "P,INL")],
        }
    }

    /// Returns a copy restricted to the given energy window.
    pub fn with_bounds(mut self, lower_energy: f64, upper_energy: f64) -> Self {
        self.lower_energy = lower_energy;
        self.upper_energy = upper_energy;
        self
    }

    /// Returns a copy with a different coverage reach width.
    pub fn with_energy_width(mut self, energy_width: f64) -> Self {
        self.energy_width = energy_width;
        self
    }

    /// Returns a copy measuring coverage on the given axis.
    pub fn with_coverage_scale(mut self, scale: CoverageScale) -> Self {
        self.coverage_scale = scale;
        self
    }

    /// Returns a copy graded against another evaluation.
    pub fn with_evaluation(mut self, evaluation: impl Into<String>) -> Self {
        self.evaluation = evaluation.into();
        self
    }

    /// Returns a copy scoring the given metric.
    pub fn with_scored_metric(mut self, metric: ScoredMetric) -> Self {
        self.scored_metric = metric;
        self
    }

    /// Returns a copy weighting discrepancies with the given spectrum.
    pub fn with_weighting_spectrum(mut self, spectrum: WeightingSpectrum) -> Self {
        self.weighting_spectrum = spectrum;
        self
    }

    /// Returns a copy grading the given channels.
    pub fn with_required_channels(mut self, channels: Vec<Channel>) -> Self {
        self.required_channels = channels;
        self
    }

    /// Checks the invariants every downstream component relies on.
    pub fn validate(&self) -> Result<(), NugError> {
        if !self.lower_energy.is_finite() || !self.upper_energy.is_finite() {
            return Err(NugError::Configuration(
                ErrorInfo::new("non-finite-bounds", "energy bounds must be finite")
                    .with_context("lower_energy", self.lower_energy.to_string())
                    .with_context("upper_energy", self.upper_energy.to_string()),
            ));
        }
        if self.lower_energy >= self.upper_energy {
            return Err(NugError::Configuration(
                ErrorInfo::new(
                    "malformed-bounds",
                    "lower energy must be strictly below upper energy",
                )
                .with_context("lower_energy", self.lower_energy.to_string())
                .with_context("upper_energy", self.upper_energy.to_string()),
            ));
        }
        if !(self.energy_width.is_finite() && self.energy_width > 0.0) {
            return Err(NugError::Configuration(
                ErrorInfo::new("invalid-energy-width", "energy width must be positive")
                    .with_context("energy_width", self.energy_width.to_string()),
            ));
        }
        if self.coverage_scale == CoverageScale::Log && self.lower_energy <= 0.0 {
            return Err(NugError::Configuration(
                ErrorInfo::new(
                    "log-scale-bounds",
                    "log coverage requires a positive lower energy",
                )
                .with_context("lower_energy", self.lower_energy.to_string()),
            ));
        }
        if self.evaluation.trim().is_empty() {
            return Err(NugError::configuration(
                "missing-evaluation",
                "an evaluation identifier is required",
            ));
        }
        let mut names = BTreeSet::new();
        for channel in &self.required_channels {
            if !names.insert(channel.name.as_str()) {
                return Err(NugError::Configuration(
                    ErrorInfo::new("duplicate-channel", "required channels must be unique")
                        .with_context("channel", channel.name.clone()),
                ));
            }
        }
        Ok(())
    }

    /// Parses and validates options from YAML bytes.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, NugError> {
        let options: GradingOptions = serde_yaml::from_slice(data).map_err(|err| {
            NugError::Configuration(
                ErrorInfo::new("options-parse", "failed to parse grading options")
                    .with_hint(err.to_string()),
            )
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Stable content hash identifying these options in scoreboards.
    pub fn options_hash(&self) -> Result<String, NugError> {
        stable_hash_string(self)
    }

    /// Looks up a required channel by name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.required_channels
            .iter()
            .find(|channel| channel.name == name)
    }
}

/// Loads and validates grading options from a YAML file.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<GradingOptions, NugError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        NugError::Configuration(
            ErrorInfo::new("options-read", "failed to read grading options")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    GradingOptions::from_yaml_slice(&bytes)
}

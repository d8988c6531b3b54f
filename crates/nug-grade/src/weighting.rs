//! Flux spectra used to weight per-point discrepancies.

use std::f64::consts::PI;

use nug_core::WeightingSpectrum;

/// Boltzmann constant (eV/K).
pub const BOLTZMANN_EV_PER_K: f64 = 8.6173033e-5;
/// Nucleon mass (kg).
pub const NUCLEON_MASS_KG: f64 = 1.674e-27;
/// Room temperature (K) of the room-temperature Maxwellian.
pub const ROOM_TEMPERATURE_K: f64 = 293.61;
/// Temperature (K) of the 320 C Maxwellian.
pub const TEMPERATURE_320C_K: f64 = 593.0;
/// Normalisation energy (eV) of the Watt spectrum.
pub const WATT_REFERENCE_ENERGY_EV: f64 = 7.23803e5;

const WATT_A: f64 = 0.453;
const WATT_B: f64 = 1.036;
const WATT_C: f64 = 2.29;

/// Flat spectrum.
pub fn constant_flux(_energy: f64) -> f64 {
    1.0
}

/// Maxwell-Boltzmann flux at temperature `kt` (eV).
pub fn maxwell_boltzmann(energy: f64, kt: f64) -> f64 {
    let energy = energy.max(0.0);
    (2.0 * energy / NUCLEON_MASS_KG).sqrt() * (2.0 * PI * energy.sqrt()) / (PI * kt).powf(1.5)
        * (-energy / kt).exp()
}

/// Watt fission spectrum.
pub fn watt(energy: f64) -> f64 {
    let mev = energy.max(0.0) / 1.0e6;
    WATT_A * (-WATT_B * mev).exp() * (WATT_C * mev).sqrt().sinh()
}

/// An energy-dependent weight normalised at a fixed reference energy.
pub trait FluxWeighting {
    /// Non-negative flux at `energy` (eV).
    fn weight(&self, energy: f64) -> f64;

    /// Energy (eV) at which the spectrum is normalised.
    fn reference_energy(&self) -> f64;

    /// Flux at the reference energy.
    fn normalization_value(&self) -> f64 {
        self.weight(self.reference_energy())
    }

    /// Dimensionless multiplier applied to a discrepancy at `energy`.
    fn relative_weight(&self, energy: f64) -> f64 {
        self.weight(energy) / self.normalization_value()
    }
}

impl FluxWeighting for WeightingSpectrum {
    fn weight(&self, energy: f64) -> f64 {
        match self {
            WeightingSpectrum::Constant => constant_flux(energy),
            WeightingSpectrum::MaxwellBoltzmannRoomTemp => {
                maxwell_boltzmann(energy, BOLTZMANN_EV_PER_K * ROOM_TEMPERATURE_K)
            }
            WeightingSpectrum::MaxwellBoltzmann320C => {
                maxwell_boltzmann(energy, BOLTZMANN_EV_PER_K * TEMPERATURE_320C_K)
            }
            WeightingSpectrum::Watt => watt(energy),
        }
    }

    fn reference_energy(&self) -> f64 {
        match self {
            WeightingSpectrum::Constant => 1.0,
            WeightingSpectrum::MaxwellBoltzmannRoomTemp => BOLTZMANN_EV_PER_K * ROOM_TEMPERATURE_K,
            WeightingSpectrum::MaxwellBoltzmann320C => BOLTZMANN_EV_PER_K * TEMPERATURE_320C_K,
            WeightingSpectrum::Watt => WATT_REFERENCE_ENERGY_EV,
        }
    }
}

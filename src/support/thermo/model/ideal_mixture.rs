//! Ideal-gas mixture with constant constituent heat capacities.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R·T`, with `R = Ru / M_mix`
//! - Calorically perfect constituents: each `cpᵢ` is constant
//! - Mixture `cp` is the mass-fraction weighted sum of constituent `cpᵢ`
//!
//! # Reference State
//!
//! Enthalpy is reported relative to a reference temperature, `h = cp·(T − T_ref)`.
//! Because mixture `cp` depends on composition, enthalpies are only comparable
//! between states with the same composition.

use std::convert::Infallible;

use uom::si::{
    f64::{
        MassDensity, MolarHeatCapacity, Pressure, SpecificHeatCapacity, TemperatureInterval,
        ThermodynamicTemperature,
    },
    molar_heat_capacity::joule_per_kelvin_mole,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval, thermodynamic_temperature,
};

use crate::support::{
    thermo::{
        Mixture, PropertyError, State,
        capability::{HasCp, HasEnthalpy, HasPressure, StateFrom, ThermoModel},
    },
    units::{SpecificEnthalpy, SpecificGasConstant, TemperatureDifference},
};

/// Universal gas constant, J/(mol·K).
const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;

/// Ideal-gas mixture property model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealMixture {
    t_ref: ThermodynamicTemperature,
}

impl Default for IdealMixture {
    fn default() -> Self {
        Self {
            t_ref: ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(0.0),
        }
    }
}

impl IdealMixture {
    /// Creates a model with the given enthalpy reference temperature.
    #[must_use]
    pub fn with_reference(t_ref: ThermodynamicTemperature) -> Self {
        Self { t_ref }
    }

    fn gas_constant(mixture: &Mixture) -> SpecificGasConstant {
        MolarHeatCapacity::new::<joule_per_kelvin_mole>(UNIVERSAL_GAS_CONSTANT)
            / mixture.molar_mass()
    }

    fn mixture_cp(mixture: &Mixture) -> SpecificHeatCapacity {
        let cp: f64 = mixture
            .constituents()
            .iter()
            .zip(mixture.mass_fractions())
            .map(|(c, w)| w * c.cp.get::<joule_per_kilogram_kelvin>())
            .sum();
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp)
    }

    fn density(
        mixture: &Mixture,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> MassDensity {
        pressure / (Self::gas_constant(mixture) * temperature)
    }
}

impl ThermoModel for IdealMixture {
    type Fluid = Mixture;
}

impl HasPressure for IdealMixture {
    /// Computes pressure with `p = ρ·R·T`.
    fn pressure(&self, state: &State<Mixture>) -> Result<Pressure, PropertyError> {
        Ok(state.density * Self::gas_constant(&state.fluid) * state.temperature)
    }
}

impl HasEnthalpy for IdealMixture {
    /// Computes enthalpy with `h = cp·(T − T_ref)`.
    fn enthalpy(&self, state: &State<Mixture>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(Self::mixture_cp(&state.fluid) * state.temperature.minus(self.t_ref))
    }
}

impl HasCp for IdealMixture {
    fn cp(&self, state: &State<Mixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(Self::mixture_cp(&state.fluid))
    }
}

impl StateFrom<(Mixture, ThermodynamicTemperature, Pressure)> for IdealMixture {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Mixture, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Mixture>, Self::Error> {
        let density = Self::density(&fluid, temperature, pressure);
        Ok(State::new(temperature, density, fluid))
    }
}

impl StateFrom<(Mixture, Pressure, SpecificEnthalpy)> for IdealMixture {
    type Error = PropertyError;

    /// Inverts `h = cp·(T − T_ref)` for temperature at fixed composition.
    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (Mixture, Pressure, SpecificEnthalpy),
    ) -> Result<State<Mixture>, Self::Error> {
        let delta_t: TemperatureInterval = enthalpy / Self::mixture_cp(&fluid);
        let kelvin = self.t_ref.get::<thermodynamic_temperature::kelvin>()
            + delta_t.get::<temperature_interval::kelvin>();

        if !kelvin.is_finite() || kelvin <= 0.0 {
            return Err(PropertyError::OutOfDomain {
                context: format!("enthalpy {enthalpy:?} maps to {kelvin} K"),
            });
        }

        let temperature =
            ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(kelvin);
        let density = Self::density(&fluid, temperature, pressure);
        Ok(State::new(temperature, density, fluid))
    }
}

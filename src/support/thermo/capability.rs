//! Capability traits used to query and construct thermodynamic states.
//!
//! A property model implements only the capabilities it supports. Consumers
//! such as the reactor state their requirements as trait bounds.

use uom::si::f64::{Pressure, SpecificHeatCapacity};

use crate::support::{
    thermo::{PropertyError, State},
    units::SpecificEnthalpy,
};

/// Base trait naming the fluid type a property model works with.
pub trait ThermoModel {
    type Fluid;
}

pub trait HasPressure: ThermoModel {
    /// Returns the pressure for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the pressure cannot be calculated.
    fn pressure(&self, state: &State<Self::Fluid>) -> Result<Pressure, PropertyError>;
}

pub trait HasEnthalpy: ThermoModel {
    /// Returns the specific enthalpy for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the enthalpy cannot be calculated.
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError>;
}

pub trait HasCp: ThermoModel {
    /// Returns the specific heat capacity at constant pressure for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cp` cannot be calculated.
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;
}

/// Capability for constructing a [`State`] from a typed input.
///
/// Inputs are ordinary Rust tuples such as
/// `(Fluid, ThermodynamicTemperature, Pressure)` or
/// `(Fluid, Pressure, SpecificEnthalpy)`. The latter is the enthalpy
/// inversion the reactor uses to fold reaction heat into the stream.
/// If a model does not implement `StateFrom<Input>`, that input is simply
/// not supported.
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a thermodynamic state from the provided input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from `input`.
    fn state_from(&self, input: Input) -> Result<State<Self::Fluid>, Self::Error>;
}

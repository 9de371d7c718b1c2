//! Internal traits for reactor stepping.

use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::support::{
    thermo::{
        Mixture,
        capability::{HasCp, HasEnthalpy, HasPressure, StateFrom, ThermoModel},
    },
    units::SpecificEnthalpy,
};

/// Required thermo model bounds for a reactor's working fluid.
///
/// Enthalpy inversion folds reaction and wall heat into the stream, and the
/// temperature-pressure constructor builds the reactants and products states.
#[doc(hidden)]
pub trait ReactorThermoModel:
    ThermoModel<Fluid = Mixture>
    + HasPressure
    + HasEnthalpy
    + HasCp
    + StateFrom<(Mixture, ThermodynamicTemperature, Pressure)>
    + StateFrom<(Mixture, Pressure, SpecificEnthalpy)>
{
}

impl<T> ReactorThermoModel for T where
    T: ThermoModel<Fluid = Mixture>
        + HasPressure
        + HasEnthalpy
        + HasCp
        + StateFrom<(Mixture, ThermodynamicTemperature, Pressure)>
        + StateFrom<(Mixture, Pressure, SpecificEnthalpy)>
{
}

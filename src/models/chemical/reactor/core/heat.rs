//! Folding reaction heat and wall convection into the conductive stream.

use thiserror::Error;
use tracing::warn;
use uom::{
    ConstZero,
    si::{
        f64::{Energy, MassRate, Power, ThermalConductance, ThermodynamicTemperature, Time},
        thermal_conductance::watt_per_kelvin,
    },
};

use crate::support::{
    thermo::{Mixture, State},
    units::{SpecificEnthalpy, TemperatureDifference},
};

use super::ReactorThermoModel;

/// Outlet state of the conductive stream after heat integration.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Heated {
    pub outlet: State<Mixture>,

    /// Heat leaving the fluid to the wall; negative when the wall heats the fluid.
    pub wall_heat_flux: Power,
}

/// A property-service failure during heat integration.
#[derive(Debug, Error)]
#[error("thermodynamic model failed: {context}")]
struct ThermoFailed {
    context: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl ThermoFailed {
    fn new(context: &'static str, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            context,
            source: Box::new(err),
        }
    }
}

/// Wall convection resolved for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Wall {
    pub conductance: ThermalConductance,
    pub temperature: ThermodynamicTemperature,
}

/// Raises the stream enthalpy by the reaction heat, then exchanges heat with the wall.
///
/// The enthalpy rise is `Q / (dt·|ṁ|)`: heat released warms the stream in
/// either flow direction, so only the magnitude of `flow_rate` is used.
///
/// `flow_rate` must be non-negligible and `dt` positive. Each stage that
/// fails in the property model is skipped with a warning, leaving the
/// temperature it received.
pub(super) fn integrate<T: ReactorThermoModel>(
    thermo: &T,
    inlet: &State<Mixture>,
    flow_rate: MassRate,
    dt: Time,
    produced_heat: Energy,
    wall: Option<Wall>,
) -> Heated {
    let m_dot = flow_rate.abs();
    let mut outlet = inlet.clone();

    if produced_heat != Energy::ZERO {
        let delta_h: SpecificEnthalpy = produced_heat / dt / m_dot;
        match add_enthalpy(thermo, &outlet, delta_h) {
            Ok(state) => outlet = state,
            Err(error) => warn!(%error, "reaction heat not applied"),
        }
    }

    let mut wall_heat_flux = Power::ZERO;
    if let Some(wall) = wall {
        match convect(thermo, &outlet, m_dot, wall) {
            Ok((state, q_dot)) => {
                outlet = state;
                wall_heat_flux = -q_dot;
            }
            Err(error) => warn!(%error, "wall convection not applied"),
        }
    }

    Heated {
        outlet,
        wall_heat_flux,
    }
}

/// Returns the state at the same pressure with enthalpy raised by `delta_h`.
fn add_enthalpy<T: ReactorThermoModel>(
    thermo: &T,
    state: &State<Mixture>,
    delta_h: SpecificEnthalpy,
) -> Result<State<Mixture>, ThermoFailed> {
    let pressure = thermo
        .pressure(state)
        .map_err(|err| ThermoFailed::new("pressure", err))?;
    let enthalpy = thermo
        .enthalpy(state)
        .map_err(|err| ThermoFailed::new("enthalpy", err))?;

    thermo
        .state_from((state.fluid.clone(), pressure, enthalpy + delta_h))
        .map_err(|err| ThermoFailed::new("state from (p, h)", err))
}

/// Exchanges heat with the wall over one pass through the link.
///
/// Treats the link as a single-stream exchanger against a constant wall
/// temperature, `ε = 1 − exp(−UA / (ṁ·cp))`. Returns the new state and
/// the heat rate into the fluid.
fn convect<T: ReactorThermoModel>(
    thermo: &T,
    state: &State<Mixture>,
    m_dot: MassRate,
    wall: Wall,
) -> Result<(State<Mixture>, Power), ThermoFailed> {
    let cp = thermo
        .cp(state)
        .map_err(|err| ThermoFailed::new("cp", err))?;
    let capacitance_rate: ThermalConductance = m_dot * cp;

    let ntu = wall.conductance.get::<watt_per_kelvin>()
        / capacitance_rate.get::<watt_per_kelvin>();
    let effectiveness = 1.0 - (-ntu).exp();
    if !effectiveness.is_finite() || effectiveness == 0.0 {
        return Ok((state.clone(), Power::ZERO));
    }

    let q_dot: Power =
        capacitance_rate * wall.temperature.minus(state.temperature) * effectiveness;
    let heated = add_enthalpy(thermo, state, q_dot / m_dot)?;
    Ok((heated, q_dot))
}

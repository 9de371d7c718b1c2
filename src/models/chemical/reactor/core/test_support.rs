use std::convert::Infallible;

use uom::si::{
    f64::{
        Mass, MassDensity, MassRate, Pressure, SpecificHeatCapacity, TemperatureInterval,
        ThermodynamicTemperature, Time,
    },
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature,
    time::second,
};

use crate::support::{
    chemistry::{CompoundCatalog, ReactionCatalog},
    thermo::{
        Constituent, Mixture, PropertyError, State,
        capability::{HasCp, HasEnthalpy, HasPressure, StateFrom, ThermoModel},
    },
    units::{SpecificEnthalpy, TemperatureDifference},
};

use super::{
    FlowNode, InitError, ReactionConfig, ReactionState, Reactor, ReactorConfig, ReactorInput,
    Resolved, Step, StepInput,
};

/// Mixture property model with a fixed `cp` of 1 kJ/(kg·K) and fixed pressure.
#[derive(Debug, Clone, Copy)]
pub(super) struct TestThermoModel {
    cp: SpecificHeatCapacity,
    pressure: Pressure,
    density: MassDensity,
}

impl TestThermoModel {
    pub(super) fn new() -> Self {
        Self {
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
            pressure: Pressure::new::<pascal>(101_325.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.2),
        }
    }
}

impl ThermoModel for TestThermoModel {
    type Fluid = Mixture;
}

impl HasPressure for TestThermoModel {
    fn pressure(&self, _state: &State<Mixture>) -> Result<Pressure, PropertyError> {
        Ok(self.pressure)
    }
}

impl HasEnthalpy for TestThermoModel {
    fn enthalpy(&self, state: &State<Mixture>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(self.cp * state.temperature.minus(kelvin(0.0)))
    }
}

impl HasCp for TestThermoModel {
    fn cp(&self, _state: &State<Mixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.cp)
    }
}

impl StateFrom<(Mixture, ThermodynamicTemperature, Pressure)> for TestThermoModel {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, _pressure): (Mixture, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Mixture>, Self::Error> {
        Ok(State::new(temperature, self.density, fluid))
    }
}

impl StateFrom<(Mixture, Pressure, SpecificEnthalpy)> for TestThermoModel {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, _pressure, enthalpy): (Mixture, Pressure, SpecificEnthalpy),
    ) -> Result<State<Mixture>, Self::Error> {
        let delta_t: TemperatureInterval = enthalpy / self.cp;
        Ok(State::new(kelvin(0.0) + delta_t, self.density, fluid))
    }
}

/// What a [`RecordingNode`] was asked to collect, in call order.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Collected {
    Influx(MassRate, State<Mixture>),
    Outflux(MassRate),
}

#[derive(Debug, Default)]
pub(super) struct RecordingNode {
    pub collected: Vec<Collected>,
}

impl FlowNode for RecordingNode {
    fn collect_influx(&mut self, rate: MassRate, fluid: &State<Mixture>) {
        self.collected.push(Collected::Influx(rate, fluid.clone()));
    }

    fn collect_outflux(&mut self, rate: MassRate) {
        self.collected.push(Collected::Outflux(rate));
    }
}

pub(super) fn kelvin(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(value)
}

pub(super) fn kg(value: f64) -> Mass {
    Mass::new::<kilogram>(value)
}

pub(super) fn kg_per_s(value: f64) -> MassRate {
    MassRate::new::<kilogram_per_second>(value)
}

pub(super) fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

/// Cabin-like air carrying every gas the standard reactions use.
pub(super) fn fluid() -> Mixture {
    Mixture::new(
        vec![
            Constituent::nitrogen(),
            Constituent::oxygen(),
            Constituent::carbon_dioxide(),
            Constituent::water(),
            Constituent::hydrogen(),
            Constituent::carbon_monoxide(),
            Constituent::methane(),
        ],
        vec![0.75, 0.2, 0.02, 0.01, 0.005, 0.01, 0.005],
    )
    .unwrap()
}

/// Dry air with carbon dioxide but no water.
pub(super) fn sorbent_fluid() -> Mixture {
    Mixture::new(
        vec![
            Constituent::nitrogen(),
            Constituent::oxygen(),
            Constituent::carbon_dioxide(),
        ],
        vec![0.77, 0.21, 0.02],
    )
    .unwrap()
}

pub(super) fn fluid_state(temperature: f64) -> State<Mixture> {
    State::new(
        kelvin(temperature),
        MassDensity::new::<kilogram_per_cubic_meter>(1.2),
        fluid(),
    )
}

/// A lithium hydroxide carbon dioxide scrubber.
pub(super) fn lioh_config() -> ReactorConfig {
    ReactorConfig {
        compounds: vec!["CO2".into(), "LiOH".into(), "H2O".into(), "Li2CO3".into()],
        reactions: vec![ReactionConfig::new("LIOH_CO2")],
        ..Default::default()
    }
}

/// A hydrogen burner fed by the fluid alone.
pub(super) fn h2_config() -> ReactorConfig {
    ReactorConfig {
        compounds: vec!["H2".into(), "O2".into(), "H2O".into()],
        reactions: vec![ReactionConfig::new("H2_OXIDATION")],
        ..Default::default()
    }
}

/// Two kilograms of sorbent and a wall at 300 K.
pub(super) fn lioh_input() -> ReactorInput {
    ReactorInput {
        wall_temperature: kelvin(300.0),
        blockage: 0.0,
        compound_masses: vec![("LiOH".into(), kg(2.0))],
    }
}

pub(super) fn resolve(config: &ReactorConfig) -> Resolved {
    Resolved::new(
        config,
        &CompoundCatalog::standard(),
        &ReactionCatalog::standard(),
        &fluid(),
    )
    .unwrap()
}

/// Resolves a standard reaction on its own, with no overrides.
pub(super) fn reaction_state(id: &str) -> ReactionState {
    let catalog = ReactionCatalog::standard();
    let reaction = catalog.get(&id.into()).unwrap();

    let mut compounds = vec![
        reaction.reactant.clone(),
        reaction.reagent.clone(),
        reaction.product1.clone(),
    ];
    compounds.extend(reaction.product2.as_ref().map(|(id, _)| id.clone()));

    let config = ReactorConfig {
        compounds,
        reactions: vec![ReactionConfig::new(id)],
        ..Default::default()
    };
    resolve(&config).reactions.remove(0)
}

/// Initializes a reactor against the standard catalogs and air at 300 K.
pub(super) fn initialize(
    config: &ReactorConfig,
    input: &ReactorInput,
) -> Result<Reactor, InitError> {
    Reactor::initialize(
        config,
        &CompoundCatalog::standard(),
        &ReactionCatalog::standard(),
        &fluid_state(300.0),
        input,
    )
}

pub(super) fn step_input(flow_rate: MassRate, dt: Time) -> StepInput {
    StepInput {
        flow_rate,
        dt,
        fluid: fluid_state(300.0),
    }
}

/// One second of the scrubber at the given flow.
pub(super) fn lioh_step(flow_rate: MassRate) -> Step {
    let reactor = initialize(&lioh_config(), &lioh_input()).unwrap();
    reactor.step(&step_input(flow_rate, seconds(1.0)), &TestThermoModel::new())
}

/// One second of the hydrogen burner at the given flow.
pub(super) fn h2_step(flow_rate: MassRate) -> Step {
    let reactor = initialize(&h2_config(), &ReactorInput::default()).unwrap();
    reactor.step(&step_input(flow_rate, seconds(1.0)), &TestThermoModel::new())
}

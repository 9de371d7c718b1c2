//! Reactor state and the per-step computation behind the public model.
//!
//! A [`Reactor`] is resolved once from configuration into indexed compound
//! and reaction arrays. [`Reactor::step`] runs intake, reactions, heat
//! integration and output synthesis on a copy of that state, and
//! [`Reactor::accept`] commits the result.

mod config;
mod efficiency;
mod engine;
mod error;
mod heat;
mod resolved;
mod traits;
mod transport;

#[cfg(test)]
mod test_support;

use tracing::{debug, warn};
use uom::{
    ConstZero,
    si::{
        f64::{Area, Energy, Mass, MassRate, Power, ThermodynamicTemperature, Time},
        thermodynamic_temperature::kelvin,
    },
};

use crate::support::{
    chemistry::{CompoundCatalog, CompoundId, ReactionCatalog},
    constraint::{Constraint, ConstraintError, NonNegative, UnitInterval},
    thermo::{Composition, Constituent, Mixture, State},
    units::MolarRate,
};

pub use config::{ConvectionConfig, ReactionConfig, ReactorConfig, ReactorInput};
pub use efficiency::EfficiencyModel;
pub use error::InitError;
pub use resolved::{CompoundState, ReactionState};
pub use traits::ReactorThermoModel;
pub use transport::{FlowNode, NEGLIGIBLE_FLOW_RATE, SourceTerms, transport};

use heat::Wall;
use resolved::Resolved;

/// A chemical reactor link between two fluid nodes.
///
/// The reactor tracks a set of compounds, some carried by the working fluid
/// and some held inside the reactor (such as a solid sorbent), and runs a
/// fixed list of reactions against them each step.
///
/// Stepping is split in two. [`Reactor::step`] computes a [`Step`] from the
/// committed state without changing it, so a network solver may call it as
/// often as it iterates. [`Reactor::accept`] commits one step. Running react
/// twice against the same committed state would double-count the reactor's
/// own stock, so only accepted steps ever reach it.
#[derive(Debug, Clone)]
pub struct Reactor {
    resolved: Resolved,
    constituents: Vec<Constituent>,
    efficiency: EfficiencyModel,
    wall: Option<Wall>,
    max_conductivity: Area,
    blockage: f64,
    fluid_temperature: ThermodynamicTemperature,
}

/// Inputs to one reactor step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInput {
    /// Net mass flow through the link; positive from port A to port B.
    pub flow_rate: MassRate,

    pub dt: Time,

    /// Fluid entering the link from the upstream node.
    ///
    /// Must carry the constituents of the fluid the reactor was initialized
    /// with, in the same order.
    pub fluid: State<Mixture>,
}

/// An auxiliary flow of reaction products or consumed reactants.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryFlow {
    /// Mass flow rate; products are non-negative, reactants non-positive.
    pub rate: MassRate,

    /// Constituent masses moved this step, as magnitudes.
    pub composition: Composition,

    /// Fluid state at the outlet temperature, or `None` if nothing moved.
    pub state: Option<State<Mixture>>,
}

impl AuxiliaryFlow {
    /// Returns the molar rate of this flow, zero if nothing moved.
    #[must_use]
    pub fn molar_rate(&self) -> MolarRate {
        self.composition
            .molar_mass()
            .map_or(MolarRate::ZERO, |molar_mass| self.rate / molar_mass)
    }
}

/// The result of one reactor step, not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    compounds: Vec<CompoundState>,

    /// Net mass flow through the link, as given.
    pub flow_rate: MassRate,

    /// Heat released by all reactions this step.
    pub produced_heat: Energy,

    /// Conductive stream leaving the link, after reaction and wall heat.
    pub outlet: State<Mixture>,

    /// Heat leaving the fluid to the wall; negative when the wall heats the fluid.
    pub wall_heat_flux: Power,

    pub reactants: AuxiliaryFlow,
    pub products: AuxiliaryFlow,
}

impl Step {
    /// Compound state as it will be after this step is accepted.
    #[must_use]
    pub fn compounds(&self) -> &[CompoundState] {
        &self.compounds
    }

    /// Returns the state of one compound, if tracked.
    #[must_use]
    pub fn compound(&self, id: &CompoundId) -> Option<&CompoundState> {
        self.compounds.iter().find(|c| &c.compound.id == id)
    }
}

impl Reactor {
    /// Validates the configuration and resolves it against the catalogs and fluid.
    ///
    /// `fluid` is the state of the node fluid the reactor connects to. Its
    /// constituents fix which compounds travel with the flow, and its
    /// temperature seeds the temperature-dependent efficiency.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if the configuration cannot be resolved or any
    /// initial condition is out of range. No reactor is created in that case.
    pub fn initialize(
        config: &ReactorConfig,
        compound_catalog: &CompoundCatalog,
        reaction_catalog: &ReactionCatalog,
        fluid: &State<Mixture>,
        input: &ReactorInput,
    ) -> Result<Self, InitError> {
        NonNegative::check(&input.wall_temperature.get::<kelvin>())
            .map_err(|_| InitError::InvalidWallTemperature(input.wall_temperature))?;
        UnitInterval::check(&input.blockage).map_err(|source| InitError::InvalidBlockage {
            value: input.blockage,
            source,
        })?;
        NonNegative::check(&config.max_conductivity.value)
            .map_err(InitError::InvalidConductivity)?;

        let wall = config
            .convection
            .map(|convection| -> Result<Wall, ConstraintError> {
                NonNegative::check(&convection.surface_area.value)?;
                NonNegative::check(&convection.coefficient.value)?;
                Ok(Wall {
                    conductance: convection.conductance(),
                    temperature: input.wall_temperature,
                })
            })
            .transpose()
            .map_err(InitError::InvalidConvection)?;

        let mut resolved =
            Resolved::new(config, compound_catalog, reaction_catalog, &fluid.fluid)?;

        for (id, mass) in &input.compound_masses {
            let index = resolved
                .compound_index(id)
                .ok_or_else(|| InitError::InitialMassNotConfigured(id.clone()))?;
            NonNegative::check(&mass.value).map_err(|_| InitError::InvalidInitialMass {
                compound: id.clone(),
                mass: *mass,
            })?;
            resolved.compounds[index].total_mass = *mass;
        }

        debug!(
            compounds = resolved.compounds.len(),
            reactions = resolved.reactions.len(),
            convection = wall.is_some(),
            "reactor initialized"
        );

        Ok(Self {
            resolved,
            constituents: fluid.fluid.constituents().to_vec(),
            efficiency: config.efficiency,
            wall,
            max_conductivity: config.max_conductivity,
            blockage: input.blockage,
            fluid_temperature: fluid.temperature,
        })
    }

    /// Computes one step from the committed state without changing it.
    ///
    /// Runs intake, react, heat integration and synthesis in that order.
    /// With negligible flow or a non-positive `dt` nothing reacts, the outlet
    /// equals the inlet, and the reactor's own stock is left untouched.
    pub fn step<T: ReactorThermoModel>(&self, input: &StepInput, thermo: &T) -> Step {
        let mut compounds = self.resolved.compounds.clone();

        if engine::is_idle(input.flow_rate, input.dt) {
            for compound in &mut compounds {
                compound.mass = Mass::ZERO;
            }
            return Step {
                compounds,
                flow_rate: input.flow_rate,
                produced_heat: Energy::ZERO,
                outlet: input.fluid.clone(),
                wall_heat_flux: Power::ZERO,
                reactants: self.empty_flow(),
                products: self.empty_flow(),
            };
        }

        engine::intake(&mut compounds, &input.fluid.fluid, input.flow_rate, input.dt);

        let temperature = self.fluid_temperature;
        let produced_heat = engine::react(&mut compounds, &self.resolved.reactions, |r, c| {
            self.efficiency
                .efficiency(r, c[r.reagent].total_mass, temperature)
        });

        let heated = heat::integrate(
            thermo,
            &input.fluid,
            input.flow_rate,
            input.dt,
            produced_heat,
            self.wall,
        );

        let synthesized = engine::synthesize(&compounds, &self.constituents, input.dt);

        Step {
            compounds,
            flow_rate: input.flow_rate,
            produced_heat,
            reactants: auxiliary(
                thermo,
                synthesized.reactants_rate,
                synthesized.reactants,
                &heated.outlet,
            ),
            products: auxiliary(
                thermo,
                synthesized.products_rate,
                synthesized.products,
                &heated.outlet,
            ),
            outlet: heated.outlet,
            wall_heat_flux: heated.wall_heat_flux,
        }
    }

    /// Commits a step computed by [`Reactor::step`].
    ///
    /// The step must come from this reactor's current state; accepting it
    /// consumes it, so no step is committed twice.
    pub fn accept(&mut self, step: Step) {
        self.resolved.compounds = step.compounds;
        self.fluid_temperature = step.outlet.temperature;
    }

    #[must_use]
    pub fn compounds(&self) -> &[CompoundState] {
        &self.resolved.compounds
    }

    #[must_use]
    pub fn reactions(&self) -> &[ReactionState] {
        &self.resolved.reactions
    }

    /// Returns the committed state of one compound, if tracked.
    #[must_use]
    pub fn compound(&self, id: &CompoundId) -> Option<&CompoundState> {
        self.resolved
            .compound_index(id)
            .map(|i| &self.resolved.compounds[i])
    }

    /// Fluid temperature of the last accepted step.
    #[must_use]
    pub fn fluid_temperature(&self) -> ThermodynamicTemperature {
        self.fluid_temperature
    }

    /// Sets the wall temperature used for convection from the next step on.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError`] if the temperature is negative or `NaN`.
    pub fn set_wall_temperature(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), ConstraintError> {
        NonNegative::check(&temperature.get::<kelvin>())?;
        if let Some(wall) = &mut self.wall {
            wall.temperature = temperature;
        }
        Ok(())
    }

    /// Sets the blocked fraction of the link conductivity.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError`] if `blockage` is outside `[0, 1]`.
    pub fn set_blockage(&mut self, blockage: f64) -> Result<(), ConstraintError> {
        UnitInterval::check(&blockage)?;
        self.blockage = blockage;
        Ok(())
    }

    /// Effective link conductivity, `max × (1 − blockage)`.
    #[must_use]
    pub fn conductivity(&self) -> Area {
        self.max_conductivity * (1.0 - self.blockage)
    }

    fn empty_flow(&self) -> AuxiliaryFlow {
        AuxiliaryFlow {
            rate: MassRate::ZERO,
            composition: Composition::new(self.constituents.clone()),
            state: None,
        }
    }
}

/// Builds an auxiliary flow at the outlet temperature and pressure.
fn auxiliary<T: ReactorThermoModel>(
    thermo: &T,
    rate: MassRate,
    composition: Composition,
    outlet: &State<Mixture>,
) -> AuxiliaryFlow {
    let state = composition.to_mixture().and_then(|mixture| {
        let pressure = thermo
            .pressure(outlet)
            .inspect_err(|error| warn!(%error, "auxiliary flow has no state"))
            .ok()?;
        thermo
            .state_from((mixture, outlet.temperature, pressure))
            .inspect_err(|error| warn!(%error, "auxiliary flow has no state"))
            .ok()
    });

    AuxiliaryFlow {
        rate,
        composition,
        state,
    }
}

//! Chemical reactor link model.
//!
//! A [`Reactor`] runs a configured list of reactions against compounds
//! carried by a flowing fluid and against its own stock, such as a solid
//! sorbent. Each step it reports the reaction heat, the heated outlet
//! stream, and the products and consumed reactants as two auxiliary flows.
//! [`transport`] moves those flows into the nodes at either end of the link.
//!
//! [`ReactorModel`] exposes a reactor step as a [`twine_core::Model`].
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_reactor::{
//!     models::chemical::reactor::{
//!         ReactionConfig, Reactor, ReactorConfig, ReactorInput, ReactorModel, StepInput,
//!     },
//!     support::{
//!         chemistry::{CompoundCatalog, ReactionCatalog},
//!         thermo::{Constituent, Mixture, State, model::IdealMixture},
//!     },
//! };
//! use uom::si::{
//!     f64::{Mass, MassDensity, MassRate, ThermodynamicTemperature, Time},
//!     mass::kilogram,
//!     mass_density::kilogram_per_cubic_meter,
//!     mass_rate::kilogram_per_second,
//!     thermodynamic_temperature::kelvin,
//!     time::second,
//! };
//!
//! let air = Mixture::new(
//!     vec![
//!         Constituent::nitrogen(),
//!         Constituent::oxygen(),
//!         Constituent::carbon_dioxide(),
//!         Constituent::water(),
//!     ],
//!     vec![0.75, 0.21, 0.03, 0.01],
//! )
//! .unwrap();
//! let cabin = State::new(
//!     ThermodynamicTemperature::new::<kelvin>(295.0),
//!     MassDensity::new::<kilogram_per_cubic_meter>(1.2),
//!     air,
//! );
//!
//! let config = ReactorConfig {
//!     compounds: vec!["CO2".into(), "LiOH".into(), "H2O".into(), "Li2CO3".into()],
//!     reactions: vec![ReactionConfig::new("LIOH_CO2")],
//!     ..Default::default()
//! };
//! let input = ReactorInput {
//!     compound_masses: vec![("LiOH".into(), Mass::new::<kilogram>(1.5))],
//!     ..Default::default()
//! };
//!
//! let mut reactor = Reactor::initialize(
//!     &config,
//!     &CompoundCatalog::standard(),
//!     &ReactionCatalog::standard(),
//!     &cabin,
//!     &input,
//! )
//! .unwrap();
//!
//! let thermo = IdealMixture::default();
//! let step = ReactorModel::new(&reactor, &thermo)
//!     .call(&StepInput {
//!         flow_rate: MassRate::new::<kilogram_per_second>(0.05),
//!         dt: Time::new::<second>(1.0),
//!         fluid: cabin.clone(),
//!     })
//!     .unwrap();
//!
//! assert!(step.outlet.temperature > cabin.temperature);
//! reactor.accept(step);
//! ```

mod core;

use std::convert::Infallible;

use twine_core::Model;

pub use self::core::{
    AuxiliaryFlow, CompoundState, ConvectionConfig, EfficiencyModel, FlowNode, InitError,
    NEGLIGIBLE_FLOW_RATE, ReactionConfig, ReactionState, Reactor, ReactorConfig, ReactorInput,
    ReactorThermoModel, SourceTerms, Step, StepInput, transport,
};

/// Model adapter computing one uncommitted reactor step.
///
/// Calling the model never changes the reactor. Commit the chosen result
/// with [`Reactor::accept`].
#[derive(Debug, Clone, Copy)]
pub struct ReactorModel<'a, Thermo> {
    reactor: &'a Reactor,
    thermo: &'a Thermo,
}

impl<'a, Thermo> ReactorModel<'a, Thermo> {
    #[must_use]
    pub fn new(reactor: &'a Reactor, thermo: &'a Thermo) -> Self {
        Self { reactor, thermo }
    }
}

impl<Thermo: ReactorThermoModel> Model for ReactorModel<'_, Thermo> {
    type Input = StepInput;
    type Output = Step;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.reactor.step(input, self.thermo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MassDensity, MassRate, ThermodynamicTemperature, Time},
        mass_density::kilogram_per_cubic_meter,
        mass_rate::kilogram_per_second,
        thermodynamic_temperature::kelvin,
        time::second,
    };

    use crate::support::{
        chemistry::{CompoundCatalog, ReactionCatalog},
        thermo::{Constituent, Mixture, State, model::IdealMixture},
    };

    fn oxidizer() -> (Reactor, State<Mixture>) {
        let fluid = State::new(
            ThermodynamicTemperature::new::<kelvin>(320.0),
            MassDensity::new::<kilogram_per_cubic_meter>(1.1),
            Mixture::new(
                vec![
                    Constituent::nitrogen(),
                    Constituent::oxygen(),
                    Constituent::hydrogen(),
                    Constituent::water(),
                ],
                vec![0.76, 0.23, 0.002, 0.008],
            )
            .unwrap(),
        );
        let config = ReactorConfig {
            compounds: vec!["H2".into(), "O2".into(), "H2O".into()],
            reactions: vec![ReactionConfig::new("H2_OXIDATION")],
            ..Default::default()
        };
        let reactor = Reactor::initialize(
            &config,
            &CompoundCatalog::standard(),
            &ReactionCatalog::standard(),
            &fluid,
            &ReactorInput::default(),
        )
        .unwrap();
        (reactor, fluid)
    }

    #[test]
    fn model_call_matches_step() {
        let (reactor, fluid) = oxidizer();
        let thermo = IdealMixture::default();
        let input = StepInput {
            flow_rate: MassRate::new::<kilogram_per_second>(0.1),
            dt: Time::new::<second>(0.5),
            fluid,
        };

        let via_model = ReactorModel::new(&reactor, &thermo).call(&input).unwrap();

        assert_eq!(via_model, reactor.step(&input, &thermo));
        assert!(via_model.produced_heat.value > 0.0);
        assert!(via_model.outlet.temperature > input.fluid.temperature);
    }

    #[test]
    fn hydrogen_burns_to_water() {
        let (mut reactor, fluid) = oxidizer();
        let thermo = IdealMixture::default();
        let input = StepInput {
            flow_rate: MassRate::new::<kilogram_per_second>(0.1),
            dt: Time::new::<second>(0.5),
            fluid,
        };

        let step = ReactorModel::new(&reactor, &thermo).call(&input).unwrap();
        let water = step.compound(&"H2O".into()).unwrap().mass;
        reactor.accept(step);

        assert!(water.value > 0.0);
        assert_eq!(reactor.compound(&"H2O".into()).unwrap().mass, water);
    }
}

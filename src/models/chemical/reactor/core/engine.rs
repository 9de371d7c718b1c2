//! Per-step compound accounting: intake, react, synthesize.

use tracing::trace;
use uom::{
    ConstZero,
    si::{
        f64::{AmountOfSubstance, Energy, Mass, MassRate, Time},
        mass::kilogram,
        mass_rate::kilogram_per_second,
        molar_mass::kilogram_per_mole,
    },
};

use crate::support::thermo::{Composition, Constituent, Mixture};

use super::{CompoundState, ReactionState};

/// Fraction of an available input a single reaction can consume at most.
pub(super) const MAX_CONSUMED_FRACTION: f64 = 0.9999;

/// Returns true if a step with this flow and time step should do nothing.
pub(super) fn is_idle(flow_rate: MassRate, dt: Time) -> bool {
    flow_rate.abs() <= MassRate::new::<kilogram_per_second>(f64::EPSILON) || dt <= Time::ZERO
}

/// Rederives fluid-carried compound totals from the flow and clears step masses.
///
/// Compounds not carried by the fluid keep their running totals.
pub(super) fn intake(
    compounds: &mut [CompoundState],
    fluid: &Mixture,
    flow_rate: MassRate,
    dt: Time,
) {
    let throughput: Mass = flow_rate.abs() * dt;

    for compound in compounds {
        if let Some(index) = compound.mixture_index {
            compound.total_mass = throughput * fluid.mass_fraction(index);
        }
        compound.mass = Mass::ZERO;
    }
}

/// Runs every reaction in order against the shared compound pool.
///
/// `efficiency` is evaluated once per reaction, after all earlier reactions
/// have been applied. Returns the total heat released.
pub(super) fn react<F>(
    compounds: &mut [CompoundState],
    reactions: &[ReactionState],
    efficiency: F,
) -> Energy
where
    F: Fn(&ReactionState, &[CompoundState]) -> f64,
{
    let mut produced_heat = Energy::ZERO;

    for reaction in reactions {
        let def = &reaction.reaction;
        let reactant_ratio = mass_ratio(&compounds[reaction.reactant], def.reactant_moles);
        let reagent_ratio = mass_ratio(&compounds[reaction.reagent], def.reagent_moles);
        let product1_ratio = mass_ratio(&compounds[reaction.product1], def.product1_moles);

        let efficiency = efficiency(reaction, compounds).clamp(0.0, MAX_CONSUMED_FRACTION);
        let max_reactant = compounds[reaction.reactant].total_mass * efficiency;

        // The reagent mass is the pivot every other delta follows from.
        let reagent_mass = (compounds[reaction.reagent].total_mass * MAX_CONSUMED_FRACTION)
            .min(max_reactant * (reagent_ratio / reactant_ratio));
        let reactant_mass = reagent_mass * (reactant_ratio / reagent_ratio);
        let product1_mass = reagent_mass * (product1_ratio / reagent_ratio);

        compounds[reaction.reactant].consume(reactant_mass);
        compounds[reaction.reagent].consume(reagent_mass);
        compounds[reaction.product1].produce(product1_mass);

        let product1_moles: AmountOfSubstance =
            product1_mass / compounds[reaction.product1].compound.molar_mass;
        let heat = def.heat / def.product1_moles * product1_moles;
        produced_heat += heat;

        // The second product takes its share of mass but none of the heat.
        if let (Some(index), Some((_, moles))) = (reaction.product2, &def.product2) {
            let product2_ratio = mass_ratio(&compounds[index], *moles);
            compounds[index].produce(reagent_mass * (product2_ratio / reagent_ratio));
        }

        trace!(
            reaction = %def.id,
            efficiency,
            reactant_kg = reactant_mass.get::<kilogram>(),
            reagent_kg = reagent_mass.get::<kilogram>(),
            product1_kg = product1_mass.get::<kilogram>(),
            heat_j = heat.value,
            "reaction applied"
        );
    }

    produced_heat
}

/// Kilograms of `compound` per mole of reaction.
fn mass_ratio(compound: &CompoundState, moles: f64) -> f64 {
    moles * compound.compound.molar_mass.get::<kilogram_per_mole>()
}

/// Net fluid-carried mass change over one step, split by sign.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Synthesized {
    /// Mass generated into the fluid.
    pub products: Composition,
    pub products_rate: MassRate,

    /// Magnitude of mass removed from the fluid.
    pub reactants: Composition,
    /// Removal rate; zero or negative.
    pub reactants_rate: MassRate,
}

/// Splits fluid-carried step masses into products and reactants.
///
/// Both compositions are built over `constituents`, which must be the
/// constituents of the fluid the compounds were resolved against.
pub(super) fn synthesize(
    compounds: &[CompoundState],
    constituents: &[Constituent],
    dt: Time,
) -> Synthesized {
    let mut out = Synthesized {
        products: Composition::new(constituents.to_vec()),
        products_rate: MassRate::ZERO,
        reactants: Composition::new(constituents.to_vec()),
        reactants_rate: MassRate::ZERO,
    };

    let noise = Mass::new::<kilogram>(f64::EPSILON);
    let changed = compounds
        .iter()
        .any(|c| c.mixture_index.is_some() && c.mass.abs() > noise);
    if !changed || dt <= Time::ZERO {
        return out;
    }

    let mut produced = Mass::ZERO;
    let mut consumed = Mass::ZERO;
    for compound in compounds {
        let Some(index) = compound.mixture_index else {
            continue;
        };
        if compound.mass > Mass::ZERO {
            out.products.add(index, compound.mass);
            produced += compound.mass;
        } else if compound.mass < Mass::ZERO {
            out.reactants.add(index, -compound.mass);
            consumed += compound.mass;
        }
    }

    out.products_rate = produced / dt;
    out.reactants_rate = consumed / dt;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        energy::joule,
        f64::{MolarEnergy, MolarMass},
        molar_energy::kilojoule_per_mole,
        molar_mass::gram_per_mole,
    };

    use crate::models::chemical::reactor::core::{
        ReactionConfig, ReactorConfig,
        test_support::{fluid, h2_config, kg, kg_per_s, lioh_config, resolve, seconds},
    };

    fn fixed(efficiency: f64) -> impl Fn(&ReactionState, &[CompoundState]) -> f64 {
        move |_, _| efficiency
    }

    #[test]
    fn idle_when_flow_or_dt_vanish() {
        assert!(is_idle(kg_per_s(0.0), seconds(1.0)));
        assert!(is_idle(kg_per_s(1e-17), seconds(1.0)));
        assert!(is_idle(kg_per_s(1.0), seconds(0.0)));
        assert!(is_idle(kg_per_s(-1.0), seconds(-0.1)));
        assert!(!is_idle(kg_per_s(-1.0), seconds(0.1)));
    }

    #[test]
    fn intake_uses_flow_magnitude_and_keeps_sorbent() {
        let mut resolved = resolve(&lioh_config());
        resolved.compounds[1].total_mass = kg(3.0);
        resolved.compounds[1].mass = kg(-0.5);
        let fluid = fluid();

        intake(&mut resolved.compounds, &fluid, kg_per_s(-2.0), seconds(0.5));

        let co2 = &resolved.compounds[0];
        let index = co2.mixture_index.unwrap();
        assert_relative_eq!(
            co2.total_mass.get::<kilogram>(),
            fluid.mass_fraction(index) * 2.0 * 0.5
        );
        assert_relative_eq!(resolved.compounds[1].total_mass.get::<kilogram>(), 3.0);
        assert!(resolved.compounds.iter().all(|c| c.mass == Mass::ZERO));
    }

    #[test]
    fn reagent_limits_when_scarce() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(100.0);
        resolved.compounds[1].total_mass = kg(1e-5);

        react(&mut resolved.compounds, &resolved.reactions, fixed(1.0));

        let [h2, o2, _] = &resolved.compounds[..] else {
            unreachable!()
        };
        assert_relative_eq!(o2.total_mass.get::<kilogram>(), 1e-9, max_relative = 1e-6);
        assert_relative_eq!(o2.mass.get::<kilogram>(), -1e-5 * 0.9999);
        assert!(h2.total_mass.get::<kilogram>() > 99.99);
    }

    #[test]
    fn reactant_limits_when_scarce() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(1e-5);
        resolved.compounds[1].total_mass = kg(100.0);

        react(&mut resolved.compounds, &resolved.reactions, fixed(1.0));

        let [h2, o2, _] = &resolved.compounds[..] else {
            unreachable!()
        };
        assert_relative_eq!(h2.total_mass.get::<kilogram>(), 1e-9, max_relative = 1e-6);
        assert!(o2.total_mass.get::<kilogram>() > 99.99);
    }

    #[test]
    fn consumption_never_exceeds_ceiling() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(1.0);
        resolved.compounds[1].total_mass = kg(1000.0);

        react(&mut resolved.compounds, &resolved.reactions, fixed(1.0));

        let h2 = &resolved.compounds[0];
        assert_relative_eq!(h2.mass.get::<kilogram>(), -0.9999, epsilon = 1e-12);
        assert_relative_eq!(h2.total_mass.get::<kilogram>(), 1e-4, max_relative = 1e-9);
    }

    #[test]
    fn zero_efficiency_does_nothing() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(1.0);
        resolved.compounds[1].total_mass = kg(1.0);

        let heat = react(&mut resolved.compounds, &resolved.reactions, fixed(0.0));

        assert_eq!(heat, Energy::ZERO);
        assert!(resolved.compounds.iter().all(|c| c.mass == Mass::ZERO));
    }

    #[test]
    fn single_product_reaction_conserves_mass() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(0.2);
        resolved.compounds[1].total_mass = kg(5.0);

        react(&mut resolved.compounds, &resolved.reactions, fixed(0.9));

        let deltas: Vec<f64> = resolved
            .compounds
            .iter()
            .map(|c| c.mass.get::<kilogram>())
            .collect();
        let consumed = -deltas[0];
        assert_relative_eq!(consumed, 0.2 * 0.9, epsilon = 1e-12);

        // Catalog molar masses balance to about one part in a million.
        assert_relative_eq!(deltas.iter().sum::<f64>(), 0.0, epsilon = 1e-5 * consumed);

        let ratio = -deltas[1] / consumed;
        assert_relative_eq!(ratio, 0.5 * 31.9988 / 2.01588, max_relative = 1e-12);
    }

    #[test]
    fn heat_follows_product1_moles() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(0.01);
        resolved.compounds[1].total_mass = kg(1.0);

        let heat = react(&mut resolved.compounds, &resolved.reactions, fixed(0.5));

        let product1_mass = resolved.compounds[2].mass.get::<kilogram>();
        let expected = (241.8 / 1.0) * 1e6 * product1_mass / 18.0153;
        assert_relative_eq!(heat.get::<joule>(), expected, max_relative = 1e-12);
    }

    #[test]
    fn second_product_gets_mass_but_no_heat() {
        let mut resolved = resolve(&lioh_config());
        resolved.compounds[0].total_mass = kg(0.05);
        resolved.compounds[1].total_mass = kg(2.0);

        let heat = react(&mut resolved.compounds, &resolved.reactions, fixed(0.95));

        let [co2, lioh, h2o, li2co3] = &resolved.compounds[..] else {
            unreachable!()
        };
        let reagent = -lioh.mass.get::<kilogram>();
        assert_relative_eq!(
            li2co3.mass.get::<kilogram>(),
            reagent * 73.8909 / (2.0 * 23.9483),
            max_relative = 1e-12
        );

        // Products 1 and 2 together balance the inputs; product 1 alone does not.
        let three = co2.mass + lioh.mass + h2o.mass;
        assert_relative_eq!(
            three.get::<kilogram>(),
            -li2co3.mass.get::<kilogram>(),
            max_relative = 1e-5
        );
        assert!(three.get::<kilogram>() < 0.0);

        let expected = 89.5 * 1e6 * h2o.mass.get::<kilogram>() / 18.0153;
        assert_relative_eq!(heat.get::<joule>(), expected, max_relative = 1e-12);
    }

    #[test]
    fn reaction_order_changes_shared_reagent_split() {
        let oxidizers = |order: [&str; 2]| ReactorConfig {
            compounds: vec!["H2".into(), "CO".into(), "O2".into(), "H2O".into(), "CO2".into()],
            reactions: order.into_iter().map(ReactionConfig::new).collect(),
            ..Default::default()
        };
        let run = |order| {
            let mut resolved = resolve(&oxidizers(order));
            resolved.compounds[0].total_mass = kg(0.01);
            resolved.compounds[1].total_mass = kg(0.1);
            resolved.compounds[2].total_mass = kg(0.1);
            react(&mut resolved.compounds, &resolved.reactions, fixed(1.0));
            resolved.compounds
        };

        let h2_first = run(["H2_OXIDATION", "CO_OXIDATION"]);
        let co_first = run(["CO_OXIDATION", "H2_OXIDATION"]);

        // Whichever oxidizer runs first takes the oxygen it needs.
        assert!(h2_first[0].mass < co_first[0].mass);
        assert!(h2_first[1].mass > co_first[1].mass);
        assert_relative_eq!(
            h2_first[0].mass.get::<kilogram>(),
            -0.01 * 0.9999,
            epsilon = 1e-12
        );
    }

    #[test]
    fn efficiency_sees_earlier_reactions() {
        let config = ReactorConfig {
            compounds: vec!["H2".into(), "O2".into(), "H2O".into()],
            reactions: vec![
                ReactionConfig::new("H2_OXIDATION"),
                ReactionConfig::new("H2_OXIDATION"),
            ],
            ..Default::default()
        };
        let mut resolved = resolve(&config);
        resolved.compounds[0].total_mass = kg(1.0);
        resolved.compounds[1].total_mass = kg(100.0);

        let seen = std::cell::RefCell::new(Vec::new());
        react(&mut resolved.compounds, &resolved.reactions, |r, c| {
            seen.borrow_mut().push(c[r.reactant].total_mass.get::<kilogram>());
            0.5
        });

        let seen = seen.into_inner();
        assert_relative_eq!(seen[0], 1.0);
        assert_relative_eq!(seen[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn synthesize_splits_by_sign() {
        let mut resolved = resolve(&h2_config());
        resolved.compounds[0].total_mass = kg(0.01);
        resolved.compounds[1].total_mass = kg(1.0);
        react(&mut resolved.compounds, &resolved.reactions, fixed(1.0));

        let fluid = fluid();
        let out = synthesize(&resolved.compounds, fluid.constituents(), seconds(0.1));

        let h2o = resolved.compounds[2].mass.get::<kilogram>();
        let consumed = -(resolved.compounds[0].mass + resolved.compounds[1].mass);
        assert_relative_eq!(out.products_rate.get::<kilogram_per_second>(), h2o / 0.1);
        assert_relative_eq!(
            out.reactants_rate.get::<kilogram_per_second>(),
            -consumed.get::<kilogram>() / 0.1,
            max_relative = 1e-12
        );
        assert_relative_eq!(out.products.total_mass().get::<kilogram>(), h2o);
        assert_relative_eq!(
            out.reactants.total_mass().get::<kilogram>(),
            consumed.get::<kilogram>(),
            max_relative = 1e-12
        );

        let water = fluid.index_of(&"H2O".into()).unwrap();
        assert_relative_eq!(out.products.masses()[water].get::<kilogram>(), h2o);
        assert_relative_eq!(
            out.products.molar_mass().unwrap().get::<gram_per_mole>(),
            18.0153,
            max_relative = 1e-12
        );
    }

    #[test]
    fn synthesize_ignores_solids_and_noise() {
        let mut resolved = resolve(&lioh_config());
        resolved.compounds[1].mass = kg(-1.0);
        resolved.compounds[3].mass = kg(1.0);
        resolved.compounds[0].mass = kg(-1e-17);

        let out = synthesize(&resolved.compounds, fluid().constituents(), seconds(1.0));

        assert_eq!(out.products_rate, MassRate::ZERO);
        assert_eq!(out.reactants_rate, MassRate::ZERO);
        assert_eq!(out.products.total_mass(), Mass::ZERO);
        assert!(out.products.molar_mass().is_none());
    }

    #[test]
    fn kilojoules_per_mole_times_kilograms_gives_joules() {
        let moles: AmountOfSubstance =
            kg(0.018_015_3) / MolarMass::new::<gram_per_mole>(18.0153);
        let heat = MolarEnergy::new::<kilojoule_per_mole>(1.0) * moles;
        assert_relative_eq!(heat.get::<joule>(), 1000.0, max_relative = 1e-12);
    }
}

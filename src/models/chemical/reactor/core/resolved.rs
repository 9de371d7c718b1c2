//! One-time resolution of configuration into indexed reactor state.
//!
//! Every cross reference (reaction to compound, compound to fluid
//! constituent) is resolved here to an array index and validated. Stepping
//! only ever follows these indices.

use std::collections::HashMap;

use uom::{
    ConstZero,
    si::{f64::Mass, mass::kilogram},
};

use crate::support::{
    chemistry::{Compound, CompoundCatalog, CompoundId, Reaction, ReactionCatalog},
    constraint::{Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval},
    thermo::Mixture,
};

use super::{InitError, ReactionConfig, ReactorConfig};

/// Per-reactor state of one tracked compound.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundState {
    pub compound: Compound,

    /// Index of the matching constituent in the working fluid, if carried.
    pub mixture_index: Option<usize>,

    /// Mass of this compound available to the reactor.
    ///
    /// Rederived from the flow each step for fluid-carried compounds and
    /// carried over between steps for all others.
    pub total_mass: Mass,

    /// Mass produced (positive) or consumed (negative) during the current step.
    pub mass: Mass,
}

impl CompoundState {
    fn new(compound: Compound, mixture_index: Option<usize>) -> Self {
        Self {
            compound,
            mixture_index,
            total_mass: Mass::ZERO,
            mass: Mass::ZERO,
        }
    }

    /// Removes `mass` from the available total and records it as consumed.
    pub(super) fn consume(&mut self, mass: Mass) {
        self.mass -= mass;
        self.total_mass -= mass;
        self.clamp_total();
    }

    /// Adds `mass` to the available total and records it as produced.
    pub(super) fn produce(&mut self, mass: Mass) {
        self.mass += mass;
        self.total_mass += mass;
        self.clamp_total();
    }

    fn clamp_total(&mut self) {
        if self.total_mass.abs() < Mass::new::<kilogram>(f64::EPSILON) {
            self.total_mass = Mass::ZERO;
        }
    }
}

/// Per-reactor state of one configured reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionState {
    pub reaction: Reaction,

    /// Indices into the reactor's compound array.
    pub reactant: usize,
    pub reagent: usize,
    pub product1: usize,
    pub product2: Option<usize>,

    /// Reactant efficiency override; zero means use the nominal value.
    pub reactant_efficiency: f64,

    /// Reagent-mass throttle per kilogram; zero means no throttle.
    pub reagent_efficiency: f64,
}

/// Compound and reaction state arrays, cross-linked by index.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Resolved {
    pub compounds: Vec<CompoundState>,
    pub reactions: Vec<ReactionState>,
    index: HashMap<CompoundId, usize>,
}

impl Resolved {
    /// Resolves and validates the configured compounds and reactions.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] if any list is empty, any identifier is
    /// undefined or unconfigured, a reaction compound expected in the fluid
    /// is absent from `fluid`, or molar masses, stoichiometry or efficiencies
    /// are invalid.
    pub fn new(
        config: &ReactorConfig,
        compound_catalog: &CompoundCatalog,
        reaction_catalog: &ReactionCatalog,
        fluid: &Mixture,
    ) -> Result<Self, InitError> {
        if config.compounds.is_empty() {
            return Err(InitError::NoCompounds);
        }
        if config.reactions.is_empty() {
            return Err(InitError::NoReactions);
        }

        let mut index = HashMap::with_capacity(config.compounds.len());
        let mut compounds = Vec::with_capacity(config.compounds.len());

        for id in &config.compounds {
            let compound = compound_catalog
                .get(id)
                .ok_or_else(|| InitError::UndefinedCompound(id.clone()))?;

            StrictlyPositive::check(&compound.molar_mass.value).map_err(|source| {
                InitError::InvalidMolarMass {
                    compound: id.clone(),
                    source,
                }
            })?;

            if index.insert(id.clone(), compounds.len()).is_some() {
                return Err(InitError::DuplicateCompound(id.clone()));
            }

            let mixture_index = compound
                .constituent
                .as_ref()
                .and_then(|constituent| fluid.index_of(constituent));

            compounds.push(CompoundState::new(compound.clone(), mixture_index));
        }

        let reactions = config
            .reactions
            .iter()
            .map(|entry| resolve_reaction(entry, reaction_catalog, &index, &compounds))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            compounds,
            reactions,
            index,
        })
    }

    /// Returns the index of a configured compound.
    pub fn compound_index(&self, id: &CompoundId) -> Option<usize> {
        self.index.get(id).copied()
    }
}

fn resolve_reaction(
    entry: &ReactionConfig,
    catalog: &ReactionCatalog,
    index: &HashMap<CompoundId, usize>,
    compounds: &[CompoundState],
) -> Result<ReactionState, InitError> {
    let reaction = catalog
        .get(&entry.id)
        .ok_or_else(|| InitError::UndefinedReaction(entry.id.clone()))?;

    check_stoichiometry(reaction).map_err(|source| InitError::InvalidStoichiometry {
        reaction: reaction.id.clone(),
        source,
    })?;

    let invalid_efficiency = |source| InitError::InvalidEfficiency {
        reaction: reaction.id.clone(),
        source,
    };
    UnitInterval::check(&reaction.reactant_efficiency).map_err(invalid_efficiency)?;
    let reactant_efficiency = entry
        .reactant_efficiency
        .map_or(Ok(0.0), |e| UnitInterval::new(e).map(|e| e.into_inner()))
        .map_err(invalid_efficiency)?;
    let reagent_efficiency = entry
        .reagent_efficiency
        .map_or(Ok(0.0), |e| NonNegative::new(e).map(|e| e.into_inner()))
        .map_err(invalid_efficiency)?;

    let resolve = |id: &CompoundId| -> Result<usize, InitError> {
        let &i = index
            .get(id)
            .ok_or_else(|| InitError::CompoundNotConfigured {
                reaction: reaction.id.clone(),
                compound: id.clone(),
            })?;

        let state = &compounds[i];
        if let (Some(constituent), None) = (&state.compound.constituent, state.mixture_index) {
            return Err(InitError::ConstituentNotInFluid {
                reaction: reaction.id.clone(),
                compound: id.clone(),
                constituent: constituent.clone(),
            });
        }
        Ok(i)
    };

    Ok(ReactionState {
        reactant: resolve(&reaction.reactant)?,
        reagent: resolve(&reaction.reagent)?,
        product1: resolve(&reaction.product1)?,
        product2: reaction
            .product2
            .as_ref()
            .map(|(id, _)| resolve(id))
            .transpose()?,
        reaction: reaction.clone(),
        reactant_efficiency,
        reagent_efficiency,
    })
}

fn check_stoichiometry(reaction: &Reaction) -> Result<(), ConstraintError> {
    StrictlyPositive::check(&reaction.reactant_moles)?;
    StrictlyPositive::check(&reaction.reagent_moles)?;
    StrictlyPositive::check(&reaction.product1_moles)?;
    if let Some((_, moles)) = &reaction.product2 {
        StrictlyPositive::check(moles)?;
    }
    Ok(())
}

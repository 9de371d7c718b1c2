use std::{collections::HashMap, fmt};

use uom::si::{f64::MolarEnergy, molar_energy::kilojoule_per_mole};

use super::CompoundId;

/// Identifier of a reaction (e.g., `"LIOH_CO2"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactionId(String);

impl ReactionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReactionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static stoichiometry of a single reaction.
///
/// A reaction consumes a reactant and a reagent and produces one or two
/// products. Mole counts are stoichiometric coefficients; they need not be
/// integers.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub id: ReactionId,

    pub reactant: CompoundId,
    pub reactant_moles: f64,

    pub reagent: CompoundId,
    pub reagent_moles: f64,

    pub product1: CompoundId,
    pub product1_moles: f64,

    /// Optional second product and its mole count.
    pub product2: Option<(CompoundId, f64)>,

    /// Nominal fraction of the available reactant this reaction consumes.
    pub reactant_efficiency: f64,

    /// Heat released per mole of reaction; positive heats the fluid.
    pub heat: MolarEnergy,
}

/// Read-only lookup of reaction definitions by identifier.
#[derive(Debug, Clone, Default)]
pub struct ReactionCatalog {
    reactions: HashMap<ReactionId, Reaction>,
}

impl ReactionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reaction, replacing any existing definition with the same id.
    #[must_use]
    pub fn with(mut self, reaction: Reaction) -> Self {
        self.reactions.insert(reaction.id.clone(), reaction);
        self
    }

    #[must_use]
    pub fn get(&self, id: &ReactionId) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Atmosphere revitalization reactions over [`CompoundCatalog::standard`].
    ///
    /// - `LIOH_CO2`: CO2 + 2 LiOH → H2O + Li2CO3
    /// - `H2_OXIDATION`: H2 + ½ O2 → H2O
    /// - `CO_OXIDATION`: CO + ½ O2 → CO2
    /// - `CH4_OXIDATION`: CH4 + 2 O2 → CO2 + 2 H2O
    ///
    /// [`CompoundCatalog::standard`]: super::CompoundCatalog::standard
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(Reaction {
                id: "LIOH_CO2".into(),
                reactant: "CO2".into(),
                reactant_moles: 1.0,
                reagent: "LiOH".into(),
                reagent_moles: 2.0,
                product1: "H2O".into(),
                product1_moles: 1.0,
                product2: Some(("Li2CO3".into(), 1.0)),
                reactant_efficiency: 0.95,
                heat: MolarEnergy::new::<kilojoule_per_mole>(89.5),
            })
            .with(Reaction {
                id: "H2_OXIDATION".into(),
                reactant: "H2".into(),
                reactant_moles: 1.0,
                reagent: "O2".into(),
                reagent_moles: 0.5,
                product1: "H2O".into(),
                product1_moles: 1.0,
                product2: None,
                reactant_efficiency: 0.99,
                heat: MolarEnergy::new::<kilojoule_per_mole>(241.8),
            })
            .with(Reaction {
                id: "CO_OXIDATION".into(),
                reactant: "CO".into(),
                reactant_moles: 1.0,
                reagent: "O2".into(),
                reagent_moles: 0.5,
                product1: "CO2".into(),
                product1_moles: 1.0,
                product2: None,
                reactant_efficiency: 0.99,
                heat: MolarEnergy::new::<kilojoule_per_mole>(283.0),
            })
            .with(Reaction {
                id: "CH4_OXIDATION".into(),
                reactant: "CH4".into(),
                reactant_moles: 1.0,
                reagent: "O2".into(),
                reagent_moles: 2.0,
                product1: "CO2".into(),
                product1_moles: 1.0,
                product2: Some(("H2O".into(), 2.0)),
                reactant_efficiency: 0.5,
                heat: MolarEnergy::new::<kilojoule_per_mole>(802.3),
            })
    }
}

use std::{collections::HashMap, fmt};

use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::ConstituentId;

/// Identifier of a chemical compound (e.g., `"LiOH"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompoundId(String);

impl CompoundId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompoundId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static properties of a chemical compound.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub id: CompoundId,
    pub molar_mass: MolarMass,

    /// Working-fluid constituent this compound travels as, if any.
    ///
    /// `None` for compounds that never enter the fluid, such as a solid sorbent.
    pub constituent: Option<ConstituentId>,
}

impl Compound {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        molar_mass: MolarMass,
        constituent: Option<ConstituentId>,
    ) -> Self {
        Self {
            id: CompoundId::new(id),
            molar_mass,
            constituent,
        }
    }
}

/// Read-only lookup of compound definitions by identifier.
#[derive(Debug, Clone, Default)]
pub struct CompoundCatalog {
    compounds: HashMap<CompoundId, Compound>,
}

impl CompoundCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a compound, replacing any existing definition with the same id.
    #[must_use]
    pub fn with(mut self, compound: Compound) -> Self {
        self.compounds.insert(compound.id.clone(), compound);
        self
    }

    #[must_use]
    pub fn get(&self, id: &CompoundId) -> Option<&Compound> {
        self.compounds.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Compounds used by [`ReactionCatalog::standard`](super::ReactionCatalog::standard).
    ///
    /// Gases map to the constituent of the same name; `LiOH` and `Li2CO3`
    /// are solids that never enter the fluid.
    #[must_use]
    pub fn standard() -> Self {
        let gas = |id: &str, molar_mass: f64| {
            Compound::new(
                id,
                MolarMass::new::<gram_per_mole>(molar_mass),
                Some(ConstituentId::new(id)),
            )
        };
        let solid = |id: &str, molar_mass: f64| {
            Compound::new(id, MolarMass::new::<gram_per_mole>(molar_mass), None)
        };

        Self::new()
            .with(gas("CO2", 44.0095))
            .with(gas("H2O", 18.0153))
            .with(gas("O2", 31.9988))
            .with(gas("H2", 2.01588))
            .with(gas("CH4", 16.0425))
            .with(gas("CO", 28.0101))
            .with(gas("N2", 28.0134))
            .with(solid("LiOH", 23.9483))
            .with(solid("Li2CO3", 73.8909))
    }
}

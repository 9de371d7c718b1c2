use std::fmt;

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        f64::{AmountOfSubstance, Mass, MolarMass, SpecificHeatCapacity},
        molar_mass::{gram_per_mole, kilogram_per_mole},
        specific_heat_capacity::joule_per_kilogram_kelvin,
    },
};

/// Identifier of a working-fluid constituent (e.g., `"CO2"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstituentId(String);

impl ConstituentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstituentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConstituentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A species the working fluid can carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Constituent {
    pub id: ConstituentId,
    pub molar_mass: MolarMass,
    pub cp: SpecificHeatCapacity,
}

impl Constituent {
    #[must_use]
    pub fn new(id: impl Into<String>, molar_mass: MolarMass, cp: SpecificHeatCapacity) -> Self {
        Self {
            id: ConstituentId::new(id),
            molar_mass,
            cp,
        }
    }

    fn gas(id: &str, molar_mass_g_per_mol: f64, cp_j_per_kg_k: f64) -> Self {
        Self::new(
            id,
            MolarMass::new::<gram_per_mole>(molar_mass_g_per_mol),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp_j_per_kg_k),
        )
    }

    #[must_use]
    pub fn nitrogen() -> Self {
        Self::gas("N2", 28.0134, 1040.0)
    }

    #[must_use]
    pub fn oxygen() -> Self {
        Self::gas("O2", 31.9988, 918.0)
    }

    #[must_use]
    pub fn carbon_dioxide() -> Self {
        Self::gas("CO2", 44.0095, 844.0)
    }

    #[must_use]
    pub fn water() -> Self {
        Self::gas("H2O", 18.0153, 1864.0)
    }

    #[must_use]
    pub fn hydrogen() -> Self {
        Self::gas("H2", 2.01588, 14_307.0)
    }

    #[must_use]
    pub fn methane() -> Self {
        Self::gas("CH4", 16.0425, 2226.0)
    }

    #[must_use]
    pub fn carbon_monoxide() -> Self {
        Self::gas("CO", 28.0101, 1040.0)
    }
}

/// Errors raised when a mixture composition is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MixtureError {
    #[error("mixture has no constituents")]
    Empty,

    #[error("{constituents} constituents but {fractions} mass fractions")]
    LengthMismatch { constituents: usize, fractions: usize },

    #[error("invalid mass fraction {value} for constituent {id}")]
    InvalidFraction { id: ConstituentId, value: f64 },

    #[error("constituent {0} appears more than once")]
    DuplicateConstituent(ConstituentId),

    #[error("mass fractions sum to zero")]
    ZeroTotal,
}

/// A multi-constituent working fluid described by its mass fractions.
///
/// Fractions are normalized at construction so they always sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    constituents: Vec<Constituent>,
    mass_fractions: Vec<f64>,
}

impl Mixture {
    /// Creates a mixture from constituents and their (unnormalized) mass fractions.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError`] if the inputs are empty, mismatched in length,
    /// contain duplicate constituents, or carry negative or non-finite fractions.
    pub fn new(
        constituents: Vec<Constituent>,
        mass_fractions: Vec<f64>,
    ) -> Result<Self, MixtureError> {
        if constituents.is_empty() {
            return Err(MixtureError::Empty);
        }
        if constituents.len() != mass_fractions.len() {
            return Err(MixtureError::LengthMismatch {
                constituents: constituents.len(),
                fractions: mass_fractions.len(),
            });
        }

        for (i, constituent) in constituents.iter().enumerate() {
            if constituents[..i].iter().any(|c| c.id == constituent.id) {
                return Err(MixtureError::DuplicateConstituent(constituent.id.clone()));
            }
        }

        for (constituent, &value) in constituents.iter().zip(&mass_fractions) {
            if !value.is_finite() || value < 0.0 {
                return Err(MixtureError::InvalidFraction {
                    id: constituent.id.clone(),
                    value,
                });
            }
        }

        let total: f64 = mass_fractions.iter().sum();
        if total <= 0.0 {
            return Err(MixtureError::ZeroTotal);
        }

        Ok(Self {
            constituents,
            mass_fractions: mass_fractions.into_iter().map(|x| x / total).collect(),
        })
    }

    #[must_use]
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    #[must_use]
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }

    /// Returns the position of a constituent in this mixture, if carried.
    #[must_use]
    pub fn index_of(&self, id: &ConstituentId) -> Option<usize> {
        self.constituents.iter().position(|c| &c.id == id)
    }

    /// Returns the mass fraction at `index`, or zero if out of range.
    #[must_use]
    pub fn mass_fraction(&self, index: usize) -> f64 {
        self.mass_fractions.get(index).copied().unwrap_or(0.0)
    }

    /// Returns the mixture molar mass, `1 / Σ(wᵢ / Mᵢ)`.
    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        let moles_per_kg: f64 = self
            .constituents
            .iter()
            .zip(&self.mass_fractions)
            .map(|(c, w)| w / c.molar_mass.get::<kilogram_per_mole>())
            .sum();
        MolarMass::new::<kilogram_per_mole>(1.0 / moles_per_kg)
    }
}

/// Per-constituent masses accumulated over a step.
///
/// The reactor keeps one composition for net reactant consumption and one
/// for net product generation, and reports each to the downstream node.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    constituents: Vec<Constituent>,
    masses: Vec<Mass>,
}

impl Composition {
    /// Creates an empty composition over the given constituents.
    #[must_use]
    pub fn new(constituents: Vec<Constituent>) -> Self {
        let masses = vec![Mass::ZERO; constituents.len()];
        Self {
            constituents,
            masses,
        }
    }

    /// Zeroes every constituent mass.
    pub fn reset(&mut self) {
        self.masses.fill(Mass::ZERO);
    }

    /// Adds `mass` to the constituent at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn add(&mut self, index: usize, mass: Mass) {
        self.masses[index] += mass;
    }

    #[must_use]
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    #[must_use]
    pub fn masses(&self) -> &[Mass] {
        &self.masses
    }

    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.masses.iter().fold(Mass::ZERO, |total, &m| total + m)
    }

    #[must_use]
    pub fn total_moles(&self) -> AmountOfSubstance {
        self.constituents
            .iter()
            .zip(&self.masses)
            .fold(AmountOfSubstance::ZERO, |total, (c, &m)| {
                total + m / c.molar_mass
            })
    }

    /// Returns the aggregate molar mass, or `None` if the composition is empty.
    #[must_use]
    pub fn molar_mass(&self) -> Option<MolarMass> {
        let moles = self.total_moles();
        if moles > AmountOfSubstance::ZERO {
            Some(self.total_mass() / moles)
        } else {
            None
        }
    }

    /// Converts accumulated masses into a [`Mixture`], or `None` if empty.
    #[must_use]
    pub fn to_mixture(&self) -> Option<Mixture> {
        if self.total_mass() <= Mass::ZERO {
            return None;
        }
        let fractions = self.masses.iter().map(|m| m.value).collect();
        Mixture::new(self.constituents.clone(), fractions).ok()
    }
}

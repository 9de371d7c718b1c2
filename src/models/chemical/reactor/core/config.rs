use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Mass, ThermalConductance, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::chemistry::{CompoundId, ReactionId};

use super::EfficiencyModel;

/// Static configuration of a reactor instance.
///
/// Reactions execute in the order listed. When two reactions compete for the
/// same compound, the earlier one sees the larger supply, so reordering
/// `reactions` changes results.
#[derive(Debug, Clone)]
pub struct ReactorConfig {
    /// Compounds this reactor tracks.
    pub compounds: Vec<CompoundId>,

    /// Reactions this reactor runs, in execution order.
    pub reactions: Vec<ReactionConfig>,

    /// How each reaction's efficiency is evaluated.
    pub efficiency: EfficiencyModel,

    /// Convective exchange with the reactor wall, if modeled.
    pub convection: Option<ConvectionConfig>,

    /// Link conductivity with no blockage.
    pub max_conductivity: Area,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            compounds: Vec::new(),
            reactions: Vec::new(),
            efficiency: EfficiencyModel::Nominal,
            convection: None,
            max_conductivity: Area::new::<square_meter>(0.0),
        }
    }
}

/// A reaction entry with optional per-instance efficiency overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionConfig {
    pub id: ReactionId,

    /// Replaces the catalog reactant efficiency; must lie in `[0, 1]`.
    pub reactant_efficiency: Option<f64>,

    /// Throttles efficiency by the remaining reagent, per kilogram; must be non-negative.
    ///
    /// When set, the reaction efficiency is multiplied by
    /// `reagent_efficiency × reagent mass (kg)`, which models a consumable
    /// reagent whose depletion limits the reaction.
    pub reagent_efficiency: Option<f64>,
}

impl ReactionConfig {
    /// A reaction entry using the catalog efficiency.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ReactionId::new(id),
            reactant_efficiency: None,
            reagent_efficiency: None,
        }
    }

    #[must_use]
    pub fn with_reactant_efficiency(mut self, efficiency: f64) -> Self {
        self.reactant_efficiency = Some(efficiency);
        self
    }

    #[must_use]
    pub fn with_reagent_efficiency(mut self, per_kilogram: f64) -> Self {
        self.reagent_efficiency = Some(per_kilogram);
        self
    }
}

/// Wall convection geometry and film coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectionConfig {
    /// Wetted wall area.
    pub surface_area: Area,

    /// Convective film coefficient between fluid and wall.
    pub coefficient: HeatTransfer,
}

impl ConvectionConfig {
    /// Returns the wall conductance `UA`.
    #[must_use]
    pub fn conductance(&self) -> ThermalConductance {
        self.coefficient * self.surface_area
    }
}

/// Initial conditions applied at initialization.
#[derive(Debug, Clone)]
pub struct ReactorInput {
    /// Initial wall temperature; must be non-negative.
    pub wall_temperature: ThermodynamicTemperature,

    /// Fraction of the link conductivity blocked, in `[0, 1]`.
    pub blockage: f64,

    /// Starting stock of compounds that are not carried by the fluid.
    ///
    /// Compounds carried by the fluid are replenished from the flow each
    /// step, so a starting mass for them only matters until the first step
    /// with flow.
    pub compound_masses: Vec<(CompoundId, Mass)>,
}

impl Default for ReactorInput {
    fn default() -> Self {
        Self {
            wall_temperature: ThermodynamicTemperature::new::<kelvin>(293.15),
            blockage: 0.0,
            compound_masses: Vec::new(),
        }
    }
}

//! Reaction efficiency strategies.

use uom::si::{
    f64::{Mass, ThermodynamicTemperature},
    mass::kilogram,
    thermodynamic_temperature::kelvin,
};

use super::ReactionState;

/// How a reactor evaluates each reaction's efficiency.
///
/// Both variants apply the optional per-reaction reagent throttle after the
/// base efficiency is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EfficiencyModel {
    /// The catalog efficiency, or the per-reaction override when positive.
    #[default]
    Nominal,

    /// A linear function of fluid temperature, clamped to `[0, 1]`.
    ///
    /// Efficiency is `bias + scale × T`, with `T` in kelvin taken from the
    /// last accepted step. Per-reaction reactant overrides are ignored.
    TemperatureDependent {
        bias: f64,
        /// Efficiency gained per kelvin.
        scale: f64,
    },
}

impl EfficiencyModel {
    /// Evaluates the efficiency of `reaction`.
    ///
    /// `reagent_mass` is the reagent total available before the reaction
    /// runs, and `temperature` is the fluid temperature of the last accepted
    /// step.
    #[must_use]
    pub fn efficiency(
        &self,
        reaction: &ReactionState,
        reagent_mass: Mass,
        temperature: ThermodynamicTemperature,
    ) -> f64 {
        let base = match *self {
            Self::Nominal => {
                if reaction.reactant_efficiency > 0.0 {
                    reaction.reactant_efficiency
                } else {
                    reaction.reaction.reactant_efficiency
                }
            }
            Self::TemperatureDependent { bias, scale } => {
                (bias + scale * temperature.get::<kelvin>()).clamp(0.0, 1.0)
            }
        };

        if reaction.reagent_efficiency > 0.0 {
            base * reaction.reagent_efficiency * reagent_mass.get::<kilogram>()
        } else {
            base
        }
    }
}

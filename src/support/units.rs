//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities. This module adds the
//! quantities reactor modeling needs that [`uom`] doesn't name, plus the
//! [`TemperatureDifference`] extension for subtracting absolute temperatures.
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use twine_reactor::support::units::TemperatureDifference;
//!
//! let wall = ThermodynamicTemperature::new::<kelvin>(350.0);
//! let fluid = ThermodynamicTemperature::new::<kelvin>(300.0);
//! let delta_t = wall.minus(fluid);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
    },
    typenum::{N1, N2, P1, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Molar flow rate, mol/s in SI.
///
/// Shares its dimension with [`uom::si::f64::CatalyticActivity`], so values
/// can be constructed with [`uom::si::catalytic_activity::katal`].
pub type MolarRate = Quantity<ISQ<Z0, Z0, N1, Z0, Z0, P1, Z0>, SI<f64>, f64>;

/// Extension trait for computing temperature differences.
///
/// Subtracting two [`ThermodynamicTemperature`] values in [`uom`] does not
/// yield a [`TemperatureInterval`], so this trait provides
/// [`minus`](Self::minus) to do it explicitly.
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

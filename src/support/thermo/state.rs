use uom::si::f64::{MassDensity, ThermodynamicTemperature};

/// The thermodynamic state of a fluid.
///
/// A `State<Fluid>` captures temperature, density, and any fluid-specific
/// data. For reactor links the fluid is a [`Mixture`](super::Mixture), which
/// carries the constituent mass fractions that define the state.
///
/// # Example
///
/// ```
/// use twine_reactor::support::thermo::{Constituent, Mixture, State};
/// use uom::si::{
///     f64::{MassDensity, ThermodynamicTemperature},
///     mass_density::kilogram_per_cubic_meter,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let air = Mixture::new(
///     vec![Constituent::nitrogen(), Constituent::oxygen()],
///     vec![0.77, 0.23],
/// )
/// .unwrap();
///
/// let state = State::new(
///     ThermodynamicTemperature::new::<kelvin>(300.0),
///     MassDensity::new::<kilogram_per_cubic_meter>(1.16),
///     air,
/// );
/// assert_eq!(state.fluid.constituents().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct State<Fluid> {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub fluid: Fluid,
}

impl<Fluid> State<Fluid> {
    /// Creates a new state with the given temperature, density, and fluid.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, density: MassDensity, fluid: Fluid) -> Self {
        Self {
            temperature,
            density,
            fluid,
        }
    }

    /// Returns a new state with the given temperature, keeping other fields unchanged.
    #[must_use]
    pub fn with_temperature(self, temperature: ThermodynamicTemperature) -> Self {
        Self {
            temperature,
            ..self
        }
    }
}

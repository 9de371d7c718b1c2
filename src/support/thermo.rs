//! Thermodynamic and fluid property modeling for reactor links.
//!
//! The reactor treats fluid properties as an external service. This module
//! defines that service as capability traits over a [`State`], and provides
//! the [`Mixture`] fluid the reactor works with plus an [`IdealMixture`]
//! model implementing the capabilities.
//!
//! [`IdealMixture`]: model::IdealMixture

mod error;
mod mixture;
mod state;

pub mod capability;
pub mod model;

pub use error::PropertyError;
pub use mixture::{Composition, Constituent, ConstituentId, Mixture, MixtureError};
pub use state::State;

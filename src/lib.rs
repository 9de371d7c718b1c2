//! # Twine Reactor
//!
//! Chemical reactor link models for network-based fluid simulation with
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A reactor sits between two fluid nodes. Each simulation step it consumes
//! compounds carried by the flowing fluid, produces new compounds, releases
//! reaction heat into the stream, and reports the net mass change back to
//! the surrounding nodes.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models (units, constraints,
//!   thermodynamic capabilities, mixtures, and chemistry catalogs).
//!
//! Model-specific utility code lives in each model's internal `core` module
//! and is not part of the public API.

pub mod models;
pub mod support;

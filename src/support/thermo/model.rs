//! Thermodynamic property models.

pub mod ideal_mixture;

pub use ideal_mixture::IdealMixture;

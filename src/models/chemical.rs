//! Chemical process models.
//!
//! This module contains link models that change the composition of a
//! flowing fluid through chemical reactions.

pub mod reactor;

//! Static chemistry definitions shared by reactor instances.
//!
//! A [`CompoundCatalog`] describes chemical compounds (molar mass and, when
//! the compound travels with the working fluid, the matching fluid
//! constituent). A [`ReactionCatalog`] describes reaction stoichiometry.
//! Both are read-only inputs to reactor initialization; a reactor copies the
//! definitions it uses and never holds a reference back into a catalog.

mod compound;
mod reaction;

pub use compound::{Compound, CompoundCatalog, CompoundId};
pub use reaction::{Reaction, ReactionCatalog, ReactionId};

use thiserror::Error;
use uom::si::f64::{Mass, ThermodynamicTemperature};

use crate::support::{
    chemistry::{CompoundId, ReactionId},
    constraint::ConstraintError,
    thermo::ConstituentId,
};

/// Errors that can occur while initializing a reactor.
///
/// Initialization either succeeds completely or fails with one of these;
/// there is no partially initialized reactor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("no compounds configured")]
    NoCompounds,

    #[error("no reactions configured")]
    NoReactions,

    #[error("compound {0} is not defined in the compound catalog")]
    UndefinedCompound(CompoundId),

    #[error("reaction {0} is not defined in the reaction catalog")]
    UndefinedReaction(ReactionId),

    #[error("compound {0} is configured more than once")]
    DuplicateCompound(CompoundId),

    /// A reaction names a compound this reactor does not track.
    #[error("reaction {reaction} uses compound {compound}, which is not configured")]
    CompoundNotConfigured {
        reaction: ReactionId,
        compound: CompoundId,
    },

    /// A reaction compound travels with the fluid, but the local fluid does not carry it.
    #[error("reaction {reaction} needs constituent {constituent} for {compound}, absent from the fluid")]
    ConstituentNotInFluid {
        reaction: ReactionId,
        compound: CompoundId,
        constituent: ConstituentId,
    },

    #[error("invalid molar mass for compound {compound}")]
    InvalidMolarMass {
        compound: CompoundId,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid stoichiometry for reaction {reaction}")]
    InvalidStoichiometry {
        reaction: ReactionId,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid efficiency for reaction {reaction}")]
    InvalidEfficiency {
        reaction: ReactionId,
        #[source]
        source: ConstraintError,
    },

    #[error("initial mass given for compound {0}, which is not configured")]
    InitialMassNotConfigured(CompoundId),

    #[error("invalid initial mass {mass:?} for compound {compound}")]
    InvalidInitialMass { compound: CompoundId, mass: Mass },

    #[error("invalid wall temperature {0:?}")]
    InvalidWallTemperature(ThermodynamicTemperature),

    #[error("invalid blockage fraction {value}")]
    InvalidBlockage {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid wall convection configuration")]
    InvalidConvection(#[source] ConstraintError),

    #[error("invalid maximum conductivity")]
    InvalidConductivity(#[source] ConstraintError),
}

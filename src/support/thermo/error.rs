use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the model's valid domain.
    ///
    /// For example, an enthalpy that maps below absolute zero.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

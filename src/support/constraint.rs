//! Type-level numeric constraints checked once at construction.
//!
//! A [`Constrained<T, C>`] value is guaranteed to satisfy the marker `C` for
//! its entire lifetime, so reactor inputs validated at initialization never
//! need to be re-checked while stepping.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Custom invariants can be added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::{One, Zero};
use thiserror::Error;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use twine_reactor::support::constraint::{Constrained, UnitInterval};
///
/// let blockage = Constrained::<f64, UnitInterval>::new(0.25).unwrap();
/// assert_eq!(blockage.into_inner(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker type enforcing that a value is zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(value: T) -> ConstraintResult<Constrained<T, NonNegative>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing that a value is strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> ConstraintResult<Constrained<T, StrictlyPositive>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing that a value lies in the closed unit interval `[0, 1]`.
///
/// Used for fractions such as blockage and reaction efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a [`Constrained<T, UnitInterval>`] if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined.
    pub fn new<T: PartialOrd + Zero + One>(
        value: T,
    ) -> ConstraintResult<Constrained<T, UnitInterval>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

//! Supporting utilities used by models.
//!
//! These modules are public because they're useful when assembling reactor
//! inputs and fluid-property services, but their APIs are not stable.

pub mod chemistry;
pub mod constraint;
pub mod thermo;
pub mod units;

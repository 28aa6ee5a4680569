//! Numerical primitives: unit-propagating finite differences and profile
//! interpolation.

pub mod gradient;
pub(crate) mod interpolate;

pub use gradient::{first_derivative, gradient, Spacing};

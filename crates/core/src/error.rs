//! Error taxonomy for the diagnostic calculations
//!
//! Three failure classes cover every entry point: an argument carries the
//! wrong physical dimension, array shapes and spacing counts disagree, or a
//! requested value lies outside the data's domain (helicity layer bounds).
//! All errors surface synchronously to the immediate caller; the operations
//! are pure, so there is nothing to retry.

use crate::core_types::dimension::Dimension;

/// Errors raised by the kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// An argument's physical dimension is incompatible with the operation
    UnitMismatch {
        /// Name of the offending argument
        argument: &'static str,
        /// Dimension the operation requires
        expected: Dimension,
        /// Dimension the argument actually carries
        found: Dimension,
    },
    /// Field rank, spacing count, or component shapes disagree
    Shape(String),
    /// A requested value lies outside the supplied data's range
    Domain(String),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::UnitMismatch {
                argument,
                expected,
                found,
            } => write!(
                f,
                "argument `{argument}` must have dimension {expected}, got {found}"
            ),
            CalcError::Shape(msg) => write!(f, "shape mismatch: {msg}"),
            CalcError::Domain(msg) => write!(f, "out of domain: {msg}"),
        }
    }
}

impl std::error::Error for CalcError {}

/// Result alias used throughout the crate.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_argument_and_dimensions() {
        let err = CalcError::UnitMismatch {
            argument: "u",
            expected: Dimension::SPEED,
            found: Dimension::PRESSURE,
        };
        assert_eq!(
            err.to_string(),
            "argument `u` must have dimension m/s, got Pa"
        );
    }

    #[test]
    fn shape_and_domain_wrap_their_detail() {
        assert_eq!(
            CalcError::Shape("3 spacings for a 2-dimensional field".into()).to_string(),
            "shape mismatch: 3 spacings for a 2-dimensional field"
        );
        assert_eq!(
            CalcError::Domain("layer top above profile".into()).to_string(),
            "out of domain: layer top above profile"
        );
    }
}

//! Dimension-order normalization
//!
//! Gridded inputs arrive in one of two axis orders: `YX` (row index is y —
//! the canonical internal order) or `XY` (leading dimension is x). Every
//! public formula accepts an `Option<Orientation>` at the call boundary,
//! normalizes array arguments to canonical order, computes, and restores the
//! caller's order on the way out.
//!
//! Transposition is a full axis reversal, so for any formula `F` and 2-D
//! array `A`:
//!
//! ```text
//! F(A, XY) == transpose(F(transpose(A), YX))
//! ```
//!
//! Scalars and 1-D profiles pass through untouched in either orientation.
//! An unspecified orientation currently falls back to `XY` and logs a
//! deprecation-style diagnostic; the fallback will move to `YX` in a future
//! release, so callers should always pass the orientation explicitly.

use super::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// Axis ordering of caller-supplied 2-D (or higher) arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Leading dimension is x (column index is y)
    XY,
    /// Leading dimension is y (row index is y) — the canonical internal order
    YX,
}

impl Orientation {
    /// Apply the default for an unspecified orientation.
    ///
    /// Emits a `tracing` warning when the caller relied on the default; the
    /// computed values are unaffected.
    #[must_use]
    pub fn resolve(requested: Option<Orientation>) -> Orientation {
        match requested {
            Some(orientation) => orientation,
            None => {
                tracing::warn!(
                    "orientation not specified; assuming \"xy\". The default will change \
                     to \"yx\" in a future release - pass the orientation explicitly."
                );
                Orientation::XY
            }
        }
    }

    /// True when caller arrays must be transposed into canonical order.
    #[inline]
    #[must_use]
    pub(crate) fn flips(self) -> bool {
        matches!(self, Orientation::XY)
    }
}

/// Map a quantity between caller orientation and canonical order.
///
/// Transposition is an involution, so the same call converts in both
/// directions. Quantities with fewer than two axes are returned unchanged.
#[must_use]
pub(crate) fn reorient(quantity: &Quantity, orientation: Orientation) -> Quantity {
    if orientation.flips() && quantity.ndim() >= 2 {
        quantity.transposed()
    } else {
        quantity.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units;
    use ndarray::array;

    #[test]
    fn yx_passes_through() {
        let q = Quantity::new(array![[1.0, 2.0], [3.0, 4.0]].into_dyn(), &units::METER);
        assert_eq!(reorient(&q, Orientation::YX), q);
    }

    #[test]
    fn xy_transposes_and_round_trips() {
        let q = Quantity::new(array![[1.0, 2.0], [3.0, 4.0]].into_dyn(), &units::METER);
        let flipped = reorient(&q, Orientation::XY);
        assert_eq!(
            flipped.values(),
            &array![[1.0, 3.0], [2.0, 4.0]].into_dyn()
        );
        assert_eq!(reorient(&flipped, Orientation::XY), q);
    }

    #[test]
    fn profiles_and_scalars_are_untouched() {
        let profile = Quantity::from_slice(&[1.0, 2.0, 3.0], &units::METER);
        assert_eq!(reorient(&profile, Orientation::XY), profile);
        let scalar = Quantity::scalar(5.0, &units::SECOND);
        assert_eq!(reorient(&scalar, Orientation::XY), scalar);
    }

    #[test]
    fn unspecified_orientation_defaults_to_xy() {
        assert_eq!(Orientation::resolve(None), Orientation::XY);
        assert_eq!(Orientation::resolve(Some(Orientation::YX)), Orientation::YX);
    }
}

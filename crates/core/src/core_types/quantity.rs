//! Dimension-checked array quantities
//!
//! A [`Quantity`] is an n-dimensional `f64` array tagged with a
//! [`Dimension`]. Magnitudes are normalized to SI base scale when the
//! quantity is constructed from a [`Unit`], and leave the type only through
//! explicit conversion calls ([`Quantity::magnitudes_in`],
//! [`Quantity::scalar_in`]) or through [`Quantity::values`], which is
//! documented to yield SI magnitudes. There is no silent unwrapping.
//!
//! Arithmetic propagates dimensions: multiplication and division compose
//! exponents, addition and subtraction require identical dimension and panic
//! otherwise (public entry points validate argument dimensions up front and
//! surface [`CalcError::UnitMismatch`](crate::error::CalcError) before any
//! operator can be reached). Binary operations broadcast shapes following
//! ndarray rules.

use super::dimension::Dimension;
use super::units::Unit;
use crate::error::{CalcError, CalcResult};
use ndarray::{ArrayD, IxDyn, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An n-dimensional physical quantity: SI-scaled magnitudes plus dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    values: ArrayD<f64>,
    dim: Dimension,
}

impl Quantity {
    /// Wrap an array of magnitudes expressed in `unit`.
    #[must_use]
    pub fn new(values: ArrayD<f64>, unit: &Unit) -> Self {
        Quantity {
            values: values.mapv(|v| v * unit.scale),
            dim: unit.dimension,
        }
    }

    /// A zero-dimensional (scalar) quantity.
    #[must_use]
    pub fn scalar(value: f64, unit: &Unit) -> Self {
        Quantity::new(ArrayD::from_elem(IxDyn(&[]), value), unit)
    }

    /// A one-dimensional quantity from a slice of magnitudes in `unit`.
    #[must_use]
    pub fn from_slice(values: &[f64], unit: &Unit) -> Self {
        Quantity::new(ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec())
            .expect("slice length matches its own shape"), unit)
    }

    /// Wrap magnitudes that are already SI-scaled.
    pub(crate) fn from_raw(values: ArrayD<f64>, dim: Dimension) -> Self {
        Quantity { values, dim }
    }

    /// Physical dimension of this quantity.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Magnitudes at SI base scale.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Number of axes (0 for a scalar).
    #[inline]
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Shape of the underlying array.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Total number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty array.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True for a zero-dimensional quantity.
    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.values.ndim() == 0
    }

    /// Magnitudes converted out to `unit`.
    ///
    /// # Errors
    /// [`CalcError::UnitMismatch`] when `unit` measures a different dimension.
    pub fn magnitudes_in(&self, unit: &Unit) -> CalcResult<ArrayD<f64>> {
        if unit.dimension != self.dim {
            return Err(CalcError::UnitMismatch {
                argument: "unit conversion",
                expected: unit.dimension,
                found: self.dim,
            });
        }
        Ok(self.values.mapv(|v| v / unit.scale))
    }

    /// Scalar magnitude converted out to `unit`.
    ///
    /// # Errors
    /// [`CalcError::UnitMismatch`] on dimension mismatch,
    /// [`CalcError::Shape`] when the quantity is not zero-dimensional.
    pub fn scalar_in(&self, unit: &Unit) -> CalcResult<f64> {
        if !self.is_scalar() {
            return Err(CalcError::Shape(format!(
                "expected a scalar quantity, got shape {:?}",
                self.shape()
            )));
        }
        let converted = self.magnitudes_in(unit)?;
        Ok(converted[IxDyn(&[])])
    }

    /// The same quantity with its axis order reversed (full transpose).
    #[must_use]
    pub fn transposed(&self) -> Quantity {
        Quantity {
            values: self.values.t().to_owned(),
            dim: self.dim,
        }
    }

    /// Elementwise square root; halves every dimension exponent.
    ///
    /// Panics if any exponent is odd (the root would not be a physical
    /// dimension).
    #[must_use]
    #[track_caller]
    pub fn sqrt(&self) -> Quantity {
        let Some(dim) = self.dim.sqrt() else {
            panic!("square root undefined for dimension {}", self.dim)
        };
        Quantity {
            values: self.values.mapv(f64::sqrt),
            dim,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.values, self.dim)
    }
}

/// Check that an argument carries the dimension an operation requires.
pub(crate) fn require_dimension(
    argument: &'static str,
    quantity: &Quantity,
    expected: Dimension,
) -> CalcResult<()> {
    if quantity.dimension() == expected {
        Ok(())
    } else {
        Err(CalcError::UnitMismatch {
            argument,
            expected,
            found: quantity.dimension(),
        })
    }
}

/// Combine two magnitude arrays elementwise, broadcasting either side.
#[track_caller]
pub(crate) fn zip_broadcast(
    a: &ArrayD<f64>,
    b: &ArrayD<f64>,
    op: impl Fn(f64, f64) -> f64,
) -> ArrayD<f64> {
    if a.shape() == b.shape() {
        Zip::from(a).and(b).map_collect(|&x, &y| op(x, y))
    } else if let Some(bv) = b.broadcast(a.raw_dim()) {
        Zip::from(a).and(&bv).map_collect(|&x, &y| op(x, y))
    } else if let Some(av) = a.broadcast(b.raw_dim()) {
        Zip::from(&av).and(b).map_collect(|&x, &y| op(x, y))
    } else {
        panic!(
            "operands cannot be broadcast together: {:?} vs {:?}",
            a.shape(),
            b.shape()
        )
    }
}

impl Add for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn add(self, rhs: &Quantity) -> Quantity {
        assert!(
            self.dim == rhs.dim,
            "cannot add quantities of differing dimension ({} vs {})",
            self.dim,
            rhs.dim
        );
        Quantity {
            values: zip_broadcast(&self.values, &rhs.values, |a, b| a + b),
            dim: self.dim,
        }
    }
}

impl Sub for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn sub(self, rhs: &Quantity) -> Quantity {
        assert!(
            self.dim == rhs.dim,
            "cannot subtract quantities of differing dimension ({} vs {})",
            self.dim,
            rhs.dim
        );
        Quantity {
            values: zip_broadcast(&self.values, &rhs.values, |a, b| a - b),
            dim: self.dim,
        }
    }
}

impl Mul for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity {
            values: zip_broadcast(&self.values, &rhs.values, |a, b| a * b),
            dim: self.dim * rhs.dim,
        }
    }
}

impl Div for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity {
            values: zip_broadcast(&self.values, &rhs.values, |a, b| a / b),
            dim: self.dim / rhs.dim,
        }
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity {
            values: self.values.mapv(|v| v * rhs),
            dim: self.dim,
        }
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        Quantity {
            values: self.values.mapv(|v| v / rhs),
            dim: self.dim,
        }
    }
}

impl Neg for &Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity {
            values: self.values.mapv(|v| -v),
            dim: self.dim,
        }
    }
}

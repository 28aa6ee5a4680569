//! Unit-propagating finite differences
//!
//! [`gradient`] computes the axis-wise derivative of an n-dimensional field.
//! Interior points use a centered difference (second-order accurate),
//! boundary points a one-sided difference (first-order), matching the
//! standard gradient semantics for sampled fields:
//!
//! ```text
//! ∂f/∂x |interior ≈ (f[i+1] - f[i-1]) / (2h)
//! ∂f/∂x |edge     ≈ (f[1] - f[0]) / h
//! ```
//!
//! Each derivative carries the field's dimension divided by the spacing's
//! dimension, so differentiating a wind field (m/s) along a distance axis
//! (m) yields vorticity-type quantities (1/s) without any caller-side unit
//! bookkeeping.
//!
//! Axis spacing is either a uniform scalar step or an explicit coordinate
//! array for unevenly sampled axes; the uneven-interval interior stencil is
//! the second-order weighted form and reduces exactly to the centered
//! difference when the intervals are equal.
//!
//! When fewer spacings than axes are supplied, the missing leading (outer)
//! axes get a dimensionless unit step. This is what lets a higher-rank field
//! (say, stacked vertical levels) be differentiated over only its trailing
//! spatial axes in a single call.

use crate::core_types::quantity::Quantity;
use crate::core_types::units;
use crate::core_types::Dimension;
use crate::error::{CalcError, CalcResult};
use ndarray::{ArrayD, ArrayView1, ArrayViewMut1, Axis, Zip};
use serde::{Deserialize, Serialize};

/// Grid spacing along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacing(SpacingKind);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum SpacingKind {
    Uniform(Quantity),
    Coordinates(Quantity),
}

impl Spacing {
    /// Uniform step of `value` in `unit`.
    #[must_use]
    pub fn step(value: f64, unit: &units::Unit) -> Self {
        Spacing(SpacingKind::Uniform(Quantity::scalar(value, unit)))
    }

    /// Uniform step from a scalar quantity.
    ///
    /// # Errors
    /// [`CalcError::Shape`] when the quantity is not zero-dimensional.
    pub fn uniform(step: Quantity) -> CalcResult<Self> {
        if !step.is_scalar() {
            return Err(CalcError::Shape(format!(
                "uniform spacing must be a scalar, got shape {:?}",
                step.shape()
            )));
        }
        Ok(Spacing(SpacingKind::Uniform(step)))
    }

    /// Explicit coordinates for an unevenly sampled axis.
    ///
    /// # Errors
    /// [`CalcError::Shape`] unless the quantity is 1-D with at least two
    /// samples.
    pub fn coordinates(coords: Quantity) -> CalcResult<Self> {
        if coords.ndim() != 1 || coords.len() < 2 {
            return Err(CalcError::Shape(format!(
                "coordinate spacing must be 1-D with at least two samples, got shape {:?}",
                coords.shape()
            )));
        }
        Ok(Spacing(SpacingKind::Coordinates(coords)))
    }

    /// Physical dimension of the spacing.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        match &self.0 {
            SpacingKind::Uniform(q) | SpacingKind::Coordinates(q) => q.dimension(),
        }
    }
}

/// Check that a spacing argument carries the dimension an operation requires.
pub(crate) fn require_spacing_dimension(
    argument: &'static str,
    spacing: &Spacing,
    expected: Dimension,
) -> CalcResult<()> {
    if spacing.dimension() == expected {
        Ok(())
    } else {
        Err(CalcError::UnitMismatch {
            argument,
            expected,
            found: spacing.dimension(),
        })
    }
}

/// Axis-wise derivatives of an n-dimensional field, in axis order.
///
/// Returns one quantity per axis, each with the field's shape and dimension
/// `field_dim / spacing_dim`. Spacings apply to the trailing axes; missing
/// leading axes are assigned a dimensionless unit step.
///
/// # Errors
/// [`CalcError::Shape`] when the field is zero-dimensional, when more
/// spacings than axes are supplied, when any differentiated axis is shorter
/// than two samples, or when a coordinate array's length does not match its
/// axis.
pub fn gradient(field: &Quantity, spacings: &[Spacing]) -> CalcResult<Vec<Quantity>> {
    let ndim = field.ndim();
    if ndim == 0 {
        return Err(CalcError::Shape(
            "gradient requires a field with at least one axis".to_string(),
        ));
    }
    if spacings.len() > ndim {
        return Err(CalcError::Shape(format!(
            "{} spacing arguments supplied for a {ndim}-dimensional field",
            spacings.len()
        )));
    }
    let pad = ndim - spacings.len();
    let unit_step = Spacing::step(1.0, &units::DIMENSIONLESS);
    (0..ndim)
        .map(|axis| {
            let spacing = if axis < pad {
                &unit_step
            } else {
                &spacings[axis - pad]
            };
            axis_derivative(field, axis, spacing)
        })
        .collect()
}

/// Derivative of a 1-D field: the single-axis form of [`gradient`].
///
/// # Errors
/// [`CalcError::Shape`] when the field is not 1-D, plus every error
/// [`gradient`] can report.
pub fn first_derivative(field: &Quantity, spacing: &Spacing) -> CalcResult<Quantity> {
    if field.ndim() != 1 {
        return Err(CalcError::Shape(format!(
            "first_derivative expects a 1-D field, got shape {:?}",
            field.shape()
        )));
    }
    let mut components = gradient(field, std::slice::from_ref(spacing))?;
    Ok(components.remove(0))
}

/// Differentiate along one axis, propagating units.
fn axis_derivative(field: &Quantity, axis: usize, spacing: &Spacing) -> CalcResult<Quantity> {
    let n = field.shape()[axis];
    if n < 2 {
        return Err(CalcError::Shape(format!(
            "axis {axis} has {n} sample(s); at least two are required to differentiate"
        )));
    }
    let dim = field.dimension() / spacing.dimension();
    let mut out = ArrayD::<f64>::zeros(field.values().raw_dim());
    let ax = Axis(axis);
    match &spacing.0 {
        SpacingKind::Uniform(step) => {
            let h = step.values()[ndarray::IxDyn(&[])];
            Zip::from(out.lanes_mut(ax))
                .and(field.values().lanes(ax))
                .par_for_each(|mut d, f| uniform_lane(&mut d, &f, h));
        }
        SpacingKind::Coordinates(coords) => {
            if coords.len() != n {
                return Err(CalcError::Shape(format!(
                    "coordinate array has {} samples but axis {axis} has {n}",
                    coords.len()
                )));
            }
            let x: Vec<f64> = coords.values().iter().copied().collect();
            Zip::from(out.lanes_mut(ax))
                .and(field.values().lanes(ax))
                .par_for_each(|mut d, f| coordinate_lane(&mut d, &f, &x));
        }
    }
    Ok(Quantity::from_raw(out, dim))
}

/// Centered/one-sided stencil for a uniform step.
fn uniform_lane(d: &mut ArrayViewMut1<f64>, f: &ArrayView1<f64>, h: f64) {
    let n = f.len();
    d[0] = (f[1] - f[0]) / h;
    for i in 1..n - 1 {
        d[i] = (f[i + 1] - f[i - 1]) / (2.0 * h);
    }
    d[n - 1] = (f[n - 1] - f[n - 2]) / h;
}

/// Second-order weighted stencil for uneven intervals.
fn coordinate_lane(d: &mut ArrayViewMut1<f64>, f: &ArrayView1<f64>, x: &[f64]) {
    let n = f.len();
    d[0] = (f[1] - f[0]) / (x[1] - x[0]);
    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        d[i] = (hs * hs * f[i + 1] + (hd * hd - hs * hs) * f[i] - hd * hd * f[i - 1])
            / (hs * hd * (hd + hs));
    }
    d[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);
}

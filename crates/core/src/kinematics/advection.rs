//! Advection of a scalar field by the wind
//!
//! The advective tendency of a quantity `s` carried by a flow `V` is
//!
//! ```text
//! -V · ∇s = -Σ_k  wind_k · ∂s/∂axis_k
//! ```
//!
//! and carries dimension `s`-dimension per time.
//!
//! Wind components and grid deltas are supplied **innermost canonical axis
//! first**: `[u, v, …]` and `[dx, dy, …]`. Component `j` is the flow along
//! axis `ndim - 1 - j`, so for a canonical (y, x) grid `wind[0]` is the
//! x-directed component. This fixed pairing replaces any inference from the
//! relative ranks of the stacked inputs; the alignment is part of the
//! contract.

use crate::core_types::orientation::{reorient, Orientation};
use crate::core_types::quantity::{require_dimension, Quantity};
use crate::core_types::Dimension;
use crate::error::{CalcError, CalcResult};
use crate::numerics::gradient::{gradient, require_spacing_dimension, Spacing};

/// Advection of `scalar` by `wind` (scalar dimension per time).
///
/// `wind` holds one component per axis of `scalar` and `deltas` one spacing
/// per axis, both ordered innermost-first (x-component and x-spacing first).
/// Works for any rank ≥ 1; a 1-D profile takes a single component and a
/// single delta.
///
/// # Errors
/// [`CalcError::UnitMismatch`] unless every wind component is a speed and
/// every delta a length; [`CalcError::Shape`] when the component or delta
/// count does not match the scalar's rank, or when any component's shape
/// differs from the scalar's.
pub fn advection(
    scalar: &Quantity,
    wind: &[Quantity],
    deltas: &[Spacing],
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let s = reorient(scalar, orient);
    let components: Vec<Quantity> = wind.iter().map(|w| reorient(w, orient)).collect();

    let ndim = s.ndim();
    if ndim == 0 {
        return Err(CalcError::Shape(
            "advection requires a field with at least one axis".to_string(),
        ));
    }
    if components.len() != ndim {
        return Err(CalcError::Shape(format!(
            "{} wind component(s) supplied for a {ndim}-dimensional field",
            components.len()
        )));
    }
    if deltas.len() != ndim {
        return Err(CalcError::Shape(format!(
            "{} grid delta(s) supplied for a {ndim}-dimensional field",
            deltas.len()
        )));
    }
    for component in &components {
        require_dimension("wind", component, Dimension::SPEED)?;
        if component.shape() != s.shape() {
            return Err(CalcError::Shape(format!(
                "wind component shape {:?} does not match scalar shape {:?}",
                component.shape(),
                s.shape()
            )));
        }
    }
    for delta in deltas {
        require_spacing_dimension("deltas", delta, Dimension::LENGTH)?;
    }

    // Deltas arrive innermost-first; gradient wants axis order.
    let axis_ordered: Vec<Spacing> = deltas.iter().rev().cloned().collect();
    let grads = gradient(&s, &axis_ordered)?;

    // Gradient axis k pairs with component ndim-1-k.
    let mut tendency: Option<Quantity> = None;
    for (k, grad) in grads.iter().enumerate() {
        let term = grad * &components[ndim - 1 - k];
        tendency = Some(match tendency {
            Some(sum) => &sum + &term,
            None => term,
        });
    }
    let tendency = tendency.expect("at least one axis");
    Ok(reorient(&(-&tendency), orient))
}

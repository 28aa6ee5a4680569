//! Derived kinematic fields of the horizontal wind
//!
//! All fields here are algebraic combinations of the four partial
//! derivatives of the wind components on a constant-spacing grid:
//!
//! ```text
//! vorticity   ζ = ∂v/∂x - ∂u/∂y
//! divergence  δ = ∂u/∂x + ∂v/∂y
//! shearing    Dsh = ∂v/∂x + ∂u/∂y
//! stretching  Dst = ∂u/∂x - ∂v/∂y
//! total       D = sqrt(Dsh² + Dst²)
//! ```
//!
//! The paired entry points (`convergence_vorticity`,
//! `shearing_stretching_deformation`) share one set of partials, so their
//! results are bit-identical to calling the single-field functions
//! separately while doing half the differencing work.
//!
//! Reference: Bluestein (1992), *Synoptic-Dynamic Meteorology in
//! Midlatitudes*, vol. 1, ch. 1.

use crate::core_types::orientation::{reorient, Orientation};
use crate::core_types::quantity::{require_dimension, Quantity};
use crate::core_types::Dimension;
use crate::error::{CalcError, CalcResult};
use crate::numerics::gradient::{gradient, require_spacing_dimension, Spacing};

/// The four wind partials every derived field is built from.
struct WindGradients {
    dudx: Quantity,
    dudy: Quantity,
    dvdx: Quantity,
    dvdy: Quantity,
}

/// Differentiate both wind components on the canonical (y, x) grid.
fn wind_gradients(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
) -> CalcResult<WindGradients> {
    require_dimension("u", u, Dimension::SPEED)?;
    require_dimension("v", v, Dimension::SPEED)?;
    require_spacing_dimension("dx", dx, Dimension::LENGTH)?;
    require_spacing_dimension("dy", dy, Dimension::LENGTH)?;
    if u.ndim() != 2 {
        return Err(CalcError::Shape(format!(
            "wind components must be 2-D grids, got shape {:?}",
            u.shape()
        )));
    }
    if u.shape() != v.shape() {
        return Err(CalcError::Shape(format!(
            "wind components differ in shape: {:?} vs {:?}",
            u.shape(),
            v.shape()
        )));
    }
    let mut gu = gradient(u, &[dy.clone(), dx.clone()])?;
    let dudx = gu.pop().expect("one gradient component per axis");
    let dudy = gu.pop().expect("one gradient component per axis");
    let mut gv = gradient(v, &[dy.clone(), dx.clone()])?;
    let dvdx = gv.pop().expect("one gradient component per axis");
    let dvdy = gv.pop().expect("one gradient component per axis");
    Ok(WindGradients {
        dudx,
        dudy,
        dvdx,
        dvdy,
    })
}

/// Vertical vorticity of the horizontal wind, `∂v/∂x - ∂u/∂y` (1/s).
///
/// # Errors
/// [`CalcError::UnitMismatch`] unless `u`/`v` are speeds and `dx`/`dy`
/// lengths; [`CalcError::Shape`] unless both components are matching 2-D
/// grids.
pub fn v_vorticity(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok(reorient(&(&g.dvdx - &g.dudy), orient))
}

/// Horizontal divergence of the horizontal wind, `∂u/∂x + ∂v/∂y` (1/s).
///
/// # Errors
/// As for [`v_vorticity`].
pub fn h_convergence(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok(reorient(&(&g.dudx + &g.dvdy), orient))
}

/// Divergence and vorticity from one shared set of partials.
///
/// Numerically identical to calling [`h_convergence`] and [`v_vorticity`]
/// separately.
///
/// # Errors
/// As for [`v_vorticity`].
pub fn convergence_vorticity(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<(Quantity, Quantity)> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok((
        reorient(&(&g.dudx + &g.dvdy), orient),
        reorient(&(&g.dvdx - &g.dudy), orient),
    ))
}

/// Shearing deformation, `∂v/∂x + ∂u/∂y` (1/s).
///
/// # Errors
/// As for [`v_vorticity`].
pub fn shearing_deformation(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok(reorient(&(&g.dvdx + &g.dudy), orient))
}

/// Stretching deformation, `∂u/∂x - ∂v/∂y` (1/s).
///
/// # Errors
/// As for [`v_vorticity`].
pub fn stretching_deformation(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok(reorient(&(&g.dudx - &g.dvdy), orient))
}

/// Shearing and stretching deformation from one shared set of partials.
///
/// # Errors
/// As for [`v_vorticity`].
pub fn shearing_stretching_deformation(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<(Quantity, Quantity)> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    Ok((
        reorient(&(&g.dvdx + &g.dudy), orient),
        reorient(&(&g.dudx - &g.dvdy), orient),
    ))
}

/// Total deformation, `sqrt(shearing² + stretching²)` (1/s), non-negative
/// by construction.
///
/// # Errors
/// As for [`v_vorticity`].
pub fn total_deformation(
    u: &Quantity,
    v: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<Quantity> {
    let orient = Orientation::resolve(orientation);
    let g = wind_gradients(&reorient(u, orient), &reorient(v, orient), dx, dy)?;
    let shearing = &g.dvdx + &g.dudy;
    let stretching = &g.dudx - &g.dvdy;
    let sh2 = &shearing * &shearing;
    let st2 = &stretching * &stretching;
    Ok(reorient(&(&sh2 + &st2).sqrt(), orient))
}

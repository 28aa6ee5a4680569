//! Geostrophic balance
//!
//! The geostrophic wind is the horizontal flow that balances the
//! pressure-gradient and Coriolis forces on a constant-pressure surface:
//!
//! ```text
//! u_g = -(g/f) ∂z/∂y      v_g = (g/f) ∂z/∂x        (height field z)
//! u_g = -(1/f) ∂Φ/∂y      v_g = (1/f) ∂Φ/∂x        (geopotential Φ)
//! ```
//!
//! The two forms are distinguished by the input's dimension: plain length
//! selects the `g/f` normalization, length²/time² (geopotential) selects
//! `1/f`. Any other dimension is rejected.
//!
//! A vanishing Coriolis parameter (the equator) is not intercepted; the
//! balance is undefined there and the division follows IEEE semantics.

use crate::core_types::orientation::{reorient, Orientation};
use crate::core_types::quantity::{require_dimension, Quantity};
use crate::core_types::{units, Dimension};
use crate::error::{CalcError, CalcResult};
use crate::numerics::gradient::{gradient, require_spacing_dimension, Spacing};

/// Geostrophic wind components `(u_g, v_g)` from a height or geopotential
/// field.
///
/// `f` is the Coriolis parameter (1/s), a scalar or any array broadcastable
/// against the field. Fields of rank greater than two (stacked levels) are
/// supported: leading axes get a dimensionless unit spacing and only the
/// trailing (y, x) gradient components enter the balance.
///
/// # Errors
/// [`CalcError::UnitMismatch`] unless the field carries length or
/// geopotential dimension, `f` is 1/time, and `dx`/`dy` are lengths;
/// [`CalcError::Shape`] when the field has fewer than two axes.
pub fn geostrophic_wind(
    heights: &Quantity,
    f: &Quantity,
    dx: &Spacing,
    dy: &Spacing,
    orientation: Option<Orientation>,
) -> CalcResult<(Quantity, Quantity)> {
    let orient = Orientation::resolve(orientation);
    let field = reorient(heights, orient);
    let coriolis = reorient(f, orient);

    require_dimension("f", &coriolis, Dimension::FREQUENCY)?;
    require_spacing_dimension("dx", dx, Dimension::LENGTH)?;
    require_spacing_dimension("dy", dy, Dimension::LENGTH)?;
    if field.ndim() < 2 {
        return Err(CalcError::Shape(format!(
            "geostrophic wind requires at least a 2-D field, got shape {:?}",
            field.shape()
        )));
    }

    let norm_factor = if field.dimension() == Dimension::GEOPOTENTIAL {
        &Quantity::scalar(1.0, &units::DIMENSIONLESS) / &coriolis
    } else if field.dimension() == Dimension::LENGTH {
        &units::standard_gravity() / &coriolis
    } else {
        return Err(CalcError::UnitMismatch {
            argument: "heights",
            expected: Dimension::LENGTH,
            found: field.dimension(),
        });
    };

    let grads = gradient(&field, &[dy.clone(), dx.clone()])?;
    // Only the trailing (y, x) components enter the balance.
    let dfdx = &grads[grads.len() - 1];
    let dfdy = &grads[grads.len() - 2];

    let u_g = -&(&norm_factor * dfdy);
    let v_g = &norm_factor * dfdx;
    Ok((reorient(&u_g, orient), reorient(&v_g, orient)))
}

/// Coriolis parameter `f = 2 Ω sin(latitude)` (1/s).
///
/// # Errors
/// [`CalcError::UnitMismatch`] unless `latitude` carries angle dimension.
pub fn coriolis_parameter(latitude: &Quantity) -> CalcResult<Quantity> {
    require_dimension("latitude", latitude, Dimension::ANGLE)?;
    let two_omega = 2.0 * units::constants::EARTH_ANGULAR_VELOCITY;
    Ok(Quantity::from_raw(
        latitude.values().mapv(|lat| two_omega * lat.sin()),
        Dimension::FREQUENCY,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn symmetric_ridge_gives_opposing_components() {
        let z = Quantity::new(
            (array![[48.0, 49.0, 48.0], [49.0, 50.0, 49.0], [48.0, 49.0, 48.0]] * 100.0)
                .into_dyn(),
            &units::METER,
        );
        // f numerically equal to g makes the normalization factor exactly one
        let f = Quantity::scalar(units::constants::STANDARD_GRAVITY, &units::PER_SECOND);
        let (ug, vg) = geostrophic_wind(
            &z,
            &f,
            &Spacing::step(100.0, &units::METER),
            &Spacing::step(100.0, &units::METER),
            Some(Orientation::XY),
        )
        .unwrap();
        let true_u = array![[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]].into_dyn();
        assert_eq!(ug.values(), &true_u);
        assert_eq!(vg.values(), &(-true_u.t().to_owned()));
        assert_eq!(ug.dimension(), Dimension::SPEED);
    }

    #[test]
    fn geopotential_input_drops_the_gravity_factor() {
        let phi = Quantity::new(
            (array![[48.0, 49.0, 48.0], [49.0, 50.0, 49.0], [48.0, 49.0, 48.0]] * 100.0)
                .into_dyn(),
            &units::SQUARE_METERS_PER_SECOND_SQUARED,
        );
        let f = Quantity::scalar(1.0, &units::PER_SECOND);
        let (ug, vg) = geostrophic_wind(
            &phi,
            &f,
            &Spacing::step(100.0, &units::METER),
            &Spacing::step(100.0, &units::METER),
            Some(Orientation::XY),
        )
        .unwrap();
        let true_u = array![[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]].into_dyn();
        assert_eq!(ug.values(), &true_u);
        assert_eq!(vg.values(), &(-true_u.t().to_owned()));
    }

    #[test]
    fn pressure_field_is_rejected() {
        let p = Quantity::new(ndarray::Array2::ones((3, 3)).into_dyn(), &units::PASCAL);
        let f = Quantity::scalar(1e-4, &units::PER_SECOND);
        let err = geostrophic_wind(
            &p,
            &f,
            &Spacing::step(100.0, &units::METER),
            &Spacing::step(100.0, &units::METER),
            Some(Orientation::YX),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CalcError::UnitMismatch {
                argument: "heights",
                ..
            }
        ));
    }

    #[test]
    fn coriolis_parameter_matches_known_latitudes() {
        let lat = Quantity::scalar(90.0, &units::DEGREE);
        let f = coriolis_parameter(&lat).unwrap();
        assert_relative_eq!(
            f.scalar_in(&units::PER_SECOND).unwrap(),
            2.0 * units::constants::EARTH_ANGULAR_VELOCITY,
            epsilon = 1e-12
        );
        let equator = Quantity::scalar(0.0, &units::DEGREE);
        assert_eq!(
            coriolis_parameter(&equator)
                .unwrap()
                .scalar_in(&units::PER_SECOND)
                .unwrap(),
            0.0
        );
    }
}

//! Wind vector utilities
//!
//! Meteorological wind direction is the bearing the wind blows *from*,
//! measured clockwise from north. Decomposing a speed/direction pair into
//! zonal and meridional components therefore picks up a sign flip:
//!
//! ```text
//! u = -speed · sin(direction)
//! v = -speed · cos(direction)
//! ```
//!
//! so a 180° direction (a southerly) is a pure northward flow.

use crate::core_types::quantity::{require_dimension, zip_broadcast, Quantity};
use crate::core_types::Dimension;
use crate::error::{CalcError, CalcResult};

/// Zonal and meridional components `(u, v)` from speed and direction.
///
/// Direction is the conventional "from" bearing (an angle quantity;
/// degrees convert on construction). Speed and direction must share a
/// shape.
///
/// # Errors
/// [`CalcError::UnitMismatch`] unless `speed` is speed-dimensioned and
/// `direction` angle-dimensioned; [`CalcError::Shape`] when the shapes
/// differ.
pub fn wind_components(speed: &Quantity, direction: &Quantity) -> CalcResult<(Quantity, Quantity)> {
    require_dimension("speed", speed, Dimension::SPEED)?;
    require_dimension("direction", direction, Dimension::ANGLE)?;
    if speed.shape() != direction.shape() {
        return Err(CalcError::Shape(format!(
            "speed shape {:?} does not match direction shape {:?}",
            speed.shape(),
            direction.shape()
        )));
    }
    let u = zip_broadcast(speed.values(), direction.values(), |s, d| -s * d.sin());
    let v = zip_broadcast(speed.values(), direction.values(), |s, d| -s * d.cos());
    Ok((
        Quantity::from_raw(u, Dimension::SPEED),
        Quantity::from_raw(v, Dimension::SPEED),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units;
    use approx::assert_relative_eq;

    #[test]
    fn cardinal_directions_decompose_correctly() {
        let speed = Quantity::from_slice(&[4.0, 4.0, 4.0, 4.0], &units::METERS_PER_SECOND);
        let direction = Quantity::from_slice(&[0.0, 90.0, 180.0, 270.0], &units::DEGREE);
        let (u, v) = wind_components(&speed, &direction).unwrap();
        let u = u.magnitudes_in(&units::METERS_PER_SECOND).unwrap();
        let v = v.magnitudes_in(&units::METERS_PER_SECOND).unwrap();
        // northerly: southward flow
        assert_relative_eq!(u[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[0], -4.0, epsilon = 1e-12);
        // easterly: westward flow
        assert_relative_eq!(u[1], -4.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 0.0, epsilon = 1e-12);
        // southerly: northward flow
        assert_relative_eq!(u[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[2], 4.0, epsilon = 1e-12);
        // westerly: eastward flow
        assert_relative_eq!(u[3], 4.0, epsilon = 1e-12);
        assert_relative_eq!(v[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn knots_convert_before_decomposition() {
        let speed = Quantity::from_slice(&[10.0], &units::KNOT);
        let direction = Quantity::from_slice(&[270.0], &units::DEGREE);
        let (u, _) = wind_components(&speed, &direction).unwrap();
        assert_relative_eq!(
            u.magnitudes_in(&units::METERS_PER_SECOND).unwrap()[0],
            10.0 * 1852.0 / 3600.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn direction_must_be_an_angle() {
        let speed = Quantity::from_slice(&[1.0], &units::METERS_PER_SECOND);
        let not_an_angle = Quantity::from_slice(&[1.0], &units::SECOND);
        let err = wind_components(&speed, &not_an_angle).unwrap_err();
        assert!(matches!(
            err,
            CalcError::UnitMismatch {
                argument: "direction",
                ..
            }
        ));
    }
}

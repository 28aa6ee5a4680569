//! Unit table and physical constants
//!
//! A [`Unit`] pairs a display symbol with a dimension and a conversion scale
//! to SI base magnitudes. Quantities normalize to SI scale at construction,
//! so converting between compatible units is a single exact multiplication
//! (millibar↔pascal, knot↔m/s, degree↔radian).
//!
//! Only multiplicative units are represented. Temperatures are kelvin; none
//! of the kinematic formulas need an affine scale, and keeping the table
//! scale-only keeps every conversion exact within floating precision.

use super::dimension::Dimension;
use super::quantity::Quantity;
use std::fmt;

/// A named unit of measure: symbol, scale to SI base magnitude, dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Display symbol, e.g. `"m/s"`
    pub symbol: &'static str,
    /// Multiplier taking a magnitude in this unit to SI base scale
    pub scale: f64,
    /// Physical dimension measured by this unit
    pub dimension: Dimension,
}

impl Unit {
    /// Define a unit.
    #[inline]
    #[must_use]
    pub const fn new(symbol: &'static str, scale: f64, dimension: Dimension) -> Self {
        Unit {
            symbol,
            scale,
            dimension,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Pure number (scale 1, dimensionless)
pub const DIMENSIONLESS: Unit = Unit::new("", 1.0, Dimension::NONE);

/// Metre
pub const METER: Unit = Unit::new("m", 1.0, Dimension::LENGTH);

/// Kilometre
pub const KILOMETER: Unit = Unit::new("km", 1000.0, Dimension::LENGTH);

/// Second
pub const SECOND: Unit = Unit::new("s", 1.0, Dimension::TIME);

/// Hour
pub const HOUR: Unit = Unit::new("h", 3600.0, Dimension::TIME);

/// Kilogram
pub const KILOGRAM: Unit = Unit::new("kg", 1.0, Dimension::MASS);

/// Kelvin
pub const KELVIN: Unit = Unit::new("K", 1.0, Dimension::TEMPERATURE);

/// Radian
pub const RADIAN: Unit = Unit::new("rad", 1.0, Dimension::ANGLE);

/// Degree of arc
pub const DEGREE: Unit = Unit::new("deg", std::f64::consts::PI / 180.0, Dimension::ANGLE);

/// Metre per second
pub const METERS_PER_SECOND: Unit = Unit::new("m/s", 1.0, Dimension::SPEED);

/// Kilometre per hour
pub const KILOMETERS_PER_HOUR: Unit = Unit::new("km/h", 1000.0 / 3600.0, Dimension::SPEED);

/// Knot (international nautical mile per hour, exactly 1852/3600 m/s)
pub const KNOT: Unit = Unit::new("kn", 1852.0 / 3600.0, Dimension::SPEED);

/// Metre per second squared
pub const METERS_PER_SECOND_SQUARED: Unit = Unit::new("m/s^2", 1.0, Dimension::ACCELERATION);

/// Reciprocal second (vorticity, divergence, Coriolis parameter)
pub const PER_SECOND: Unit = Unit::new("1/s", 1.0, Dimension::FREQUENCY);

/// Pascal
pub const PASCAL: Unit = Unit::new("Pa", 1.0, Dimension::PRESSURE);

/// Hectopascal
pub const HECTOPASCAL: Unit = Unit::new("hPa", 100.0, Dimension::PRESSURE);

/// Millibar (identical scale to the hectopascal)
pub const MILLIBAR: Unit = Unit::new("mbar", 100.0, Dimension::PRESSURE);

/// Square metre per second squared (geopotential, helicity)
pub const SQUARE_METERS_PER_SECOND_SQUARED: Unit =
    Unit::new("m^2/s^2", 1.0, Dimension::GEOPOTENTIAL);

/// Physical constants used by the kinematic formulas
pub mod constants {
    /// Standard acceleration of gravity (m/s²), CODATA conventional value
    pub const STANDARD_GRAVITY: f64 = 9.80665;

    /// Earth's angular velocity Ω (rad/s)
    pub const EARTH_ANGULAR_VELOCITY: f64 = 7.292115e-5;
}

/// Standard gravity `g` as a scalar quantity (m/s²).
#[must_use]
pub fn standard_gravity() -> Quantity {
    Quantity::scalar(constants::STANDARD_GRAVITY, &METERS_PER_SECOND_SQUARED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pressure_conversions_are_exact() {
        let p = Quantity::scalar(1013.25, &MILLIBAR);
        assert_eq!(p.scalar_in(&PASCAL).unwrap(), 101325.0);
        assert_eq!(p.scalar_in(&HECTOPASCAL).unwrap(), 1013.25);
    }

    #[test]
    fn speed_conversions_round_trip() {
        let wind = Quantity::scalar(10.0, &KNOT);
        assert_relative_eq!(
            wind.scalar_in(&METERS_PER_SECOND).unwrap(),
            10.0 * 1852.0 / 3600.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(wind.scalar_in(&KNOT).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_scale_is_radian_based() {
        let quarter = Quantity::scalar(90.0, &DEGREE);
        assert_relative_eq!(
            quarter.scalar_in(&RADIAN).unwrap(),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn incompatible_conversion_is_rejected() {
        let p = Quantity::scalar(1000.0, &HECTOPASCAL);
        assert!(p.scalar_in(&KELVIN).is_err());
    }
}

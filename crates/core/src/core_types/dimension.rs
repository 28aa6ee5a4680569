//! Physical-dimension vectors for checked quantity arithmetic
//!
//! A [`Dimension`] is a vector of integer exponents over the base dimensions
//! used in kinematic analysis: length, time, mass, angle and temperature.
//! Dimension algebra is exact: multiplying quantities adds exponents,
//! dividing subtracts them, and a square root halves them (and is therefore
//! only defined when every exponent is even).
//!
//! Keeping dimensions as data rather than types lets a single field type
//! carry any physical variable (wind speed, pressure, geopotential) while
//! still rejecting ill-dimensioned arithmetic at run time. The geostrophic
//! wind computation exploits this: it dispatches on whether its input carries
//! a height (length) or geopotential (length²/time²) dimension.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};
use std::sync::OnceLock;

/// Exponent vector over the base physical dimensions.
///
/// The zero vector is dimensionless. Exponents are small integers; `i8` is
/// far beyond anything kinematic formulas can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    /// Length exponent (metre)
    pub length: i8,
    /// Time exponent (second)
    pub time: i8,
    /// Mass exponent (kilogram)
    pub mass: i8,
    /// Angle exponent (radian)
    pub angle: i8,
    /// Temperature exponent (kelvin)
    pub temperature: i8,
}

impl Dimension {
    /// Dimensionless (all exponents zero)
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0, 0);

    /// Length, L
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0);

    /// Time, T
    pub const TIME: Dimension = Dimension::new(0, 1, 0, 0, 0);

    /// Mass, M
    pub const MASS: Dimension = Dimension::new(0, 0, 1, 0, 0);

    /// Plane angle
    pub const ANGLE: Dimension = Dimension::new(0, 0, 0, 1, 0);

    /// Thermodynamic temperature, Θ
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, 1);

    /// Speed, L T⁻¹
    pub const SPEED: Dimension = Dimension::new(1, -1, 0, 0, 0);

    /// Acceleration, L T⁻²
    pub const ACCELERATION: Dimension = Dimension::new(1, -2, 0, 0, 0);

    /// Frequency / vorticity / divergence, T⁻¹
    pub const FREQUENCY: Dimension = Dimension::new(0, -1, 0, 0, 0);

    /// Pressure, M L⁻¹ T⁻²
    pub const PRESSURE: Dimension = Dimension::new(-1, -2, 1, 0, 0);

    /// Geopotential / specific energy / helicity, L² T⁻²
    pub const GEOPOTENTIAL: Dimension = Dimension::new(2, -2, 0, 0, 0);

    /// Build a dimension from explicit exponents.
    #[inline]
    #[must_use]
    pub const fn new(length: i8, time: i8, mass: i8, angle: i8, temperature: i8) -> Self {
        Dimension {
            length,
            time,
            mass,
            angle,
            temperature,
        }
    }

    /// True when every exponent is zero.
    #[inline]
    #[must_use]
    pub const fn is_dimensionless(self) -> bool {
        self.length == 0 && self.time == 0 && self.mass == 0 && self.angle == 0 && self.temperature == 0
    }

    /// Exponent-wise sum (dimension of a product of quantities).
    #[inline]
    #[must_use]
    pub const fn multiply(self, rhs: Dimension) -> Self {
        Dimension::new(
            self.length + rhs.length,
            self.time + rhs.time,
            self.mass + rhs.mass,
            self.angle + rhs.angle,
            self.temperature + rhs.temperature,
        )
    }

    /// Exponent-wise difference (dimension of a quotient of quantities).
    #[inline]
    #[must_use]
    pub const fn divide(self, rhs: Dimension) -> Self {
        Dimension::new(
            self.length - rhs.length,
            self.time - rhs.time,
            self.mass - rhs.mass,
            self.angle - rhs.angle,
            self.temperature - rhs.temperature,
        )
    }

    /// Reciprocal dimension (all exponents negated).
    #[inline]
    #[must_use]
    pub const fn inverse(self) -> Self {
        Dimension::NONE.divide(self)
    }

    /// Halve every exponent, or `None` if any exponent is odd.
    #[must_use]
    pub const fn sqrt(self) -> Option<Self> {
        if self.length % 2 != 0
            || self.time % 2 != 0
            || self.mass % 2 != 0
            || self.angle % 2 != 0
            || self.temperature % 2 != 0
        {
            return None;
        }
        Some(Dimension::new(
            self.length / 2,
            self.time / 2,
            self.mass / 2,
            self.angle / 2,
            self.temperature / 2,
        ))
    }
}

impl Mul for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: Dimension) -> Dimension {
        self.multiply(rhs)
    }
}

impl Div for Dimension {
    type Output = Dimension;
    fn div(self, rhs: Dimension) -> Dimension {
        self.divide(rhs)
    }
}

/// Display symbols for dimensions that have a conventional compact form.
fn well_known_symbols() -> &'static FxHashMap<Dimension, &'static str> {
    static SYMBOLS: OnceLock<FxHashMap<Dimension, &'static str>> = OnceLock::new();
    SYMBOLS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert(Dimension::LENGTH, "m");
        map.insert(Dimension::TIME, "s");
        map.insert(Dimension::MASS, "kg");
        map.insert(Dimension::ANGLE, "rad");
        map.insert(Dimension::TEMPERATURE, "K");
        map.insert(Dimension::SPEED, "m/s");
        map.insert(Dimension::ACCELERATION, "m/s^2");
        map.insert(Dimension::FREQUENCY, "1/s");
        map.insert(Dimension::PRESSURE, "Pa");
        map.insert(Dimension::GEOPOTENTIAL, "m^2/s^2");
        map
    })
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = well_known_symbols().get(self) {
            return write!(f, "{symbol}");
        }
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }
        let mut first = true;
        for (symbol, exponent) in [
            ("m", self.length),
            ("kg", self.mass),
            ("s", self.time),
            ("K", self.temperature),
            ("rad", self.angle),
        ] {
            if exponent == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if exponent == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{exponent}")?;
            }
        }
        Ok(())
    }
}

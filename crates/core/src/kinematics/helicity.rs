//! Storm-relative helicity
//!
//! Storm-relative helicity (SRH) measures the streamwise vorticity a storm
//! ingests from a layer of the atmosphere. Geometrically it is twice the
//! signed area swept by the storm-relative hodograph across the layer:
//!
//! ```text
//! SRH = -∫ k · (V - C) × dV/dz dz
//!     ≈ Σ_k  su[k+1]·sv[k] - su[k]·sv[k+1]
//! ```
//!
//! where `C` is the storm motion and `(su, sv)` the storm-relative wind at
//! consecutive levels. Positive terms accumulate into positive helicity,
//! negative terms into negative helicity; the total is their sum.
//!
//! Layer extraction works in pressure space. Height bounds map to pressures
//! by interpolating log-pressure against height AGL; the sub-layer winds
//! come either from the original samples bracketed by those pressures with
//! endpoint winds interpolated exactly ("exact" mode), or from a uniform
//! pressure grid walked from the bottom pressure by a fixed negative
//! increment. Both modes are valid discretizations and agree closely, not
//! identically.
//!
//! References: Davies-Jones, Burgess and Foster (1990); Markowski and
//! Richardson (2010), *Mesoscale Meteorology in Midlatitudes*, §8.4.

use crate::core_types::quantity::{require_dimension, Quantity};
use crate::core_types::{units, Dimension};
use crate::error::{CalcError, CalcResult};
use crate::numerics::interpolate;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A validated sounding: heights, pressures and wind components indexed by
/// ascending height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindProfile {
    /// Heights (m), strictly ascending from the surface
    heights: Vec<f64>,
    /// Pressures (Pa), strictly descending with height
    pressure: Vec<f64>,
    /// Zonal wind (m/s)
    u: Vec<f64>,
    /// Meridional wind (m/s)
    v: Vec<f64>,
}

impl WindProfile {
    /// Bundle and validate profile quantities.
    ///
    /// # Errors
    /// [`CalcError::UnitMismatch`] unless heights are lengths, pressures
    /// pressure-dimensioned, and winds speeds; [`CalcError::Shape`] unless
    /// all four are 1-D with a common length of at least two;
    /// [`CalcError::Domain`] unless heights strictly ascend and pressures
    /// strictly descend.
    pub fn new(
        heights: &Quantity,
        pressure: &Quantity,
        u: &Quantity,
        v: &Quantity,
    ) -> CalcResult<Self> {
        require_dimension("heights", heights, Dimension::LENGTH)?;
        require_dimension("pressure", pressure, Dimension::PRESSURE)?;
        require_dimension("u", u, Dimension::SPEED)?;
        require_dimension("v", v, Dimension::SPEED)?;
        for (name, q) in [
            ("heights", heights),
            ("pressure", pressure),
            ("u", u),
            ("v", v),
        ] {
            if q.ndim() != 1 {
                return Err(CalcError::Shape(format!(
                    "profile `{name}` must be 1-D, got shape {:?}",
                    q.shape()
                )));
            }
            if q.len() != heights.len() {
                return Err(CalcError::Shape(format!(
                    "profile `{name}` has {} samples but heights has {}",
                    q.len(),
                    heights.len()
                )));
            }
        }
        if heights.len() < 2 {
            return Err(CalcError::Shape(
                "a profile needs at least two levels".to_string(),
            ));
        }
        let heights: Vec<f64> = heights.values().iter().copied().collect();
        let pressure: Vec<f64> = pressure.values().iter().copied().collect();
        if heights.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CalcError::Domain(
                "profile heights must strictly ascend".to_string(),
            ));
        }
        if pressure.windows(2).any(|w| w[1] >= w[0]) {
            return Err(CalcError::Domain(
                "profile pressures must strictly descend with height".to_string(),
            ));
        }
        Ok(WindProfile {
            heights,
            pressure,
            u: u.values().iter().copied().collect(),
            v: v.values().iter().copied().collect(),
        })
    }

    /// Number of levels in the profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always false: construction rejects empty profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

/// Height bounds of an integration layer, AGL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBounds {
    /// Bottom of the layer (m AGL)
    bottom: f64,
    /// Top of the layer (m AGL)
    top: f64,
}

impl LayerBounds {
    /// Layer between two heights AGL.
    ///
    /// # Errors
    /// [`CalcError::UnitMismatch`] unless both bounds are lengths;
    /// [`CalcError::Shape`] unless both are scalars; [`CalcError::Domain`]
    /// when the bottom is negative or the top does not exceed it.
    pub fn new(bottom: &Quantity, top: &Quantity) -> CalcResult<Self> {
        require_dimension("bottom", bottom, Dimension::LENGTH)?;
        require_dimension("top", top, Dimension::LENGTH)?;
        let bottom = bottom.scalar_in(&units::METER)?;
        let top = top.scalar_in(&units::METER)?;
        if bottom < 0.0 {
            return Err(CalcError::Domain(format!(
                "layer bottom {bottom} m is below ground"
            )));
        }
        if top <= bottom {
            return Err(CalcError::Domain(format!(
                "layer top {top} m must exceed the bottom {bottom} m"
            )));
        }
        Ok(LayerBounds { bottom, top })
    }

    /// Layer from the surface up to `top`.
    ///
    /// # Errors
    /// As for [`LayerBounds::new`].
    pub fn surface_to(top: &Quantity) -> CalcResult<Self> {
        LayerBounds::new(&Quantity::scalar(0.0, &units::METER), top)
    }
}

/// Constant storm motion vector, stored in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StormMotion(Vector2<f64>);

impl StormMotion {
    /// Storm motion from component speeds.
    ///
    /// # Errors
    /// [`CalcError::UnitMismatch`] unless both components are speeds;
    /// [`CalcError::Shape`] unless both are scalars.
    pub fn new(u: &Quantity, v: &Quantity) -> CalcResult<Self> {
        require_dimension("storm_u", u, Dimension::SPEED)?;
        require_dimension("storm_v", v, Dimension::SPEED)?;
        Ok(StormMotion(Vector2::new(
            u.scalar_in(&units::METERS_PER_SECOND)?,
            v.scalar_in(&units::METERS_PER_SECOND)?,
        )))
    }

    /// A stationary storm.
    #[must_use]
    pub fn stationary() -> Self {
        StormMotion(Vector2::zeros())
    }
}

impl Default for StormMotion {
    fn default() -> Self {
        StormMotion::stationary()
    }
}

/// Tuning knobs for the helicity integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelicityOptions {
    /// Storm motion subtracted from the wind profile
    pub storm_motion: StormMotion,
    /// Grid step for non-exact mode; must be negative (pressure decreases
    /// with height). Ignored in exact mode.
    pub pressure_increment: Quantity,
    /// Exact mode splices original samples between interpolated endpoints;
    /// non-exact mode interpolates onto a uniform pressure grid
    pub exact: bool,
}

impl Default for HelicityOptions {
    fn default() -> Self {
        HelicityOptions {
            storm_motion: StormMotion::stationary(),
            pressure_increment: Quantity::scalar(-1.0, &units::HECTOPASCAL),
            exact: true,
        }
    }
}

/// Signed helicity sums over a layer (m²/s²).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helicity {
    /// Sum of the strictly positive hodograph-area terms
    pub positive: Quantity,
    /// Sum of the strictly negative terms
    pub negative: Quantity,
    /// `positive + negative`
    pub total: Quantity,
}

/// Storm-relative helicity of a height layer of a wind profile.
///
/// # Errors
/// [`CalcError::UnitMismatch`] when the pressure increment is not
/// pressure-dimensioned; [`CalcError::Domain`] when the layer top lies above
/// the profile or, in non-exact mode, the increment is not negative.
pub fn storm_relative_helicity(
    profile: &WindProfile,
    layer: &LayerBounds,
    options: &HelicityOptions,
) -> CalcResult<Helicity> {
    require_dimension(
        "pressure_increment",
        &options.pressure_increment,
        Dimension::PRESSURE,
    )?;

    let ground = profile.heights[0];
    let agl: Vec<f64> = profile.heights.iter().map(|h| h - ground).collect();
    let depth = *agl.last().expect("profiles have at least two levels");
    if layer.top > depth {
        return Err(CalcError::Domain(format!(
            "layer top {} m AGL lies above the profile top {depth} m AGL",
            layer.top
        )));
    }

    // Map the height bounds to pressures through log-pressure space. The
    // surface bound takes the surface pressure directly.
    let log_p: Vec<f64> = profile.pressure.iter().map(|&p| p.ln()).collect();
    let p_top = interpolate::linear(layer.top, &agl, &log_p).exp();
    let p_bottom = if layer.bottom == 0.0 {
        profile.pressure[0]
    } else {
        interpolate::linear(layer.bottom, &agl, &log_p).exp()
    };

    let (layer_u, layer_v) = if options.exact {
        exact_sublayer(profile, p_bottom, p_top)
    } else {
        let dp = options.pressure_increment.scalar_in(&units::PASCAL)?;
        if dp >= 0.0 {
            return Err(CalcError::Domain(format!(
                "pressure increment must be negative, got {dp} Pa"
            )));
        }
        uniform_sublayer(profile, p_bottom, p_top, dp)
    };

    let storm = options.storm_motion.0;
    let relative: Vec<Vector2<f64>> = layer_u
        .iter()
        .zip(&layer_v)
        .map(|(&u, &v)| Vector2::new(u, v) - storm)
        .collect();

    let mut positive = 0.0;
    let mut negative = 0.0;
    for pair in relative.windows(2) {
        let cross = pair[1].perp(&pair[0]);
        if cross > 0.0 {
            positive += cross;
        } else if cross < 0.0 {
            negative += cross;
        }
    }

    let unit = &units::SQUARE_METERS_PER_SECOND_SQUARED;
    Ok(Helicity {
        positive: Quantity::scalar(positive, unit),
        negative: Quantity::scalar(negative, unit),
        total: Quantity::scalar(positive + negative, unit),
    })
}

/// Original samples bracketed by the bound pressures, with the winds at the
/// exact endpoint pressures spliced on.
fn exact_sublayer(profile: &WindProfile, p_bottom: f64, p_top: f64) -> (Vec<f64>, Vec<f64>) {
    let p = &profile.pressure;
    // first index at or below the bottom pressure, and one past the last
    // index at or above the top pressure
    let start = p.partition_point(|&pi| pi > p_bottom);
    let stop = p.partition_point(|&pi| pi >= p_top);

    let mut u = Vec::with_capacity(stop.saturating_sub(start) + 2);
    let mut v = Vec::with_capacity(stop.saturating_sub(start) + 2);
    u.push(interpolate::log_pressure_at(p_bottom, p, &profile.u));
    v.push(interpolate::log_pressure_at(p_bottom, p, &profile.v));
    if start < stop {
        u.extend_from_slice(&profile.u[start..stop]);
        v.extend_from_slice(&profile.v[start..stop]);
    }
    u.push(interpolate::log_pressure_at(p_top, p, &profile.u));
    v.push(interpolate::log_pressure_at(p_top, p, &profile.v));
    (u, v)
}

/// Winds interpolated onto a uniform pressure grid walked from `p_bottom`
/// toward `p_top` by the negative step `dp`.
fn uniform_sublayer(
    profile: &WindProfile,
    p_bottom: f64,
    p_top: f64,
    dp: f64,
) -> (Vec<f64>, Vec<f64>) {
    let stop = p_top + dp;
    let mut levels = Vec::new();
    let mut k = 0usize;
    loop {
        let level = dp.mul_add(k as f64, p_bottom);
        if level <= stop {
            break;
        }
        levels.push(level);
        k += 1;
    }
    (
        interpolate::log_pressure_many(&levels, &profile.pressure, &profile.u),
        interpolate::log_pressure_many(&levels, &profile.pressure, &profile.v),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Pressure falling exponentially with an 8 km scale height.
    fn pressure_at(heights: &[f64]) -> Vec<f64> {
        heights
            .iter()
            .map(|&z| 101325.0 * (-z / 8000.0).exp())
            .collect()
    }

    fn profile(heights: &[f64], u: &[f64], v: &[f64]) -> WindProfile {
        WindProfile::new(
            &Quantity::from_slice(heights, &units::METER),
            &Quantity::from_slice(&pressure_at(heights), &units::PASCAL),
            &Quantity::from_slice(u, &units::METERS_PER_SECOND),
            &Quantity::from_slice(v, &units::METERS_PER_SECOND),
        )
        .unwrap()
    }

    #[test]
    fn profile_validation_catches_bad_inputs() {
        let h = Quantity::from_slice(&[0.0, 500.0, 250.0], &units::METER);
        let p = Quantity::from_slice(&[101325.0, 95000.0, 90000.0], &units::PASCAL);
        let w = Quantity::from_slice(&[1.0, 2.0, 3.0], &units::METERS_PER_SECOND);
        assert!(matches!(
            WindProfile::new(&h, &p, &w, &w).unwrap_err(),
            CalcError::Domain(_)
        ));

        let short = Quantity::from_slice(&[1.0, 2.0], &units::METERS_PER_SECOND);
        let h = Quantity::from_slice(&[0.0, 250.0, 500.0], &units::METER);
        assert!(matches!(
            WindProfile::new(&h, &p, &short, &w).unwrap_err(),
            CalcError::Shape(_)
        ));

        let not_pressure = Quantity::from_slice(&[1.0, 2.0, 3.0], &units::KELVIN);
        assert!(matches!(
            WindProfile::new(&h, &not_pressure, &w, &w).unwrap_err(),
            CalcError::UnitMismatch {
                argument: "pressure",
                ..
            }
        ));
    }

    #[test]
    fn layer_bounds_reject_inverted_and_subterranean_layers() {
        let m = |v: f64| Quantity::scalar(v, &units::METER);
        assert!(matches!(
            LayerBounds::new(&m(-10.0), &m(1000.0)).unwrap_err(),
            CalcError::Domain(_)
        ));
        assert!(matches!(
            LayerBounds::new(&m(2000.0), &m(1000.0)).unwrap_err(),
            CalcError::Domain(_)
        ));
        assert!(LayerBounds::surface_to(&m(3000.0)).is_ok());
    }

    #[test]
    fn layer_above_profile_is_a_domain_error() {
        let p = profile(&[0.0, 500.0, 1000.0], &[0.0, 5.0, 10.0], &[0.0, 0.0, 0.0]);
        let layer = LayerBounds::surface_to(&Quantity::scalar(3000.0, &units::METER)).unwrap();
        assert!(matches!(
            storm_relative_helicity(&p, &layer, &HelicityOptions::default()).unwrap_err(),
            CalcError::Domain(_)
        ));
    }

    #[test]
    fn straight_hodograph_has_zero_helicity() {
        // Unidirectional shear: the hodograph is a straight ray, no area.
        let p = profile(&[0.0, 500.0, 1000.0, 1500.0], &[0.0, 4.0, 8.0, 12.0], &[
            0.0, 0.0, 0.0, 0.0,
        ]);
        let layer = LayerBounds::surface_to(&Quantity::scalar(1500.0, &units::METER)).unwrap();
        let srh = storm_relative_helicity(&p, &layer, &HelicityOptions::default()).unwrap();
        assert_eq!(srh.total.scalar_in(&units::SQUARE_METERS_PER_SECOND_SQUARED).unwrap(), 0.0);
    }

    #[test]
    fn two_segment_hodograph_matches_hand_sum() {
        // w0=(0,0), w1=(5,5), w2=(10,0): cross terms 0 and 50.
        let p = profile(&[0.0, 500.0, 1000.0], &[0.0, 5.0, 10.0], &[0.0, 5.0, 0.0]);
        let layer = LayerBounds::surface_to(&Quantity::scalar(1000.0, &units::METER)).unwrap();
        let srh = storm_relative_helicity(&p, &layer, &HelicityOptions::default()).unwrap();
        let unit = &units::SQUARE_METERS_PER_SECOND_SQUARED;
        assert_relative_eq!(srh.positive.scalar_in(unit).unwrap(), 50.0, epsilon = 1e-9);
        // endpoint splicing can leave a sub-nanoscale residue in the
        // negative bucket
        approx::assert_abs_diff_eq!(srh.negative.scalar_in(unit).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(srh.total.scalar_in(unit).unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn uniform_grid_mode_agrees_on_piecewise_linear_hodographs() {
        // Winds linear in height and pressure exponential in height make the
        // hodograph piecewise linear in log-pressure, which both modes
        // reproduce exactly up to rounding.
        let p = profile(&[0.0, 500.0, 1000.0], &[0.0, 5.0, 10.0], &[0.0, 5.0, 0.0]);
        let layer = LayerBounds::surface_to(&Quantity::scalar(1000.0, &units::METER)).unwrap();
        let gridded = HelicityOptions {
            exact: false,
            ..HelicityOptions::default()
        };
        let srh = storm_relative_helicity(&p, &layer, &gridded).unwrap();
        let unit = &units::SQUARE_METERS_PER_SECOND_SQUARED;
        // the uniform grid cuts the hodograph corner at the 500 m vertex,
        // so agreement is close, not exact
        assert_relative_eq!(srh.positive.scalar_in(unit).unwrap(), 50.0, epsilon = 0.05);
        assert_relative_eq!(srh.negative.scalar_in(unit).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn storm_motion_cancels_a_constant_wind_offset() {
        let heights = [0.0, 400.0, 800.0, 1200.0, 1600.0];
        let u: Vec<f64> = heights.iter().map(|z| z / 200.0).collect();
        let v: Vec<f64> = heights.iter().map(|z| (z / 500.0).sin() * 4.0).collect();
        let base = profile(&heights, &u, &v);

        let shifted_u: Vec<f64> = u.iter().map(|w| w + 7.0).collect();
        let shifted_v: Vec<f64> = v.iter().map(|w| w - 3.0).collect();
        let shifted = profile(&heights, &shifted_u, &shifted_v);

        let layer = LayerBounds::surface_to(&Quantity::scalar(1600.0, &units::METER)).unwrap();
        let still = storm_relative_helicity(&base, &layer, &HelicityOptions::default()).unwrap();
        let moving = HelicityOptions {
            storm_motion: StormMotion::new(
                &Quantity::scalar(7.0, &units::METERS_PER_SECOND),
                &Quantity::scalar(-3.0, &units::METERS_PER_SECOND),
            )
            .unwrap(),
            ..HelicityOptions::default()
        };
        let compensated = storm_relative_helicity(&shifted, &layer, &moving).unwrap();

        let unit = &units::SQUARE_METERS_PER_SECOND_SQUARED;
        assert_relative_eq!(
            still.total.scalar_in(unit).unwrap(),
            compensated.total.scalar_in(unit).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn positive_pressure_increment_is_rejected_in_grid_mode() {
        let p = profile(&[0.0, 500.0, 1000.0], &[0.0, 5.0, 10.0], &[0.0, 5.0, 0.0]);
        let layer = LayerBounds::surface_to(&Quantity::scalar(1000.0, &units::METER)).unwrap();
        let bad = HelicityOptions {
            exact: false,
            pressure_increment: Quantity::scalar(1.0, &units::HECTOPASCAL),
            ..HelicityOptions::default()
        };
        assert!(matches!(
            storm_relative_helicity(&p, &layer, &bad).unwrap_err(),
            CalcError::Domain(_)
        ));
    }
}

//! Profile interpolation primitives
//!
//! Sounding work interpolates wind against the logarithm of pressure:
//! pressure decreases near-exponentially with height, so piecewise-linear
//! interpolation in log-pressure space tracks the atmosphere far better than
//! interpolation in pressure itself. These helpers underpin the
//! storm-relative-helicity layer construction.

use rayon::prelude::*;

/// Piecewise-linear interpolation with clamped ends.
///
/// `xp` must be ascending; values of `x` outside the range return the first
/// or last sample, matching the usual table-lookup convention.
pub(crate) fn linear(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    debug_assert!(!xp.is_empty());
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    // first index with xp[j] >= x; the guards above pin j to 1..=last
    let j = xp.partition_point(|&v| v < x);
    let t = (x - xp[j - 1]) / (xp[j] - xp[j - 1]);
    fp[j - 1] + t * (fp[j] - fp[j - 1])
}

/// Interpolate a profile variable to one target pressure against
/// log-pressure.
///
/// `pressure` is ordered as sampled, descending with height.
pub(crate) fn log_pressure_at(target: f64, pressure: &[f64], values: &[f64]) -> f64 {
    let log_p: Vec<f64> = pressure.iter().rev().map(|&p| p.ln()).collect();
    let ordered: Vec<f64> = values.iter().rev().copied().collect();
    linear(target.ln(), &log_p, &ordered)
}

/// Interpolate a profile variable to many target pressures against
/// log-pressure.
pub(crate) fn log_pressure_many(targets: &[f64], pressure: &[f64], values: &[f64]) -> Vec<f64> {
    let log_p: Vec<f64> = pressure.iter().rev().map(|&p| p.ln()).collect();
    let ordered: Vec<f64> = values.iter().rev().copied().collect();
    targets
        .par_iter()
        .map(|&t| linear(t.ln(), &log_p, &ordered))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_hits_midpoints_and_clamps() {
        let xp = [0.0, 1.0, 3.0];
        let fp = [10.0, 20.0, 40.0];
        assert_eq!(linear(0.5, &xp, &fp), 15.0);
        assert_eq!(linear(2.0, &xp, &fp), 30.0);
        assert_eq!(linear(-1.0, &xp, &fp), 10.0);
        assert_eq!(linear(9.0, &xp, &fp), 40.0);
        // exact nodes
        assert_eq!(linear(1.0, &xp, &fp), 20.0);
    }

    #[test]
    fn log_pressure_recovers_height_linear_profiles() {
        // Pressure falling exponentially with height makes any
        // height-linear variable exactly linear in log-pressure.
        let heights = [0.0, 500.0, 1000.0, 1500.0, 2000.0];
        let pressure: Vec<f64> = heights.iter().map(|&z| 1000.0 * (-z / 8000.0_f64).exp()).collect();
        let speed: Vec<f64> = heights.iter().map(|&z| 5.0 + z / 200.0).collect();
        // target pressure at 750 m
        let p_750 = 1000.0 * (-750.0 / 8000.0_f64).exp();
        assert_relative_eq!(
            log_pressure_at(p_750, &pressure, &speed),
            5.0 + 750.0 / 200.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn many_matches_single_target_interpolation() {
        let pressure = [1000.0, 850.0, 700.0, 500.0];
        let values = [1.0, 4.0, 9.0, 16.0];
        let targets = [950.0, 600.0, 820.0];
        let batch = log_pressure_many(&targets, &pressure, &values);
        for (t, got) in targets.iter().zip(&batch) {
            assert_eq!(*got, log_pressure_at(*t, &pressure, &values));
        }
    }
}

//! Least-squares trend fitting
//!
//! Fits `y = intercept + slope * t` over time indices `t = 0..n-1`.
//!
//! The design matrix `[t, 1]` is orthogonalized against its constant column
//! before solving (the time axis is centred on its mean), which is the
//! Gram-Schmidt form of a QR factorization for two columns. The normal
//! equations are never formed or inverted, so a constant or all-zero series
//! yields slope 0 instead of a singular system, and a single-point series
//! (rank-deficient design) yields the minimum-norm solution: slope 0 and an
//! intercept equal to the observation.

use traffic_spi::LaneTrend;

/// Below this centred sum of squares (in scaled units) the series is flat
const FLAT_TOLERANCE: f64 = 1e-12;

/// Largest absolute value in the series, 0 for an empty or all-zero series
fn magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m: f64, v| m.max(v.abs()))
}

/// Slope, intercept and r² of the series divided by `scale`
///
/// Every scaled value lies in `[-1, 1]`, so the centred sums cannot
/// overflow however large the raw counts are.
fn fit_scaled(values: &[f64], scale: f64) -> (f64, f64, f64) {
    let n = values.len();
    let t_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().map(|&y| y / scale).sum::<f64>() / n as f64;

    // Centred sums; s_tt is zero only when n == 1
    let mut s_tt = 0.0;
    let mut s_ty = 0.0;
    let mut s_yy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dt = i as f64 - t_mean;
        let dy = y / scale - y_mean;
        s_tt += dt * dt;
        s_ty += dt * dy;
        s_yy += dy * dy;
    }

    let slope = if s_tt > 0.0 { s_ty / s_tt } else { 0.0 };
    let intercept = y_mean - slope * t_mean;

    let r_squared = if s_yy > FLAT_TOLERANCE {
        let ss_res: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let residual = y / scale - (intercept + slope * i as f64);
                residual * residual
            })
            .sum();
        (1.0 - ss_res / s_yy).clamp(0.0, 1.0)
    } else {
        1.0
    };

    (slope, intercept, r_squared)
}

/// Fit a linear trend to `values` indexed by `0..values.len()`
///
/// Coefficients are reported in count units. For series near the top of
/// the `f64` range they may saturate to infinity; use [`forecast_next`] for
/// a forecast that is always finite.
///
/// # Example
///
/// ```rust
/// use traffic_core::regression::fit_trend;
///
/// let trend = fit_trend(0, &[10.0, 12.0, 14.0, 16.0]);
/// assert!((trend.slope - 2.0).abs() < 1e-12);
/// assert!((trend.value_at(4.0) - 18.0).abs() < 1e-12);
/// ```
pub fn fit_trend(lane: usize, values: &[f64]) -> LaneTrend {
    let scale = magnitude(values);
    if values.is_empty() || scale == 0.0 || !scale.is_finite() {
        return LaneTrend {
            lane,
            slope: 0.0,
            intercept: 0.0,
            r_squared: 1.0,
        };
    }

    let (slope, intercept, r_squared) = fit_scaled(values, scale);
    LaneTrend {
        lane,
        slope: slope * scale,
        intercept: intercept * scale,
        r_squared,
    }
}

/// Fit a trend and evaluate it one step past the series
///
/// The result is clamped to `[0, f64::MAX]`: evaluation happens in scaled
/// units and only the final product is brought back to counts, so finite
/// input never yields NaN or infinity. Non-finite input forecasts 0.
pub fn forecast_next(values: &[f64]) -> f64 {
    let scale = magnitude(values);
    if values.is_empty() || scale == 0.0 || !scale.is_finite() {
        return 0.0;
    }

    let (slope, intercept, _) = fit_scaled(values, scale);
    let unit = (intercept + slope * values.len() as f64).max(0.0);
    (unit * scale).min(f64::MAX)
}

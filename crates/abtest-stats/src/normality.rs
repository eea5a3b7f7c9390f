//! Shapiro-Wilk test for normality.
//!
//! Implements Royston's algorithm (Applied Statistics algorithm AS R94, 1995),
//! which approximates the Shapiro-Wilk coefficients and the null distribution
//! of `W` for `3 <= n <= 5000`.
//!
//! H0: the sample was drawn from a normal distribution.
//! H1: it was not.

use std::f64::consts::FRAC_1_SQRT_2;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    descriptive,
    error::{StatsError, check_sample},
    test_result::TestResult,
};

const TEST_NAME: &str = "Shapiro-Wilk test";

/// Largest sample size the p-value approximation was fitted for.
pub const MAX_RELIABLE_OBSERVATIONS: usize = 5000;

const SMALL: f64 = 1e-19;

// 6/pi and pi/3, used for the exact n = 3 p-value.
const PI6: f64 = 1.909_859_317_102_74;
const STQR: f64 = 1.047_197_551_196_6;

// Polynomial coefficients of AS R94.
const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];

/// Runs the Shapiro-Wilk test on `values`.
///
/// Returns the `W` statistic and its p-value. Input order does not matter.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] for fewer than three observations
/// * [`StatsError::NonFinite`] if any observation is `NaN` or infinite
/// * [`StatsError::ZeroRange`] if all observations are equal
///
/// # Examples
///
/// ```
/// use abtest_stats::normality::shapiro_wilk;
///
/// let weights = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
/// let result = shapiro_wilk(&weights).unwrap();
/// assert!((result.statistic - 0.7888).abs() < 1e-4);
/// assert!(result.p_value < 0.01);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn shapiro_wilk(values: &[f64]) -> Result<TestResult, StatsError> {
    check_sample(TEST_NAME, values, 3)?;
    let n = values.len();
    if n > MAX_RELIABLE_OBSERVATIONS {
        tracing::warn!(
            n,
            "Shapiro-Wilk p-value may be inaccurate for more than {MAX_RELIABLE_OBSERVATIONS} observations"
        );
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let range = sorted[n - 1] - sorted[0];
    if range < SMALL {
        return Err(StatsError::ZeroRange { test: TEST_NAME });
    }

    // Full antisymmetric coefficient vector; the middle element stays zero for odd n.
    let half = half_coefficients(n);
    let mut coefficients = vec![0.0; n];
    for (i, &a) in half.iter().enumerate() {
        coefficients[i] = -a;
        coefficients[n - 1 - i] = a;
    }

    // W is the squared correlation between the ordered sample and the coefficients.
    let scaled = sorted.iter().map(|x| x / range).collect::<Vec<_>>();
    let coefficient_mean = descriptive::mean(&coefficients);
    let scaled_mean = descriptive::mean(&scaled);
    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (a, x) in coefficients.iter().zip(&scaled) {
        let da = a - coefficient_mean;
        let dx = x - scaled_mean;
        ssa += da * da;
        ssx += dx * dx;
        sax += da * dx;
    }
    // w1 = 1 - W, computed directly to keep precision when W is close to 1
    let ssassx = (ssa * ssx).sqrt();
    let w1 = (ssassx - sax) * (ssassx + sax) / (ssa * ssx);
    let w = 1.0 - w1;

    let p_value = if n == 3 {
        (PI6 * (w.sqrt().asin() - STQR)).max(0.0)
    } else {
        let an = n as f64;
        let mut y = w1.ln();
        let (mean, std_dev) = if n <= 11 {
            let gamma = poly(&G, an);
            if y >= gamma {
                return Ok(TestResult::new(w, 1e-99));
            }
            y = -(gamma - y).ln();
            (poly(&C3, an), poly(&C4, an).exp())
        } else {
            let ln_n = an.ln();
            (poly(&C5, ln_n), poly(&C6, ln_n).exp())
        };
        Normal::standard().sf((y - mean) / std_dev)
    };

    Ok(TestResult::new(w, p_value))
}

/// Upper half of the Shapiro-Wilk coefficients, largest first.
#[expect(clippy::cast_precision_loss)]
fn half_coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }

    let normal = Normal::standard();
    let an = n as f64;
    let an25 = an + 0.25;
    let m = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect::<Vec<_>>();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; half];
    a[0] = a1;
    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (1, fac)
    };
    for (a_i, m_i) in a.iter_mut().zip(&m).skip(first_scaled) {
        *a_i = -m_i / fac;
    }
    a
}

/// Evaluates `c[0] + c[1] x + c[2] x^2 + ...`.
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc.mul_add(x, c))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Exp, Normal as NormalDist};
    use rand_pcg::Pcg64;

    use super::*;

    const TOLERANCE: f64 = 1e-4;

    fn assert_close(result: TestResult, statistic: f64, p_value: f64) {
        assert!(
            (result.statistic - statistic).abs() < TOLERANCE,
            "W = {}, expected {statistic}",
            result.statistic
        );
        assert!(
            (result.p_value - p_value).abs() < TOLERANCE,
            "p = {}, expected {p_value}",
            result.p_value
        );
    }

    #[test]
    fn test_poly() {
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(poly(&[4.0], 10.0), 4.0);
    }

    #[test]
    fn test_reference_weights() {
        let weights = [
            148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
        ];
        assert_close(shapiro_wilk(&weights).unwrap(), 0.788_815, 0.006_704);
    }

    #[test]
    fn test_reference_purchase_samples() {
        let control = [
            545.0, 612.0, 480.0, 598.0, 503.0, 571.0, 633.0, 459.0, 520.0, 587.0, 556.0, 601.0,
            494.0, 528.0, 567.0, 610.0, 472.0, 541.0, 583.0, 536.0,
        ];
        let test = [
            590.0, 631.0, 512.0, 648.0, 559.0, 602.0, 677.0, 498.0, 566.0, 621.0, 583.0, 645.0,
            537.0, 571.0, 609.0, 655.0, 519.0, 588.0, 626.0, 574.0,
        ];
        assert_close(shapiro_wilk(&control).unwrap(), 0.967_889, 0.709_818);
        assert_close(shapiro_wilk(&test).unwrap(), 0.976_797, 0.886_422);
    }

    #[test]
    fn test_small_samples() {
        assert_close(shapiro_wilk(&[1.0, 2.0, 4.0]).unwrap(), 0.964_286, 0.636_887);
        assert_close(
            shapiro_wilk(&[2.0, 3.5, 3.9, 5.1, 7.4]).unwrap(),
            0.968_999,
            0.868_792,
        );
        let one_to_ten = (1..=10).map(f64::from).collect::<Vec<_>>();
        assert_close(shapiro_wilk(&one_to_ten).unwrap(), 0.970_165, 0.892_367);
        let one_to_twelve = (1..=12).map(f64::from).collect::<Vec<_>>();
        assert_close(shapiro_wilk(&one_to_twelve).unwrap(), 0.966_896, 0.875_731);
    }

    #[test]
    fn test_skewed_sample_rejected() {
        let skewed = [
            1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 6.0, 9.0, 15.0, 25.0, 48.0, 90.0, 180.0, 400.0,
        ];
        let result = shapiro_wilk(&skewed).unwrap();
        assert!((result.statistic - 0.553_416).abs() < TOLERANCE);
        assert!(result.p_value < 1e-4);
    }

    #[test]
    fn test_location_and_scale_invariance() {
        let weights = [
            148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
        ];
        let shifted = weights.map(|w| w * 3.0 + 1.0e6);
        let base = shapiro_wilk(&weights).unwrap();
        let moved = shapiro_wilk(&shifted).unwrap();
        assert!((base.statistic - moved.statistic).abs() < 1e-9);
        assert!((base.p_value - moved.p_value).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            shapiro_wilk(&[1.0, 2.0]),
            Err(StatsError::InsufficientData { actual: 2, .. })
        ));
        assert!(matches!(
            shapiro_wilk(&[5.0, 5.0, 5.0, 5.0]),
            Err(StatsError::ZeroRange { .. })
        ));
        assert!(matches!(
            shapiro_wilk(&[1.0, f64::NAN, 3.0]),
            Err(StatsError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_false_positive_rate_on_normal_data() {
        let mut rng = Pcg64::seed_from_u64(0x5eed);
        let normal = NormalDist::new(550.0, 50.0).unwrap();
        let trials = 200;
        let rejections = (0..trials)
            .filter(|_| {
                let sample = (0..40).map(|_| normal.sample(&mut rng)).collect::<Vec<_>>();
                shapiro_wilk(&sample).unwrap().p_value <= 0.05
            })
            .count();
        // Expected about 10 rejections out of 200.
        assert!(rejections < 30, "rejected normality {rejections} times");
    }

    #[test]
    fn test_power_on_exponential_data() {
        let mut rng = Pcg64::seed_from_u64(7);
        let exp = Exp::new(1.0).unwrap();
        let trials = 50;
        let rejections = (0..trials)
            .filter(|_| {
                let sample = (0..100).map(|_| exp.sample(&mut rng)).collect::<Vec<_>>();
                shapiro_wilk(&sample).unwrap().p_value <= 0.05
            })
            .count();
        assert!(rejections > 45, "rejected normality only {rejections} times");
    }
}

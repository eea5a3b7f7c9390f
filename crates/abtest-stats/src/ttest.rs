//! Independent two-sample t-tests.
//!
//! H0: µ1 = µ2 (the two population means are equal).
//! H1: µ1 ≠ µ2 (two-sided alternative).

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{
    descriptive,
    error::{StatsError, check_sample},
    test_result::TestResult,
};

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    /// t statistic and two-sided p-value.
    pub result: TestResult,
    /// Degrees of freedom of the reference t distribution.
    pub degrees_of_freedom: f64,
    /// `mean(a) - mean(b)`.
    pub mean_difference: f64,
}

/// Student's t-test assuming equal population variances (pooled variance).
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if either sample has fewer than two values
/// * [`StatsError::NonFinite`] if any observation is `NaN` or infinite
/// * [`StatsError::ZeroVariance`] if both samples are constant
///
/// # Examples
///
/// ```
/// use abtest_stats::ttest::student_t_test;
///
/// let a = [10.0, 11.0, 12.0, 13.0, 14.0];
/// let test = student_t_test(&a, &a).unwrap();
/// assert_eq!(test.result.statistic, 0.0);
/// assert_eq!(test.result.p_value, 1.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn student_t_test(a: &[f64], b: &[f64]) -> Result<TTest, StatsError> {
    const TEST_NAME: &str = "Student t-test";
    check_sample(TEST_NAME, a, 2)?;
    check_sample(TEST_NAME, b, 2)?;

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let df = na + nb - 2.0;
    let pooled =
        ((na - 1.0) * descriptive::sample_variance(a) + (nb - 1.0) * descriptive::sample_variance(b))
            / df;
    let standard_error = (pooled * (1.0 / na + 1.0 / nb)).sqrt();
    finish(TEST_NAME, a, b, standard_error, df)
}

/// Welch's t-test, which does not assume equal population variances.
///
/// Degrees of freedom follow the Welch-Satterthwaite approximation.
///
/// # Errors
///
/// Same conditions as [`student_t_test`].
#[expect(clippy::cast_precision_loss)]
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TTest, StatsError> {
    const TEST_NAME: &str = "Welch t-test";
    check_sample(TEST_NAME, a, 2)?;
    check_sample(TEST_NAME, b, 2)?;

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let va = descriptive::sample_variance(a) / na;
    let vb = descriptive::sample_variance(b) / nb;
    let standard_error = (va + vb).sqrt();
    let df = (va + vb).powi(2) / (va.powi(2) / (na - 1.0) + vb.powi(2) / (nb - 1.0));
    finish(TEST_NAME, a, b, standard_error, df)
}

fn finish(
    test: &'static str,
    a: &[f64],
    b: &[f64],
    standard_error: f64,
    df: f64,
) -> Result<TTest, StatsError> {
    if standard_error == 0.0 {
        return Err(StatsError::ZeroVariance { test });
    }
    let mean_difference = descriptive::mean(a) - descriptive::mean(b);
    let statistic = mean_difference / standard_error;
    let t = StudentsT::new(0.0, 1.0, df).map_err(StatsError::distribution)?;
    let p_value = (2.0 * t.sf(statistic.abs())).min(1.0);
    Ok(TTest {
        result: TestResult::new(statistic, p_value),
        degrees_of_freedom: df,
        mean_difference,
    })
}

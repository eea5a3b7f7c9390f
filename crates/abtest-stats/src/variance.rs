//! Levene's test for homogeneity of variances.
//!
//! H0: the compared groups have equal variance.
//! H1: at least one group's variance differs.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::{
    descriptive,
    error::{StatsError, check_sample},
    test_result::TestResult,
};

const TEST_NAME: &str = "Levene test";

/// Location estimate subtracted from each observation before the ANOVA on deviations.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::FromStr)]
#[serde(rename_all = "snake_case")]
pub enum LeveneCenter {
    /// Brown-Forsythe variant, robust to skewed data.
    #[default]
    Median,
    /// Levene's original formulation.
    Mean,
}

impl LeveneCenter {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeveneCenter::Median => "median",
            LeveneCenter::Mean => "mean",
        }
    }

    fn center(self, values: &[f64]) -> f64 {
        match self {
            LeveneCenter::Median => descriptive::median(values),
            LeveneCenter::Mean => descriptive::mean(values),
        }
    }
}

/// Runs Levene's test across `groups`.
///
/// The statistic is the one-way ANOVA F statistic computed on absolute
/// deviations from each group's center; the p-value comes from the
/// F(k - 1, N - k) distribution.
///
/// Two identical samples give `W = 0` and `p = 1` up to rounding.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] with fewer than two groups or a group of fewer than two values
/// * [`StatsError::NonFinite`] if any observation is `NaN` or infinite
/// * [`StatsError::ZeroVariance`] if every observation equals its group center
///
/// # Examples
///
/// ```
/// use abtest_stats::variance::{levene, LeveneCenter};
///
/// let a = [10.0, 12.0, 11.0, 13.0, 9.0];
/// let result = levene(&[&a, &a], LeveneCenter::Median).unwrap();
/// assert!(result.statistic.abs() < 1e-12);
/// assert!((result.p_value - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn levene(groups: &[&[f64]], center: LeveneCenter) -> Result<TestResult, StatsError> {
    if groups.len() < 2 {
        return Err(StatsError::InsufficientData {
            test: TEST_NAME,
            required: 2,
            actual: groups.len(),
        });
    }
    for group in groups {
        check_sample(TEST_NAME, group, 2)?;
    }

    let deviations = groups
        .iter()
        .map(|group| {
            let c = center.center(group);
            group.iter().map(|v| (v - c).abs()).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let k = groups.len() as f64;
    let total = groups.iter().map(|g| g.len()).sum::<usize>() as f64;
    let group_means = deviations
        .iter()
        .map(|d| descriptive::mean(d))
        .collect::<Vec<_>>();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / total;

    let between = deviations
        .iter()
        .zip(&group_means)
        .map(|(d, m)| d.len() as f64 * (m - grand_mean).powi(2))
        .sum::<f64>();
    let within = deviations
        .iter()
        .zip(&group_means)
        .map(|(d, m)| d.iter().map(|z| (z - m).powi(2)).sum::<f64>())
        .sum::<f64>();

    if within == 0.0 {
        if between == 0.0 {
            return Err(StatsError::ZeroVariance { test: TEST_NAME });
        }
        return Ok(TestResult::new(f64::INFINITY, 0.0));
    }

    let statistic = (total - k) * between / ((k - 1.0) * within);
    let f = FisherSnedecor::new(k - 1.0, total - k).map_err(StatsError::distribution)?;
    Ok(TestResult::new(statistic, f.sf(statistic)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTROL: [f64; 20] = [
        545.0, 612.0, 480.0, 598.0, 503.0, 571.0, 633.0, 459.0, 520.0, 587.0, 556.0, 601.0, 494.0,
        528.0, 567.0, 610.0, 472.0, 541.0, 583.0, 536.0,
    ];
    const TEST: [f64; 20] = [
        590.0, 631.0, 512.0, 648.0, 559.0, 602.0, 677.0, 498.0, 566.0, 621.0, 583.0, 645.0, 537.0,
        571.0, 609.0, 655.0, 519.0, 588.0, 626.0, 574.0,
    ];

    #[test]
    fn test_reference_median_center() {
        let result = levene(&[&CONTROL, &TEST], LeveneCenter::Median).unwrap();
        assert!((result.statistic - 0.060_572).abs() < 1e-4);
        assert!((result.p_value - 0.806_919).abs() < 1e-4);
    }

    #[test]
    fn test_reference_mean_center() {
        let result = levene(&[&CONTROL, &TEST], LeveneCenter::Mean).unwrap();
        assert!((result.statistic - 0.057_802).abs() < 1e-4);
        assert!((result.p_value - 0.811_296).abs() < 1e-4);
    }

    #[test]
    fn test_identical_samples() {
        let result = levene(&[&CONTROL, &CONTROL], LeveneCenter::Median).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_variances_rejected() {
        let tight = [100.0, 102.0, 98.0, 101.0, 99.0, 103.0, 97.0, 100.0, 101.0, 99.0];
        let wide = [60.0, 150.0, 80.0, 130.0, 95.0, 170.0, 40.0, 110.0, 125.0, 70.0];
        let result = levene(&[&tight, &wide], LeveneCenter::Median).unwrap();
        assert!((result.statistic - 24.444_376).abs() < 1e-4);
        assert!(result.p_value < 0.001);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            levene(&[&CONTROL], LeveneCenter::Median),
            Err(StatsError::InsufficientData { actual: 1, .. })
        ));
        assert!(matches!(
            levene(&[&[1.0, 1.0], &[2.0, 2.0]], LeveneCenter::Mean),
            Err(StatsError::ZeroVariance { .. })
        ));
    }

    #[test]
    fn test_center_parses_from_str() {
        assert_eq!("median".parse::<LeveneCenter>().unwrap(), LeveneCenter::Median);
        assert_eq!("mean".parse::<LeveneCenter>().unwrap(), LeveneCenter::Mean);
        assert!("trimmed".parse::<LeveneCenter>().is_err());
    }
}

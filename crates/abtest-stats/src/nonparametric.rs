//! Rank-based tests that make no normality assumption.

use std::collections::BTreeMap;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    error::{StatsError, check_sample},
    test_result::TestResult,
};

const TEST_NAME: &str = "Mann-Whitney U test";

/// Two-sided Mann-Whitney U test.
///
/// The statistic is `U` for the first sample. The p-value uses the normal
/// approximation with tie correction and continuity correction.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if either sample is empty
/// * [`StatsError::NonFinite`] if any observation is `NaN` or infinite
/// * [`StatsError::ZeroVariance`] if every observation has the same value
///
/// # Examples
///
/// ```
/// use abtest_stats::nonparametric::mann_whitney_u;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let b = [21.0, 22.0, 23.0, 24.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0];
/// let result = mann_whitney_u(&a, &b).unwrap();
/// assert_eq!(result.statistic, 0.0);
/// assert!(result.p_value < 0.001);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<TestResult, StatsError> {
    check_sample(TEST_NAME, a, 1)?;
    check_sample(TEST_NAME, b, 1)?;

    let combined = a.iter().chain(b).copied().collect::<Vec<_>>();
    let ranks = average_ranks(&combined);

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let n = n1 + n2;
    let rank_sum_a = ranks[..a.len()].iter().sum::<f64>();
    let u1 = rank_sum_a - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;

    let tie_term = tie_counts(&combined)
        .map(|t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum::<f64>();
    let variance = n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(StatsError::ZeroVariance { test: TEST_NAME });
    }

    let z = (u1.max(u2) - n1 * n2 / 2.0 - 0.5) / variance.sqrt();
    let p_value = (2.0 * Normal::standard().sf(z)).min(1.0);
    Ok(TestResult::new(u1, p_value))
}

/// 1-based ranks with ties replaced by the average of the ranks they span.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

fn tie_counts(values: &[f64]) -> impl Iterator<Item = usize> {
    let mut counts = BTreeMap::<u64, usize>::new();
    for v in values {
        // normalize -0.0 so it ties with 0.0
        let key = if *v == 0.0 { 0.0_f64 } else { *v };
        *counts.entry(key.to_bits()).or_default() += 1;
    }
    counts.into_values().filter(|&c| c > 1)
}

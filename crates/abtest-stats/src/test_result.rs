use std::fmt;

use serde::Serialize;

/// Conventional significance level used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// A `(statistic, p-value)` pair produced by a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl TestResult {
    #[must_use]
    pub fn new(statistic: f64, p_value: f64) -> Self {
        Self { statistic, p_value }
    }

    /// Decision for the test's null hypothesis at significance level `alpha`.
    ///
    /// The null hypothesis is rejected when `p <= alpha`.
    ///
    /// ```
    /// use abtest_stats::test_result::{Decision, TestResult};
    ///
    /// assert_eq!(TestResult::new(2.1, 0.05).decide(0.05), Decision::Reject);
    /// assert_eq!(TestResult::new(0.3, 0.71).decide(0.05), Decision::FailToReject);
    /// ```
    #[must_use]
    pub fn decide(&self, alpha: f64) -> Decision {
        if self.p_value <= alpha {
            Decision::Reject
        } else {
            Decision::FailToReject
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Test statistic = {:.4}, p-Value = {:.4}",
            self.statistic, self.p_value
        )
    }
}

/// Outcome of comparing a p-value against the significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Reject,
    FailToReject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Reject => f.write_str("H0 rejected"),
            Decision::FailToReject => f.write_str("H0 not rejected"),
        }
    }
}

//! Hypothesis test runner for the two-group comparison.
//!
//! The runner checks the t-test assumptions on both samples and then compares
//! the group means:
//!
//! 1. Shapiro-Wilk on sample A, then on sample B (H0: the sample is normal)
//! 2. Levene's test across A and B (H0: the variances are equal)
//! 3. A two-sided comparison of A and B (H0: µA = µB)
//!
//! With [`Strategy::Fixed`] step 3 is always Student's pooled t-test, whatever
//! the assumption checks found. [`Strategy::Adaptive`] lets the checks pick
//! the comparison: Mann-Whitney U when either sample is non-normal, Welch's
//! t-test when only the equal-variance hypothesis is rejected, and the pooled
//! t-test otherwise.
//!
//! # Examples
//!
//! ```
//! use abtest_analysis::{
//!     hypothesis::{ComparisonTest, Strategy, TestPlan},
//!     sample::PairedSample,
//! };
//! use abtest_stats::{test_result::Decision, variance::LeveneCenter};
//!
//! let a = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0];
//! let b = a.iter().map(|v| v + 100.0).collect();
//! let sample = PairedSample { metric: "Purchase".to_owned(), a, b };
//!
//! let plan = TestPlan::new(0.05, Strategy::Fixed, LeveneCenter::Median).unwrap();
//! let report = plan.run(&sample).unwrap();
//! assert_eq!(report.comparison.test, ComparisonTest::StudentT);
//! assert_eq!(report.conclusion(), Decision::Reject);
//! ```

use std::fmt;

use abtest_stats::{
    nonparametric, normality,
    test_result::{DEFAULT_ALPHA, Decision, TestResult},
    ttest,
    variance::{self, LeveneCenter},
};
use serde::Serialize;

use crate::{error::AnalysisError, sample::PairedSample};

/// How the mean comparison is chosen.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::FromStr)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Always run the pooled two-sample t-test.
    #[default]
    Fixed,
    /// Pick the comparison from the assumption checks.
    Adaptive,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Adaptive => "adaptive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonTest {
    StudentT,
    WelchT,
    MannWhitneyU,
}

impl ComparisonTest {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ComparisonTest::StudentT => "Independent two-sample t-test",
            ComparisonTest::WelchT => "Welch's t-test",
            ComparisonTest::MannWhitneyU => "Mann-Whitney U test",
        }
    }
}

/// Why the comparison test was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    FixedStrategy,
    NonNormalSample,
    UnequalVariance,
    AssumptionsHold,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionReason::FixedStrategy => "fixed strategy",
            SelectionReason::NonNormalSample => "normality rejected for at least one group",
            SelectionReason::UnequalVariance => "equal variances rejected",
            SelectionReason::AssumptionsHold => "normality and equal variances not rejected",
        };
        f.write_str(s)
    }
}

/// An assumption check and its decision at the plan's significance level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Check {
    #[serde(flatten)]
    pub result: TestResult,
    pub decision: Decision,
}

impl Check {
    fn new(result: TestResult, alpha: f64) -> Self {
        Self {
            result,
            decision: result.decide(alpha),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub test: ComparisonTest,
    pub reason: SelectionReason,
    #[serde(flatten)]
    pub check: Check,
    /// Reference t distribution degrees of freedom; `None` for rank tests.
    pub degrees_of_freedom: Option<f64>,
}

/// Overall recommendation drawn from the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// No significant difference: stay with the control group's strategy.
    KeepControl,
    /// Significant difference in favor of the control group.
    PreferControl,
    /// Significant difference in favor of the test group.
    PreferTest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisReport {
    pub metric: String,
    pub alpha: f64,
    pub strategy: Strategy,
    pub levene_center: LeveneCenter,
    pub mean_a: f64,
    pub mean_b: f64,
    pub normality_a: Check,
    pub normality_b: Check,
    pub variance: Check,
    pub comparison: Comparison,
}

impl HypothesisReport {
    /// Decision on H0: µA = µB.
    #[must_use]
    pub fn conclusion(&self) -> Decision {
        self.comparison.check.decision
    }

    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        match self.conclusion() {
            Decision::FailToReject => Recommendation::KeepControl,
            Decision::Reject if self.mean_b > self.mean_a => Recommendation::PreferTest,
            Decision::Reject => Recommendation::PreferControl,
        }
    }
}

/// Significance level, strategy and Levene centering for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestPlan {
    pub alpha: f64,
    pub strategy: Strategy,
    pub levene_center: LeveneCenter,
}

impl Default for TestPlan {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            strategy: Strategy::default(),
            levene_center: LeveneCenter::default(),
        }
    }
}

impl TestPlan {
    /// # Errors
    ///
    /// [`AnalysisError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn new(
        alpha: f64,
        strategy: Strategy,
        levene_center: LeveneCenter,
    ) -> Result<Self, AnalysisError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(AnalysisError::InvalidAlpha { alpha });
        }
        Ok(Self {
            alpha,
            strategy,
            levene_center,
        })
    }

    /// Runs the assumption checks and the mean comparison on `sample`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Stats`] if a test cannot be computed, e.g. a sample
    /// with fewer than three observations or with all values equal.
    pub fn run(&self, sample: &PairedSample) -> Result<HypothesisReport, AnalysisError> {
        let alpha = self.alpha;

        let normality_a = Check::new(normality::shapiro_wilk(&sample.a)?, alpha);
        let normality_b = Check::new(normality::shapiro_wilk(&sample.b)?, alpha);
        tracing::info!(
            p_a = normality_a.result.p_value,
            p_b = normality_b.result.p_value,
            "ran normality checks"
        );

        let variance = Check::new(
            variance::levene(&[&sample.a, &sample.b], self.levene_center)?,
            alpha,
        );
        tracing::info!(
            p = variance.result.p_value,
            center = self.levene_center.as_str(),
            "ran variance homogeneity check"
        );

        let (test, reason) = self.select(normality_a, normality_b, variance);
        let (result, degrees_of_freedom) = match test {
            ComparisonTest::StudentT => {
                let t = ttest::student_t_test(&sample.a, &sample.b)?;
                (t.result, Some(t.degrees_of_freedom))
            }
            ComparisonTest::WelchT => {
                let t = ttest::welch_t_test(&sample.a, &sample.b)?;
                (t.result, Some(t.degrees_of_freedom))
            }
            ComparisonTest::MannWhitneyU => {
                (nonparametric::mann_whitney_u(&sample.a, &sample.b)?, None)
            }
        };
        let comparison = Comparison {
            test,
            reason,
            check: Check::new(result, alpha),
            degrees_of_freedom,
        };
        tracing::info!(
            test = test.name(),
            %reason,
            p = result.p_value,
            decision = %comparison.check.decision,
            "compared group means"
        );

        Ok(HypothesisReport {
            metric: sample.metric.clone(),
            alpha,
            strategy: self.strategy,
            levene_center: self.levene_center,
            mean_a: sample.mean_a(),
            mean_b: sample.mean_b(),
            normality_a,
            normality_b,
            variance,
            comparison,
        })
    }

    fn select(
        &self,
        normality_a: Check,
        normality_b: Check,
        variance: Check,
    ) -> (ComparisonTest, SelectionReason) {
        match self.strategy {
            Strategy::Fixed => (ComparisonTest::StudentT, SelectionReason::FixedStrategy),
            Strategy::Adaptive => {
                if normality_a.decision.is_reject() || normality_b.decision.is_reject() {
                    (ComparisonTest::MannWhitneyU, SelectionReason::NonNormalSample)
                } else if variance.decision.is_reject() {
                    (ComparisonTest::WelchT, SelectionReason::UnequalVariance)
                } else {
                    (ComparisonTest::StudentT, SelectionReason::AssumptionsHold)
                }
            }
        }
    }
}

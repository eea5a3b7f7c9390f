//! Statistical routines for comparing two experiment groups.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: count, mean, median, sample variance and standard deviation
//! - **Percentiles**: linearly interpolated percentiles and quartiles
//! - **Column summaries**: descriptive statistics combined with quartiles
//! - **Normality**: the Shapiro-Wilk test
//! - **Variance homogeneity**: Levene's test (mean or median centered)
//! - **Mean comparison**: Student's and Welch's two-sample t-tests
//! - **Rank tests**: the Mann-Whitney U test
//!
//! Every hypothesis test returns a [`test_result::TestResult`] holding the
//! statistic and its p-value.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`summary`]: Per-column summary (count, mean, std, min, quartiles, max)
//! - [`normality`]: Shapiro-Wilk normality test
//! - [`variance`]: Levene's test for equal variances
//! - [`ttest`]: Independent two-sample t-tests
//! - [`nonparametric`]: Mann-Whitney U test
//! - [`test_result`]: Test results and accept/reject decisions
//!
//! # Examples
//!
//! ## Summarizing a column
//!
//! ```
//! use abtest_stats::summary::SummaryStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let summary = SummaryStats::new(values).unwrap();
//! assert_eq!(summary.stats.mean, 3.0);
//! assert_eq!(summary.q2(), 3.0);
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use abtest_stats::{
//!     normality::shapiro_wilk,
//!     test_result::Decision,
//!     ttest::student_t_test,
//!     variance::{levene, LeveneCenter},
//! };
//!
//! let control = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0];
//! let test = control.map(|v| v + 100.0);
//!
//! assert!(shapiro_wilk(&control).unwrap().p_value > 0.05);
//! let variance = levene(&[&control, &test], LeveneCenter::Median).unwrap();
//! assert_eq!(variance.decide(0.05), Decision::FailToReject);
//! let means = student_t_test(&control, &test).unwrap();
//! assert_eq!(means.result.decide(0.05), Decision::Reject);
//! ```

pub mod descriptive;
pub mod error;
pub mod nonparametric;
pub mod normality;
pub mod percentiles;
pub mod summary;
pub mod test_result;
pub mod ttest;
pub mod variance;

pub use self::error::StatsError;

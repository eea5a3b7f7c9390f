//! Two-group A/B test analysis over spreadsheet data.
//!
//! This crate turns a workbook with one sheet per experiment group into a
//! descriptive profile of each group and a hypothesis test report comparing
//! one metric between them.
//!
//! # Workflow
//!
//! 1. **Load** ([`workbook::load_groups`]): read the control and test sheets into [`table::GroupTable`]s
//! 2. **Describe** ([`profile::GroupProfile`]): shape, preview rows, null counts,
//!    click-through and conversion rates, per-column summaries
//! 3. **Extract** ([`sample::PairedSample`]): the compared metric from both groups
//! 4. **Test** ([`hypothesis::TestPlan`]): normality, variance homogeneity and
//!    mean comparison, yielding a [`hypothesis::HypothesisReport`]
//!
//! # Examples
//!
//! ```no_run
//! use abtest_analysis::{
//!     hypothesis::TestPlan, profile::GroupProfile, sample::PairedSample, workbook,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (control, test) =
//!     workbook::load_groups("Datasets/ab_testing_data.xlsx", "Control Group", "Test Group")?;
//!
//! let control_profile = GroupProfile::new(&control, 5)?;
//! println!("CTR: {:.4}", control_profile.click_through_rate);
//!
//! let sample = PairedSample::from_tables(&control, &test, "Purchase")?;
//! let report = TestPlan::default().run(&sample)?;
//! println!("{}: {}", report.comparison.test.name(), report.conclusion());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod hypothesis;
pub mod profile;
pub mod sample;
pub mod table;
pub mod workbook;

pub use self::error::AnalysisError;

//! Text report rendering
//!
//! Every function writes to a caller-supplied writer so commands can target
//! stdout while tests capture the output.

use std::io::{self, Write};

use abtest_analysis::{
    hypothesis::{HypothesisReport, Recommendation, Strategy},
    profile::GroupProfile,
};
use abtest_stats::{summary::SummaryStats, test_result::Decision};

/// Strategy served to the control group.
const CONTROL_STRATEGY: &str = "maximum bidding";
/// Strategy served to the test group.
const TEST_STRATEGY: &str = "average bidding";

const INDEX_WIDTH: usize = 6;
const VALUE_WIDTH: usize = 14;
const SUMMARY_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn print_heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "==========================================")?;
    writeln!(out, "{title}")?;
    writeln!(out, "==========================================")
}

fn print_header_row<'a>(
    out: &mut impl Write,
    label: &str,
    columns: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    write!(out, "  {label:<INDEX_WIDTH$}")?;
    let mut count = 0;
    for column in columns {
        write!(out, " {column:>VALUE_WIDTH$}")?;
        count += 1;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        "-".repeat(INDEX_WIDTH + count * (VALUE_WIDTH + 1))
    )
}

#[expect(clippy::cast_precision_loss)]
fn summary_values(summary: &SummaryStats) -> [f64; 8] {
    let stats = &summary.stats;
    [
        stats.count as f64,
        stats.mean,
        stats.std_dev,
        stats.min,
        summary.q1(),
        summary.q2(),
        summary.q3(),
        stats.max,
    ]
}

/// Shape, preview, null counts, rates and the summary table of one group.
pub(super) fn print_group_profile(out: &mut impl Write, profile: &GroupProfile) -> io::Result<()> {
    let (rows, columns) = profile.shape();
    print_heading(out, &profile.name)?;
    writeln!(out, "Shape: ({rows}, {columns})")?;
    writeln!(out, "Number of observations: {rows}")?;
    writeln!(out, "Number of features: {columns}")?;
    writeln!(out)?;

    writeln!(out, "First {} rows:", profile.head.len())?;
    print_header_row(out, "", profile.columns.iter().map(String::as_str))?;
    for (i, row) in profile.head.iter().enumerate() {
        write!(out, "  {i:<INDEX_WIDTH$}")?;
        for cell in row {
            write!(out, " {:>VALUE_WIDTH$}", cell.to_string())?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    writeln!(out, "Null values:")?;
    for null in &profile.null_counts {
        writeln!(out, "  {:<20} {:>8}", null.column, null.count)?;
    }
    writeln!(out, "  {:<20} {:>8}", "Total", profile.total_nulls())?;
    writeln!(out)?;

    writeln!(
        out,
        "Click-through rate (CTR): {:.4}",
        profile.click_through_rate
    )?;
    match profile.conversion_rate {
        Some(rate) => writeln!(out, "Conversion rate: {rate:.4}")?,
        None => writeln!(out, "Conversion rate: N/A")?,
    }
    writeln!(out)?;

    writeln!(out, "Summary statistics:")?;
    print_header_row(out, "", profile.summaries.iter().map(|s| s.column.as_str()))?;
    let values = profile
        .summaries
        .iter()
        .map(|s| summary_values(&s.summary))
        .collect::<Vec<_>>();
    for (i, label) in SUMMARY_LABELS.iter().enumerate() {
        write!(out, "  {label:<INDEX_WIDTH$}")?;
        for column in &values {
            write!(out, " {:>VALUE_WIDTH$.4}", column[i])?;
        }
        writeln!(out)?;
    }
    if !profile.non_numeric_columns.is_empty() {
        writeln!(
            out,
            "  (non-numeric columns skipped: {})",
            profile.non_numeric_columns.join(", ")
        )?;
    }
    writeln!(out)
}

fn decision_text(decision: Decision) -> &'static str {
    match decision {
        Decision::Reject => "p <= alpha, H0 rejected",
        Decision::FailToReject => "p > alpha, H0 not rejected",
    }
}

/// Group means, hypotheses, each test with its decision, and the conclusion.
pub(super) fn print_hypothesis_report(
    out: &mut impl Write,
    report: &HypothesisReport,
    control_name: &str,
    test_name: &str,
) -> io::Result<()> {
    let metric = &report.metric;
    print_heading(
        out,
        &format!("Hypothesis tests on {metric} (alpha = {})", report.alpha),
    )?;
    writeln!(out, "Mean {metric} of {control_name} (A): {:.3}", report.mean_a)?;
    writeln!(out, "Mean {metric} of {test_name} (B): {:.3}", report.mean_b)?;
    writeln!(out)?;
    writeln!(
        out,
        "H0: µA = µB (no significant difference in mean {metric} between {control_name} and {test_name})"
    )?;
    writeln!(
        out,
        "H1: µA ≠ µB (a significant difference in mean {metric} between {control_name} and {test_name})"
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "Normality assumption (Shapiro-Wilk), H0: the sample is normally distributed"
    )?;
    for (name, check) in [
        (control_name, &report.normality_a),
        (test_name, &report.normality_b),
    ] {
        writeln!(out, "  {name}: {}", check.result)?;
        writeln!(out, "    {}", decision_text(check.decision))?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "Variance homogeneity (Levene, {}-centered), H0: the variances are equal",
        report.levene_center.as_str()
    )?;
    writeln!(out, "  {}", report.variance.result)?;
    writeln!(out, "    {}", decision_text(report.variance.decision))?;
    writeln!(out)?;

    let comparison = &report.comparison;
    match report.strategy {
        Strategy::Fixed => writeln!(out, "Mean comparison: {}", comparison.test.name())?,
        Strategy::Adaptive => writeln!(
            out,
            "Mean comparison: {} (chosen because {})",
            comparison.test.name(),
            comparison.reason
        )?,
    }
    writeln!(out, "  {}", comparison.check.result)?;
    if let Some(df) = comparison.degrees_of_freedom {
        writeln!(out, "  Degrees of freedom = {df:.4}")?;
    }
    writeln!(out, "    {}", decision_text(comparison.check.decision))?;
    writeln!(out)?;

    writeln!(out, "Conclusion: {}", conclusion_text(report, control_name, test_name))?;
    writeln!(out)
}

fn conclusion_text(report: &HypothesisReport, control_name: &str, test_name: &str) -> String {
    let metric = &report.metric;
    match report.conclusion() {
        Decision::FailToReject => format!(
            "H0 not rejected. There is no statistically significant difference in mean {metric} between {control_name} and {test_name}; the observed difference is likely due to chance."
        ),
        Decision::Reject => format!(
            "H0 rejected. There is a statistically significant difference in mean {metric} between {control_name} and {test_name}."
        ),
    }
}

/// Fixed recommendation text for the outcome.
pub(super) fn recommendation_text(report: &HypothesisReport) -> String {
    let metric = &report.metric;
    match report.recommendation() {
        Recommendation::KeepControl => format!(
            "No significant difference was found, so switching offers no proven gain in {metric}. Keep the current {CONTROL_STRATEGY} strategy and continue collecting data before deciding again."
        ),
        Recommendation::PreferTest => format!(
            "{TEST_STRATEGY} produced a significantly higher mean {metric}. Consider adopting {TEST_STRATEGY}."
        ),
        Recommendation::PreferControl => format!(
            "{CONTROL_STRATEGY} produced a significantly higher mean {metric}. Keep {CONTROL_STRATEGY}."
        ),
    }
}

pub(super) fn print_recommendation(out: &mut impl Write, report: &HypothesisReport) -> io::Result<()> {
    print_heading(out, "Recommendation")?;
    writeln!(out, "{}", recommendation_text(report))
}

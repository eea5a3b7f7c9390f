use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use abtest_analysis::{
    hypothesis::{HypothesisReport, Strategy, TestPlan},
    profile::GroupProfile,
    sample::PairedSample,
    table::GroupTable,
    workbook,
};
use abtest_stats::{test_result::DEFAULT_ALPHA, variance::LeveneCenter};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use self::{describe::DescribeArg, hypothesis::HypothesisArg, report::ReportArg};

mod describe;
mod hypothesis;
mod print;
mod report;

const DEFAULT_WORKBOOK: &str = "Datasets/ab_testing_data.xlsx";
const DEFAULT_CONTROL_SHEET: &str = "Control Group";
const DEFAULT_TEST_SHEET: &str = "Test Group";
const DEFAULT_METRIC: &str = "Purchase";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// What to run; defaults to the full report
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Describe both groups, run the hypothesis tests and print a recommendation
    Report(#[clap(flatten)] ReportArg),
    /// Describe both groups only
    Describe(#[clap(flatten)] DescribeArg),
    /// Run the hypothesis tests only
    Test(#[clap(flatten)] HypothesisArg),
}

/// Where the groups are read from.
#[derive(Debug, Clone, Args)]
struct InputArg {
    /// Path to the `.xlsx` workbook
    #[arg(long, default_value = DEFAULT_WORKBOOK)]
    workbook: PathBuf,
    /// Sheet holding the control group
    #[arg(long, default_value = DEFAULT_CONTROL_SHEET)]
    control_sheet: String,
    /// Sheet holding the test group
    #[arg(long, default_value = DEFAULT_TEST_SHEET)]
    test_sheet: String,
    /// Column compared between the groups
    #[arg(long, default_value = DEFAULT_METRIC)]
    metric: String,
}

impl Default for InputArg {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            control_sheet: DEFAULT_CONTROL_SHEET.to_owned(),
            test_sheet: DEFAULT_TEST_SHEET.to_owned(),
            metric: DEFAULT_METRIC.to_owned(),
        }
    }
}

impl InputArg {
    fn load(&self) -> anyhow::Result<(GroupTable, GroupTable)> {
        tracing::info!(workbook = %self.workbook.display(), "loading groups");
        workbook::load_groups(&self.workbook, &self.control_sheet, &self.test_sheet)
            .with_context(|| format!("Failed to load groups from {}", self.workbook.display()))
    }
}

/// How the hypothesis tests are run.
#[derive(Debug, Clone, Args)]
struct PlanArg {
    /// Significance level, in (0, 1)
    #[arg(long, default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
    alpha: f64,
    /// `fixed` always runs the pooled t-test; `adaptive` picks the test from the assumption checks
    #[arg(long, default_value = "fixed")]
    strategy: Strategy,
    /// Center used by Levene's test (`median` or `mean`)
    #[arg(long, default_value = "median")]
    levene_center: LeveneCenter,
}

impl Default for PlanArg {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            strategy: Strategy::default(),
            levene_center: LeveneCenter::default(),
        }
    }
}

impl PlanArg {
    fn plan(&self) -> anyhow::Result<TestPlan> {
        TestPlan::new(self.alpha, self.strategy, self.levene_center)
            .context("Invalid hypothesis test settings")
    }
}

/// Where the JSON report goes.
#[derive(Default, Debug, Clone, Args)]
struct OutputArg {
    /// Also write a JSON report to this path (`-` for stdout, replacing the text report)
    #[arg(long)]
    json: Option<PathBuf>,
}

impl OutputArg {
    /// Whether the text report is printed; `--json -` takes stdout instead.
    fn prints_text(&self) -> bool {
        !self.json.as_deref().is_some_and(crate::util::is_stdout_path)
    }
}

fn profile_groups(
    control: &GroupTable,
    test: &GroupTable,
    head: usize,
) -> anyhow::Result<[GroupProfile; 2]> {
    let profile = |table: &GroupTable| {
        GroupProfile::new(table, head)
            .with_context(|| format!("Failed to describe group '{}'", table.name))
    };
    Ok([profile(control)?, profile(test)?])
}

fn run_hypothesis_tests(
    control: &GroupTable,
    test: &GroupTable,
    input: &InputArg,
    plan: &PlanArg,
) -> anyhow::Result<HypothesisReport> {
    let plan = plan.plan()?;
    let sample = PairedSample::from_tables(control, test, &input.metric)
        .with_context(|| format!("Failed to extract '{}' from both groups", input.metric))?;
    plan.run(&sample)
        .with_context(|| format!("Failed to run hypothesis tests on '{}'", input.metric))
}

/// Writes the text report to stdout.
fn print_text<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut out = io::stdout().lock();
    f(&mut out)
        .and_then(|()| out.flush())
        .context("Failed to write report to stdout")
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha = s
        .parse::<f64>()
        .map_err(|e| format!("invalid number '{s}': {e}"))?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(format!("significance level must lie in (0, 1), got {alpha}"))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.mode.unwrap_or(Mode::Report(ReportArg::default())) {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Test(arg) => hypothesis::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use abtest_analysis::profile::DEFAULT_HEAD_ROWS;

    use super::*;

    fn parse(args: &[&str]) -> CommandArgs {
        CommandArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults_without_subcommand() {
        let args = parse(&["abtest"]);
        assert_eq!(args.log_level, tracing::Level::WARN);
        assert!(args.mode.is_none());

        let arg = ReportArg::default();
        assert_eq!(arg.input.workbook, PathBuf::from(DEFAULT_WORKBOOK));
        assert_eq!(arg.input.metric, "Purchase");
        assert_eq!(arg.plan.alpha, 0.05);
        assert_eq!(arg.head, DEFAULT_HEAD_ROWS);
    }

    #[test]
    fn test_report_options() {
        let args = parse(&[
            "abtest",
            "report",
            "--workbook",
            "data.xlsx",
            "--metric",
            "Earning",
            "--alpha",
            "0.01",
            "--strategy",
            "adaptive",
            "--levene-center",
            "mean",
            "--json",
            "-",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.log_level, tracing::Level::DEBUG);
        let Some(Mode::Report(arg)) = args.mode else {
            panic!("expected report mode");
        };
        assert_eq!(arg.input.workbook, PathBuf::from("data.xlsx"));
        assert_eq!(arg.input.control_sheet, "Control Group");
        assert_eq!(arg.input.metric, "Earning");
        assert_eq!(arg.plan.alpha, 0.01);
        assert_eq!(arg.plan.strategy, Strategy::Adaptive);
        assert_eq!(arg.plan.levene_center, LeveneCenter::Mean);
        assert!(!arg.output.prints_text());
    }

    #[test]
    fn test_subcommand_defaults_match_default_impls() {
        let Some(Mode::Report(parsed)) = parse(&["abtest", "report"]).mode else {
            panic!("expected report mode");
        };
        let default = ReportArg::default();
        assert_eq!(parsed.input.workbook, default.input.workbook);
        assert_eq!(parsed.input.control_sheet, default.input.control_sheet);
        assert_eq!(parsed.input.test_sheet, default.input.test_sheet);
        assert_eq!(parsed.plan.strategy, default.plan.strategy);
        assert_eq!(parsed.plan.levene_center, default.plan.levene_center);
        assert_eq!(parsed.head, default.head);
        assert!(parsed.output.prints_text());
    }

    #[test]
    fn test_alpha_out_of_range() {
        assert!(CommandArgs::try_parse_from(["abtest", "test", "--alpha", "1.5"]).is_err());
        assert!(CommandArgs::try_parse_from(["abtest", "test", "--alpha", "0"]).is_err());
        assert!(CommandArgs::try_parse_from(["abtest", "test", "--alpha", "abc"]).is_err());
        assert_eq!(parse_alpha("0.1"), Ok(0.1));
    }

    #[test]
    fn test_unknown_strategy() {
        assert!(
            CommandArgs::try_parse_from(["abtest", "test", "--strategy", "sometimes"]).is_err()
        );
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory as _;
        CommandArgs::command().debug_assert();
    }
}

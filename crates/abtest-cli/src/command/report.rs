use abtest_analysis::profile::DEFAULT_HEAD_ROWS;
use clap::Args;

use crate::{
    command::{InputArg, OutputArg, PlanArg, print, print_text, profile_groups, run_hypothesis_tests},
    schema::report::AnalysisReport,
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(super) struct ReportArg {
    #[clap(flatten)]
    pub(super) input: InputArg,
    #[clap(flatten)]
    pub(super) plan: PlanArg,
    /// Number of preview rows printed per group
    #[arg(long, default_value_t = DEFAULT_HEAD_ROWS)]
    pub(super) head: usize,
    #[clap(flatten)]
    pub(super) output: OutputArg,
}

impl Default for ReportArg {
    fn default() -> Self {
        Self {
            input: InputArg::default(),
            plan: PlanArg::default(),
            head: DEFAULT_HEAD_ROWS,
            output: OutputArg::default(),
        }
    }
}

pub(super) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let (control, test) = arg.input.load()?;
    let profiles = profile_groups(&control, &test, arg.head)?;
    let hypothesis = run_hypothesis_tests(&control, &test, &arg.input, &arg.plan)?;

    if arg.output.prints_text() {
        print_text(|out| {
            for profile in &profiles {
                print::print_group_profile(out, profile)?;
            }
            print::print_hypothesis_report(out, &hypothesis, &control.name, &test.name)?;
            print::print_recommendation(out, &hypothesis)
        })?;
    }

    if let Some(path) = &arg.output.json {
        let report = AnalysisReport::new(
            &arg.input.workbook,
            profiles.iter().collect(),
            Some(&hypothesis),
        );
        Output::save_json(&report, path)?;
    }
    Ok(())
}

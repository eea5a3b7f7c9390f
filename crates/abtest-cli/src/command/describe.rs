use abtest_analysis::profile::DEFAULT_HEAD_ROWS;
use clap::Args;

use crate::{
    command::{InputArg, OutputArg, print, print_text, profile_groups},
    schema::report::AnalysisReport,
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(super) struct DescribeArg {
    #[clap(flatten)]
    pub(super) input: InputArg,
    /// Number of preview rows printed per group
    #[arg(long, default_value_t = DEFAULT_HEAD_ROWS)]
    pub(super) head: usize,
    #[clap(flatten)]
    pub(super) output: OutputArg,
}

pub(super) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let (control, test) = arg.input.load()?;
    let profiles = profile_groups(&control, &test, arg.head)?;

    if arg.output.prints_text() {
        print_text(|out| {
            profiles
                .iter()
                .try_for_each(|profile| print::print_group_profile(out, profile))
        })?;
    }

    if let Some(path) = &arg.output.json {
        let report = AnalysisReport::new(&arg.input.workbook, profiles.iter().collect(), None);
        Output::save_json(&report, path)?;
    }
    Ok(())
}

use clap::Args;

use crate::{
    command::{InputArg, OutputArg, PlanArg, print, print_text, run_hypothesis_tests},
    schema::report::AnalysisReport,
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(super) struct HypothesisArg {
    #[clap(flatten)]
    pub(super) input: InputArg,
    #[clap(flatten)]
    pub(super) plan: PlanArg,
    #[clap(flatten)]
    pub(super) output: OutputArg,
}

pub(super) fn run(arg: &HypothesisArg) -> anyhow::Result<()> {
    let (control, test) = arg.input.load()?;
    let hypothesis = run_hypothesis_tests(&control, &test, &arg.input, &arg.plan)?;

    if arg.output.prints_text() {
        print_text(|out| {
            print::print_hypothesis_report(out, &hypothesis, &control.name, &test.name)?;
            print::print_recommendation(out, &hypothesis)
        })?;
    }

    if let Some(path) = &arg.output.json {
        let report = AnalysisReport::new(&arg.input.workbook, vec![], Some(&hypothesis));
        Output::save_json(&report, path)?;
    }
    Ok(())
}

use std::path::Path;

use abtest_analysis::{
    hypothesis::{HypothesisReport, Recommendation},
    profile::GroupProfile,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Machine-readable analysis report written by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    /// Timestamp when the report was generated (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Workbook the groups were loaded from
    pub workbook: &'a Path,
    /// Descriptive profiles, control group first; empty for test-only runs
    pub groups: Vec<&'a GroupProfile>,
    /// Hypothesis test results; absent for describe-only runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<&'a HypothesisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(
        workbook: &'a Path,
        groups: Vec<&'a GroupProfile>,
        hypothesis: Option<&'a HypothesisReport>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            workbook,
            groups,
            hypothesis,
            recommendation: hypothesis.map(HypothesisReport::recommendation),
        }
    }
}

#[cfg(test)]
mod tests {
    use abtest_analysis::{hypothesis::TestPlan, sample::PairedSample};

    use super::*;

    #[test]
    fn test_describe_only_report_omits_hypothesis() {
        let report = AnalysisReport::new(Path::new("data.xlsx"), vec![], None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["workbook"], "data.xlsx");
        assert!(value["groups"].as_array().unwrap().is_empty());
        assert!(value.get("hypothesis").is_none());
        assert!(value.get("recommendation").is_none());
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_hypothesis_fields() {
        let a = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0];
        let b = a.iter().map(|v| v + 100.0).collect();
        let sample = PairedSample {
            metric: "Purchase".to_owned(),
            a,
            b,
        };
        let hypothesis = TestPlan::default().run(&sample).unwrap();
        let report = AnalysisReport::new(Path::new("data.xlsx"), vec![], Some(&hypothesis));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["recommendation"], "prefer_test");
        assert_eq!(value["hypothesis"]["alpha"], 0.05);
        assert_eq!(value["hypothesis"]["strategy"], "fixed");
        assert_eq!(value["hypothesis"]["levene_center"], "median");
        assert_eq!(value["hypothesis"]["comparison"]["test"], "student_t");
        assert_eq!(value["hypothesis"]["comparison"]["reason"], "fixed_strategy");
        assert_eq!(value["hypothesis"]["comparison"]["decision"], "reject");
        assert!(value["hypothesis"]["comparison"]["p_value"].is_number());
        assert!(value["hypothesis"]["normality_a"]["statistic"].is_number());
    }
}

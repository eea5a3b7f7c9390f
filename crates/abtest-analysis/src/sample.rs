//! The metric samples compared by the hypothesis tests.

use abtest_stats::descriptive;
use serde::Serialize;

use crate::{error::AnalysisError, table::GroupTable};

/// The compared metric, column A from the control table and column B from the
/// test table, aligned by row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedSample {
    pub metric: String,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl PairedSample {
    /// Extracts `metric` from both tables.
    ///
    /// Groups of different length are accepted; the tests are for independent
    /// samples and never pair rows up.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Table`] if either table lacks the column or it holds a
    /// non-numeric or empty cell.
    pub fn from_tables(
        control: &GroupTable,
        test: &GroupTable,
        metric: &str,
    ) -> Result<Self, AnalysisError> {
        let a = control.numeric_column(metric)?;
        let b = test.numeric_column(metric)?;
        if a.len() != b.len() {
            tracing::warn!(
                metric,
                control = a.len(),
                test = b.len(),
                "groups have different numbers of observations"
            );
        }
        Ok(Self {
            metric: metric.to_owned(),
            a,
            b,
        })
    }

    #[must_use]
    pub fn mean_a(&self) -> f64 {
        descriptive::mean(&self.a)
    }

    #[must_use]
    pub fn mean_b(&self) -> f64 {
        descriptive::mean(&self.b)
    }
}

#[cfg(test)]
mod tests {
    use crate::table::{CellValue, Column, TableError};

    use super::*;

    fn table(name: &str, cells: Vec<CellValue>) -> GroupTable {
        GroupTable::new(name, vec![Column::new("Purchase", cells)])
    }

    #[test]
    fn test_from_tables() {
        let control = table(
            "Control Group",
            vec![CellValue::Number(1.0), CellValue::Number(3.0)],
        );
        let test = table(
            "Test Group",
            vec![
                CellValue::Number(2.0),
                CellValue::Number(4.0),
                CellValue::Number(6.0),
            ],
        );
        let sample = PairedSample::from_tables(&control, &test, "Purchase").unwrap();
        assert_eq!(sample.a, vec![1.0, 3.0]);
        assert_eq!(sample.b, vec![2.0, 4.0, 6.0]);
        assert_eq!(sample.mean_a(), 2.0);
        assert_eq!(sample.mean_b(), 4.0);
    }

    #[test]
    fn test_rejects_gaps_and_text() {
        let control = table("Control Group", vec![CellValue::Number(1.0), CellValue::Empty]);
        let test = table("Test Group", vec![CellValue::Text("n/a".to_owned())]);
        let full = table("Full", vec![CellValue::Number(1.0)]);

        assert!(matches!(
            PairedSample::from_tables(&control, &full, "Purchase"),
            Err(AnalysisError::Table {
                source: TableError::MissingValue { .. }
            })
        ));
        assert!(matches!(
            PairedSample::from_tables(&full, &test, "Purchase"),
            Err(AnalysisError::Table {
                source: TableError::NonNumeric { .. }
            })
        ));
        assert!(matches!(
            PairedSample::from_tables(&full, &full, "Earning"),
            Err(AnalysisError::Table {
                source: TableError::MissingColumn { .. }
            })
        ));
    }
}

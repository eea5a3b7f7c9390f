//! Descriptive profile of one experiment group.
//!
//! A [`GroupProfile`] gathers everything reported before any hypothesis test
//! runs: table shape, a preview of the first rows, null counts per column,
//! click-through and conversion rates, and a summary of every numeric column.

use abtest_stats::summary::SummaryStats;
use serde::Serialize;

use crate::{
    error::AnalysisError,
    table::{CellValue, GroupTable},
};

pub const IMPRESSION_COLUMN: &str = "Impression";
pub const CLICK_COLUMN: &str = "Click";
pub const PURCHASE_COLUMN: &str = "Purchase";

/// Number of preview rows shown when not configured.
pub const DEFAULT_HEAD_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullCount {
    pub column: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    #[serde(flatten)]
    pub summary: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupProfile {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<Vec<CellValue>>,
    pub null_counts: Vec<NullCount>,
    /// `100 * sum(Click) / sum(Impression)`.
    pub click_through_rate: f64,
    /// `100 * sum(Purchase) / sum(Click)`, when the table has purchases and clicks.
    pub conversion_rate: Option<f64>,
    /// Summaries of numeric columns, in column order. Empty cells are skipped.
    pub summaries: Vec<ColumnSummary>,
    /// Columns excluded from the summaries because they hold text or booleans.
    pub non_numeric_columns: Vec<String>,
}

impl GroupProfile {
    /// Profiles `table`, keeping the first `head_rows` rows as a preview.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::Table`] if the Click or Impression column is missing or non-numeric
    /// * [`AnalysisError::ZeroTotal`] if the Impression column sums to zero
    pub fn new(table: &GroupTable, head_rows: usize) -> Result<Self, AnalysisError> {
        let click_through_rate = click_through_rate(table)?;
        let conversion_rate = conversion_rate(table)?;

        let mut summaries = vec![];
        let mut non_numeric_columns = vec![];
        for column in &table.columns {
            match column.numeric_values() {
                Some(values) => {
                    if let Some(summary) = SummaryStats::new(values) {
                        summaries.push(ColumnSummary {
                            column: column.name.clone(),
                            summary,
                        });
                    }
                }
                None => non_numeric_columns.push(column.name.clone()),
            }
        }

        let profile = Self {
            name: table.name.clone(),
            rows: table.row_count(),
            columns: table.column_names().map(str::to_owned).collect(),
            head: table
                .head(head_rows)
                .into_iter()
                .map(|row| row.into_iter().cloned().collect())
                .collect(),
            null_counts: table
                .columns
                .iter()
                .map(|c| NullCount {
                    column: c.name.clone(),
                    count: c.null_count(),
                })
                .collect(),
            click_through_rate,
            conversion_rate,
            summaries,
            non_numeric_columns,
        };
        tracing::info!(
            group = %profile.name,
            rows = profile.rows,
            ctr = profile.click_through_rate,
            "profiled group"
        );
        Ok(profile)
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    #[must_use]
    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|n| n.count).sum()
    }

    #[must_use]
    pub fn summary(&self, column: &str) -> Option<&SummaryStats> {
        self.summaries
            .iter()
            .find(|s| s.column == column)
            .map(|s| &s.summary)
    }
}

/// Click-through rate in percent: `100 * sum(Click) / sum(Impression)`.
///
/// # Errors
///
/// * [`AnalysisError::Table`] if either column is missing or holds non-numeric cells
/// * [`AnalysisError::ZeroTotal`] if the Impression column sums to zero
pub fn click_through_rate(table: &GroupTable) -> Result<f64, AnalysisError> {
    let clicks = table.column_sum(CLICK_COLUMN)?;
    let impressions = table.column_sum(IMPRESSION_COLUMN)?;
    if impressions == 0.0 {
        return Err(AnalysisError::ZeroTotal {
            table: table.name.clone(),
            column: IMPRESSION_COLUMN.to_owned(),
        });
    }
    Ok(100.0 * clicks / impressions)
}

/// Conversion rate in percent: `100 * sum(Purchase) / sum(Click)`.
///
/// `None` when the table has no Purchase column or no clicks.
pub fn conversion_rate(table: &GroupTable) -> Result<Option<f64>, AnalysisError> {
    if table.column(PURCHASE_COLUMN).is_err() {
        return Ok(None);
    }
    let purchases = table.column_sum(PURCHASE_COLUMN)?;
    let clicks = table.column_sum(CLICK_COLUMN)?;
    if clicks == 0.0 {
        tracing::warn!(group = %table.name, "no clicks recorded, conversion rate omitted");
        return Ok(None);
    }
    Ok(Some(100.0 * purchases / clicks))
}

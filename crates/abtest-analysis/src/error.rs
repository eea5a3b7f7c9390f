use abtest_stats::StatsError;

use crate::table::TableError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("failed to extract column data")]
    Table { source: TableError },
    #[display("statistical test failed")]
    Stats { source: StatsError },
    #[display("total {column} in '{table}' is zero, rate is undefined")]
    ZeroTotal { table: String, column: String },
    #[display("significance level must lie in (0, 1), got {alpha}")]
    InvalidAlpha { alpha: f64 },
}

impl From<TableError> for AnalysisError {
    fn from(source: TableError) -> Self {
        Self::Table { source }
    }
}

impl From<StatsError> for AnalysisError {
    fn from(source: StatsError) -> Self {
        Self::Stats { source }
    }
}

//! In-memory group tables loaded from a worksheet.
//!
//! A [`GroupTable`] is a named set of equal-length columns, one row per
//! observation period. Cell values keep the type they were stored with;
//! numeric access is checked at the point of use.

use std::fmt;

use serde::Serialize;

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Numeric value of the cell, if it holds one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v:.4}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => f.write_str("NaN"),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{column}' not found in '{table}' (available: {})", available.join(", "))]
    MissingColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },
    #[display("column '{column}' in '{table}' has a non-numeric value at row {row}: {value}")]
    NonNumeric {
        table: String,
        column: String,
        row: usize,
        value: String,
    },
    #[display("column '{column}' in '{table}' has an empty cell at row {row}")]
    MissingValue {
        table: String,
        column: String,
        row: usize,
    },
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Whether every non-empty cell is numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.cells
            .iter()
            .all(|c| matches!(c, CellValue::Number(_) | CellValue::Empty))
    }

    /// Numeric values, skipping empty cells. `None` if any cell holds text or a boolean.
    #[must_use]
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        if !self.is_numeric() {
            return None;
        }
        Some(self.cells.iter().filter_map(CellValue::as_number).collect())
    }
}

/// One experiment group's observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTable {
    pub name: String,
    pub columns: Vec<Column>,
}

impl GroupTable {
    /// Builds a table, padding shorter columns with empty cells so all columns
    /// share the same length.
    #[must_use]
    pub fn new(name: impl Into<String>, mut columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(rows, CellValue::Empty);
        }
        Self {
            name: name.into(),
            columns,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn {
                table: self.name.clone(),
                column: name.to_owned(),
                available: self.column_names().map(str::to_owned).collect(),
            })
    }

    /// Every value of a numeric column. Empty or non-numeric cells are errors.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let column = self.column(name)?;
        column
            .cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                CellValue::Number(v) => Ok(*v),
                CellValue::Empty => Err(TableError::MissingValue {
                    table: self.name.clone(),
                    column: name.to_owned(),
                    row,
                }),
                other => Err(TableError::NonNumeric {
                    table: self.name.clone(),
                    column: name.to_owned(),
                    row,
                    value: other.to_string(),
                }),
            })
            .collect()
    }

    /// Sum of a numeric column, skipping empty cells.
    pub fn column_sum(&self, name: &str) -> Result<f64, TableError> {
        let column = self.column(name)?;
        column
            .cells
            .iter()
            .enumerate()
            .try_fold(0.0, |acc, (row, cell)| match cell {
                CellValue::Number(v) => Ok(acc + v),
                CellValue::Empty => Ok(acc),
                other => Err(TableError::NonNumeric {
                    table: self.name.clone(),
                    column: name.to_owned(),
                    row,
                    value: other.to_string(),
                }),
            })
    }

    /// Cells of the first `n` rows, row-major.
    #[must_use]
    pub fn head(&self, n: usize) -> Vec<Vec<&CellValue>> {
        (0..self.row_count().min(n))
            .map(|row| self.columns.iter().map(|c| &c.cells[row]).collect())
            .collect()
    }
}

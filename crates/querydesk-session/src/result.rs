//! Normalized bot payloads and exchange errors.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

/// User-facing text for any failed request.
pub const NETWORK_FAILURE_MESSAGE: &str = "An error occurred, please try again later.";

/// One table cell, kept in the type the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    /// Objects, arrays, booleans and null. Textualized only when rendered.
    Structured(Value),
}

impl Cell {
    /// Canonical textual form: strings verbatim, numbers as JSON numbers,
    /// anything else as compact JSON.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Structured(v) => v.to_string(),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => Self::Number(n),
            other => Self::Structured(other),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("column {index} ({name:?}) is a duplicate")]
    DuplicateColumn { index: usize, name: String },
    #[error("row {row} has {actual} cells but there are {expected} columns")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A validated result set: every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    index,
                    name: name.clone(),
                });
            }
        }

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(TableError::RowLength {
                row,
                expected: columns.len(),
                actual: cells.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Original query, its execution result, and a natural-language answer.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResult {
    pub query: String,
    pub table: Table,
    pub answer: String,
}

/// A bot reply ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableResult {
    PlainText(String),
    Structured(StructuredResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    NetworkFailure,
    MalformedResponse,
}

/// A failed submission as recorded in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExchangeError {
    /// Text shown to the user.
    pub message: String,
    pub cause: FailureCause,
    /// Diagnostic for logs (status line, decode error, offending row).
    pub detail: Option<String>,
}

impl ExchangeError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            message: NETWORK_FAILURE_MESSAGE.into(),
            cause: FailureCause::NetworkFailure,
            detail: Some(detail.into()),
        }
    }

    pub fn malformed(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            message: format!("Malformed response: {diagnostic}"),
            cause: FailureCause::MalformedResponse,
            detail: Some(diagnostic),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.cause == FailureCause::MalformedResponse
    }
}

impl From<TableError> for ExchangeError {
    fn from(err: TableError) -> Self {
        Self::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cells(values: Vec<Value>) -> Vec<Cell> {
        values.into_iter().map(Cell::from).collect()
    }

    #[test]
    fn cell_keeps_json_types() {
        assert_eq!(Cell::from(json!("a")), Cell::Text("a".into()));
        assert!(matches!(Cell::from(json!(1)), Cell::Number(_)));
        assert_eq!(
            Cell::from(json!({"k": 1})),
            Cell::Structured(json!({"k": 1}))
        );
        assert_eq!(Cell::from(json!(null)), Cell::Structured(Value::Null));
    }

    #[test]
    fn cell_display_string() {
        assert_eq!(Cell::from(json!("a b")).to_display_string(), "a b");
        assert_eq!(Cell::from(json!(2.5)).to_display_string(), "2.5");
        assert_eq!(Cell::from(json!(true)).to_display_string(), "true");
        assert_eq!(Cell::from(json!(null)).to_display_string(), "null");
        assert_eq!(
            Cell::from(json!({"a": [1, 2]})).to_display_string(),
            r#"{"a":[1,2]}"#
        );
    }

    #[test]
    fn table_accepts_matching_rows() {
        let table = Table::new(
            vec!["id".into(), "name".into()],
            vec![cells(vec![json!(1), json!("a")]), cells(vec![json!(2), json!("b")])],
        )
        .unwrap();
        assert_eq!(table.columns(), ["id", "name"]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn table_accepts_zero_rows() {
        let table = Table::new(vec!["id".into()], Vec::new()).unwrap();
        assert!(table.rows().is_empty());
    }

    #[test]
    fn table_rejects_short_row_with_index() {
        let err = Table::new(
            vec!["id".into(), "name".into()],
            vec![cells(vec![json!(1), json!("a")]), cells(vec![json!(2)])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RowLength {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(err.to_string(), "row 1 has 1 cells but there are 2 columns");
    }

    #[test]
    fn table_rejects_duplicate_columns() {
        let err = Table::new(vec!["id".into(), "id".into()], Vec::new()).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { index: 1, .. }));
    }

    #[test]
    fn network_error_is_user_facing() {
        let err = ExchangeError::network("HTTP 500: boom");
        assert_eq!(err.to_string(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(err.cause, FailureCause::NetworkFailure);
        assert_eq!(err.detail.as_deref(), Some("HTTP 500: boom"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn table_error_converts_to_malformed() {
        let err: ExchangeError = TableError::RowLength {
            row: 3,
            expected: 2,
            actual: 5,
        }
        .into();
        assert!(err.is_malformed());
        assert!(err.message.contains("row 3"));
    }
}

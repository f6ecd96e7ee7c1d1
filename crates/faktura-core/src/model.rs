use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet-bound cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

impl Cell {
    /// Character count of the value as it will render in the spreadsheet.
    pub fn rendered_len(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
        }
    }
}

/// The tabular invoice data bound for the output spreadsheet.
///
/// Columns are positional, not named; `headers` is empty when the layout
/// requests a verbatim pass-through of the raw grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl InvoiceTable {
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// A non-fatal condition noticed during extraction.
///
/// Empty table regions and unparseable numeric cells degrade the output
/// instead of aborting the run; each such case is recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub reason: String,
}

/// Everything extracted from one invoice PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedInvoice {
    pub supplier_id: String,
    /// Name of the probe region where the supplier number was found.
    pub probe: String,
    pub table: InvoiceTable,
    pub warnings: Vec<ExtractionWarning>,
}

use crate::layout::schema::ColumnDef;
use crate::model::{Cell, ExtractionWarning, InvoiceTable};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Apply a layout's column projection to the raw extracted grid.
///
/// An empty column list passes the grid through verbatim: every cell stays a
/// string and no header row is produced. Otherwise each output column pulls
/// from its `source` index in the raw grid (out-of-range sources become empty
/// cells) and is shaped per its flags:
/// - `numeric`: strip non-numeric noise, parse as an exact decimal and emit a
///   number cell; an unparseable remainder stays text and records a warning;
/// - `text`: always a string cell (keeps leading zeros);
/// - neither: the raw string, verbatim.
pub fn project_table(
    grid: &[Vec<String>],
    columns: &[ColumnDef],
    warnings: &mut Vec<ExtractionWarning>,
) -> InvoiceTable {
    if columns.is_empty() {
        return InvoiceTable {
            headers: Vec::new(),
            rows: grid
                .iter()
                .map(|row| row.iter().map(|c| Cell::Text(c.clone())).collect())
                .collect(),
        };
    }

    let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();

    let rows = grid
        .iter()
        .map(|raw_row| {
            columns
                .iter()
                .map(|col| {
                    let raw = raw_row.get(col.source).map(String::as_str).unwrap_or("");
                    project_cell(raw, col, warnings)
                })
                .collect()
        })
        .collect();

    InvoiceTable { headers, rows }
}

fn project_cell(raw: &str, col: &ColumnDef, warnings: &mut Vec<ExtractionWarning>) -> Cell {
    if col.numeric {
        let cleaned = sanitize_numeric(raw);
        match parse_amount(&cleaned) {
            Some(value) => return Cell::Number(value),
            None => {
                if !cleaned.is_empty() {
                    warnings.push(ExtractionWarning {
                        reason: format!(
                            "column '{}': '{}' is not a number, kept as text",
                            col.header, raw
                        ),
                    });
                }
                return Cell::Text(cleaned);
            }
        }
    }
    Cell::Text(raw.to_string())
}

fn numeric_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\d.,]").unwrap())
}

/// Strip everything except digits and the two separator characters.
pub fn sanitize_numeric(s: &str) -> String {
    numeric_noise().replace_all(s, "").into_owned()
}

/// Parse an amount string into an exact decimal.
///
/// Accepts both European (`1.234,56`) and US (`1,234.56`) separator
/// conventions; whichever separator appears rightmost is taken as the decimal
/// point. A lone comma is a decimal comma.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let normalized = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (None, Some(_)) if s.matches(',').count() == 1 => s.replace(',', "."),
        (None, Some(_)) => s.replace(',', ""),
        _ => s.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

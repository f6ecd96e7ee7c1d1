use crate::error::FakturaError;
use crate::layout::schema::OutputDef;
use crate::model::{Cell, ExtractedInvoice};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Character width padding added on top of the longest cell per column.
const WIDTH_PADDING: usize = 2;

/// Write an extracted invoice to an xlsx file at `path`.
///
/// The supplier number goes into the layout's designated cell, the header
/// row (if any) at the table origin with data rows below it, and each
/// written column's display width is set to its longest rendered value plus
/// a fixed padding. Any existing file at `path` is overwritten.
pub fn write_invoice(
    invoice: &ExtractedInvoice,
    output: &OutputDef,
    path: &Path,
) -> Result<(), FakturaError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&output.sheet)?;

    let (srow, scol) = output.supplier_cell;
    sheet.write_string(srow, scol, &invoice.supplier_id)?;

    let (orow, ocol) = output.table_origin;
    let mut row = orow;

    if !invoice.table.headers.is_empty() {
        for (i, header) in invoice.table.headers.iter().enumerate() {
            sheet.write_string(row, ocol + i as u16, header)?;
        }
        row += 1;
    }

    for cells in &invoice.table.rows {
        for (i, cell) in cells.iter().enumerate() {
            let col = ocol + i as u16;
            match cell {
                Cell::Text(s) => sheet.write_string(row, col, s)?,
                Cell::Number(v) => sheet.write_number(row, col, v.to_f64().unwrap_or_default())?,
            };
        }
        row += 1;
    }

    for (col, max_len) in column_max_lengths(invoice, output) {
        sheet.set_column_width(col, (max_len + WIDTH_PADDING) as f64)?;
    }

    workbook.save(path)?;
    info!(
        file = %path.display(),
        rows = invoice.table.rows.len(),
        "wrote workbook"
    );
    Ok(())
}

/// Longest rendered value per written column, the supplier cell included.
///
/// Deterministic in the cell contents alone, so equal per-column maxima
/// always produce equal widths.
fn column_max_lengths(invoice: &ExtractedInvoice, output: &OutputDef) -> BTreeMap<u16, usize> {
    let mut lengths: BTreeMap<u16, usize> = BTreeMap::new();
    let mut note = |col: u16, len: usize| {
        let entry = lengths.entry(col).or_insert(0);
        *entry = (*entry).max(len);
    };

    let (_, scol) = output.supplier_cell;
    note(scol, invoice.supplier_id.chars().count());

    let (_, ocol) = output.table_origin;
    for (i, header) in invoice.table.headers.iter().enumerate() {
        note(ocol + i as u16, header.chars().count());
    }
    for cells in &invoice.table.rows {
        for (i, cell) in cells.iter().enumerate() {
            note(ocol + i as u16, cell.rendered_len());
        }
    }

    lengths
}

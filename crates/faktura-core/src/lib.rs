pub mod error;
pub mod export;
pub mod extraction;
pub mod layout;
pub mod locate;
pub mod model;
pub mod parsing;

use error::FakturaError;
use extraction::{field, table, PdfExtractor};
use layout::schema::LayoutFile;
use model::{ExtractedInvoice, ExtractionWarning};
use tracing::{info, warn};

/// Main API entry point: run the extraction pipeline over one invoice PDF.
///
/// Extracts positioned words from the PDF, probes the layout's candidate
/// regions for a registered supplier number, reads the matched supplier's
/// table area and applies its column projection. The result slots directly
/// into `export::xlsx::write_invoice()`.
///
/// An empty table area degrades the result (empty table plus a warning)
/// rather than failing; an undetectable supplier is an error.
pub fn extract_invoice(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &LayoutFile,
) -> Result<ExtractedInvoice, FakturaError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    if let Some(first) = pages.first() {
        info!(
            backend = extractor.backend_name(),
            pages = pages.len(),
            width = first.width,
            height = first.height,
            "extracted pdf"
        );
    }

    let mut warnings: Vec<ExtractionWarning> = Vec::new();
    let detection = field::detect_supplier(&pages, layout, &mut warnings)?;
    let supplier = detection.supplier;

    let grid = table::extract_table(&pages, &supplier.area, &supplier.pages, supplier.column_gap);
    if grid.is_empty() {
        warn!(supplier = %supplier.id, "table area produced no rows");
        warnings.push(ExtractionWarning {
            reason: format!("no table rows found in the area for supplier {}", supplier.id),
        });
    }

    let table = parsing::project_table(&grid, &supplier.columns, &mut warnings);

    Ok(ExtractedInvoice {
        supplier_id: supplier.id.clone(),
        probe: detection.probe.name.clone(),
        table,
        warnings,
    })
}

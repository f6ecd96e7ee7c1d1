use faktura_core::error::FakturaError;
use faktura_core::extraction::field;
use faktura_core::extraction::pdftotext::PdftotextExtractor;
use faktura_core::extraction::PdfExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    layout_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), FakturaError> {
    let layout = super::resolve_layout(layout_file)?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let pages = extractor.extract_pages(&pdf_bytes)?;

    let mut warnings = Vec::new();
    let detection = field::detect_supplier(&pages, &layout, &mut warnings)?;

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "supplier_id": detection.supplier.id,
            "probe": detection.probe.name,
            "page": detection.probe.page,
            "warnings": warnings,
        }))?,
        _ => output::table::print_detection(&detection, &warnings),
    }

    Ok(())
}

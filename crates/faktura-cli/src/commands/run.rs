use faktura_core::error::FakturaError;
use faktura_core::extraction::pdftotext::PdftotextExtractor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(
    input_dir: PathBuf,
    out: PathBuf,
    layout_file: Option<PathBuf>,
    open: bool,
) -> Result<(), FakturaError> {
    let layout = super::resolve_layout(layout_file)?;

    let pdf_path = faktura_core::locate::locate_invoice(&input_dir)?;
    info!(file = %pdf_path.display(), layout = %layout.name, "processing invoice");

    let pdf_bytes = std::fs::read(&pdf_path)?;
    let extractor = PdftotextExtractor::new();
    let invoice = faktura_core::extract_invoice(&pdf_bytes, &extractor, &layout)?;

    for w in &invoice.warnings {
        eprintln!("  warning: {}", w.reason);
    }

    // Detection guarantees the supplier exists in the layout.
    let output = layout
        .supplier(&invoice.supplier_id)
        .map(|s| s.output.clone())
        .unwrap_or_default();
    faktura_core::export::xlsx::write_invoice(&invoice, &output, &out)?;

    println!(
        "Supplier {} ({} probe): wrote {} row(s) to {}",
        invoice.supplier_id,
        invoice.probe,
        invoice.table.rows.len(),
        out.display()
    );

    if open {
        open_file(&out)?;
    }

    Ok(())
}

/// Launch the platform opener on the written file.
fn open_file(path: &Path) -> Result<(), FakturaError> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    let status = std::process::Command::new(opener).arg(path).status()?;
    if !status.success() {
        warn!(opener, code = ?status.code(), "opener exited with failure");
    }
    Ok(())
}

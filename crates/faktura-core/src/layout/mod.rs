pub mod builtin;
pub mod schema;

use crate::error::FakturaError;
use schema::LayoutFile;
use std::path::Path;

/// Load a layout descriptor from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutFile, FakturaError> {
    let content = std::fs::read_to_string(path).map_err(|e| FakturaError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout descriptor from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutFile, FakturaError> {
    let layout: LayoutFile = serde_json::from_str(json).map_err(|e| FakturaError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout descriptor from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutFile, FakturaError> {
    let layout: LayoutFile = serde_json::from_str(json).map_err(FakturaError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout descriptor is well-formed.
///
/// A descriptor that passes here can still miss on a given PDF (wrong
/// rectangles for the document at hand), but it cannot be structurally
/// nonsensical.
pub fn validate_layout(layout: &LayoutFile) -> Result<(), FakturaError> {
    if layout.probes.is_empty() {
        return Err(FakturaError::LayoutInvalid("probes must not be empty".into()));
    }

    for probe in &layout.probes {
        if probe.name.is_empty() {
            return Err(FakturaError::LayoutInvalid(
                "probe name must not be empty".into(),
            ));
        }
        if probe.page == 0 {
            return Err(FakturaError::LayoutInvalid(format!(
                "probe '{}' has page 0 (pages are 1-based)",
                probe.name
            )));
        }
        if probe.area.is_degenerate() {
            return Err(FakturaError::LayoutInvalid(format!(
                "probe '{}' has a degenerate area",
                probe.name
            )));
        }
    }

    if layout.suppliers.is_empty() {
        return Err(FakturaError::LayoutInvalid(
            "suppliers must not be empty".into(),
        ));
    }

    for (i, supplier) in layout.suppliers.iter().enumerate() {
        if supplier.id.is_empty() {
            return Err(FakturaError::LayoutInvalid(
                "supplier id must not be empty".into(),
            ));
        }
        if layout.suppliers[..i].iter().any(|s| s.id == supplier.id) {
            return Err(FakturaError::LayoutInvalid(format!(
                "duplicate supplier id '{}'",
                supplier.id
            )));
        }
        if supplier.area.is_degenerate() {
            return Err(FakturaError::LayoutInvalid(format!(
                "supplier '{}' has a degenerate table area",
                supplier.id
            )));
        }
        if supplier.pages.contains(&0) {
            return Err(FakturaError::LayoutInvalid(format!(
                "supplier '{}' lists page 0 (pages are 1-based)",
                supplier.id
            )));
        }
        if supplier.column_gap <= 0.0 {
            return Err(FakturaError::LayoutInvalid(format!(
                "supplier '{}' has non-positive column_gap",
                supplier.id
            )));
        }
        for col in &supplier.columns {
            if col.header.is_empty() {
                return Err(FakturaError::LayoutInvalid(format!(
                    "supplier '{}' has a column with an empty header",
                    supplier.id
                )));
            }
            if col.numeric && col.text {
                return Err(FakturaError::LayoutInvalid(format!(
                    "supplier '{}' column '{}' is both numeric and text",
                    supplier.id, col.header
                )));
            }
        }

        // The supplier cell must sit strictly above or strictly left of the
        // table block, otherwise the table overwrites it.
        let (srow, scol) = supplier.output.supplier_cell;
        let (orow, ocol) = supplier.output.table_origin;
        if srow >= orow && scol >= ocol {
            return Err(FakturaError::LayoutInvalid(format!(
                "supplier '{}': supplier cell ({}, {}) collides with the table block at ({}, {})",
                supplier.id, srow, scol, orow, ocol
            )));
        }
    }

    Ok(())
}

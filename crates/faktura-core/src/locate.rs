use crate::error::FakturaError;
use std::path::{Path, PathBuf};

/// Select the invoice PDF to process from `dir`.
///
/// Picks the lexicographically first regular file with a `.pdf` extension
/// (case-insensitive). An unreadable directory or one holding no PDF is a
/// missing-input error.
pub fn locate_invoice(dir: &Path) -> Result<PathBuf, FakturaError> {
    let entries = std::fs::read_dir(dir).map_err(|_| FakturaError::MissingInput {
        dir: dir.to_path_buf(),
    })?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if path.is_file() && is_pdf {
            candidates.push(path);
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| FakturaError::MissingInput {
            dir: dir.to_path_buf(),
        })
}

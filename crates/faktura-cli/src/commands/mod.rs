pub mod detect;
pub mod layouts;
pub mod run;

use faktura_core::error::FakturaError;
use faktura_core::layout::schema::LayoutFile;
use std::path::PathBuf;

/// Resolve the layout for a command: an explicit file wins, otherwise the
/// built-in 'bazaar' preset.
pub fn resolve_layout(layout_file: Option<PathBuf>) -> Result<LayoutFile, FakturaError> {
    match layout_file {
        Some(path) => faktura_core::layout::load_layout(&path),
        None => faktura_core::layout::builtin::load_preset("bazaar"),
    }
}

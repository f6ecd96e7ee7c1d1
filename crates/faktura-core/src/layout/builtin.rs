use crate::error::FakturaError;
use crate::layout::schema::LayoutFile;

const BAZAAR_JSON: &str = include_str!("../../../../layouts/bazaar.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["bazaar"];

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutFile, FakturaError> {
    let json = match name {
        "bazaar" => BAZAAR_JSON,
        _ => {
            return Err(FakturaError::LayoutInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    crate::layout::parse_layout_str(json)
}

use faktura_core::error::FakturaError;
use serde_json::Value;

pub fn print(value: &Value) -> Result<(), FakturaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

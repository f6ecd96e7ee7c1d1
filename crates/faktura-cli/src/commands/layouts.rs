use faktura_core::error::FakturaError;
use faktura_core::layout::builtin;
use std::path::Path;

use crate::output;

pub fn list() -> Result<(), FakturaError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        println!("  {:<10} {} (v{})", name, layout.name, layout.version);
        if let Some(ref desc) = layout.description {
            println!("             {}", desc);
        }
        println!(
            "             {} probe(s), {} supplier(s)",
            layout.probes.len(),
            layout.suppliers.len()
        );
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), FakturaError> {
    let layout = builtin::load_preset(preset)?;
    output::table::print_layout(&layout);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), FakturaError> {
    let layout = faktura_core::layout::load_layout(file)?;

    println!("Layout '{}' (v{}) is valid.", layout.name, layout.version);
    println!("  Probes: {}", layout.probes.len());
    println!("  Suppliers: {}", layout.suppliers.len());

    // Point out things that are legal but easy to get wrong.
    let mut notes = Vec::new();
    for supplier in &layout.suppliers {
        if supplier.columns.is_empty() {
            notes.push(format!(
                "supplier '{}' has no column projection: the raw grid is passed through with no header row",
                supplier.id
            ));
        }
        if supplier.pages.is_empty() {
            notes.push(format!(
                "supplier '{}' reads its table from every page",
                supplier.id
            ));
        }
    }

    if !notes.is_empty() {
        println!("\nNotes:");
        for n in &notes {
            println!("  - {}", n);
        }
    }

    Ok(())
}

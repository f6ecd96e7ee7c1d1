use faktura_core::extraction::field::Detection;
use faktura_core::layout::schema::LayoutFile;
use faktura_core::model::ExtractionWarning;

pub fn print_detection(detection: &Detection<'_>, warnings: &[ExtractionWarning]) {
    println!("Supplier: {}", detection.supplier.id);
    println!(
        "Matched probe: '{}' on page {}",
        detection.probe.name, detection.probe.page
    );

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in warnings {
            println!("  - {}", w.reason);
        }
    }
}

pub fn print_layout(layout: &LayoutFile) {
    println!("{} (version {})\n", layout.name, layout.version);
    if let Some(ref desc) = layout.description {
        println!("{}\n", desc);
    }

    println!("Probes (checked in order):");
    for probe in &layout.probes {
        println!(
            "  {:<16} page {}  ({}, {}, {}, {})",
            probe.name,
            probe.page,
            probe.area.top,
            probe.area.left,
            probe.area.bottom,
            probe.area.right
        );
    }
    println!();

    for supplier in &layout.suppliers {
        println!("Supplier {}:", supplier.id);
        println!(
            "  Table area: ({}, {}, {}, {})",
            supplier.area.top, supplier.area.left, supplier.area.bottom, supplier.area.right
        );
        if supplier.pages.is_empty() {
            println!("  Pages: all");
        } else {
            let pages: Vec<String> = supplier.pages.iter().map(|p| p.to_string()).collect();
            println!("  Pages: {}", pages.join(", "));
        }

        if supplier.columns.is_empty() {
            println!("  Columns: pass-through (no header row)");
        } else {
            println!("  Columns:");
            for col in &supplier.columns {
                let kind = if col.numeric {
                    " (numeric)"
                } else if col.text {
                    " (text)"
                } else {
                    ""
                };
                println!("    [{}] {}{}", col.source, col.header, kind);
            }
        }

        let (srow, scol) = supplier.output.supplier_cell;
        let (orow, ocol) = supplier.output.table_origin;
        println!(
            "  Output: sheet '{}', supplier cell ({}, {}), table origin ({}, {})",
            supplier.output.sheet, srow, scol, orow, ocol
        );
        println!();
    }
}

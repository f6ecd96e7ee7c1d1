//! Integration tests for the extract_invoice() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built pages without invoking
//! pdftotext, so these tests run without poppler-utils. Written output is
//! verified by reading the xlsx back with calamine.

use calamine::{Data, Reader, Xlsx};
use faktura_core::error::FakturaError;
use faktura_core::export::xlsx::write_invoice;
use faktura_core::extract_invoice;
use faktura_core::extraction::{Page, PdfExtractor, Word};
use faktura_core::layout::parse_layout_str;
use faktura_core::layout::schema::LayoutFile;
use faktura_core::model::Cell;
use rust_decimal_macros::dec;

struct MockExtractor {
    pages: Vec<Page>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<Page>, FakturaError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn word(text: &str, x: f32, y: f32) -> Word {
    Word {
        text: text.to_string(),
        x_min: x,
        y_min: y,
        x_max: x + 8.0 * text.chars().count() as f32,
        y_max: y + 10.0,
    }
}

fn page(number: usize, words: Vec<Word>) -> Page {
    Page {
        number,
        width: 595.0,
        height: 842.0,
        words,
    }
}

/// Supplier stamp at (420, 52), table area below y=100. Pass-through
/// projection unless the test overrides the supplier entry.
fn layout(suppliers_json: &str) -> LayoutFile {
    parse_layout_str(&format!(
        r#"{{
            "name": "Test", "version": "1.0",
            "probes": [
                {{ "name": "header", "area": {{ "top": 0, "left": 0, "bottom": 20, "right": 100 }} }},
                {{ "name": "stamp", "area": {{ "top": 50, "left": 400, "bottom": 70, "right": 500 }} }}
            ],
            "suppliers": {suppliers_json}
        }}"#
    ))
    .unwrap()
}

fn pass_through_layout() -> LayoutFile {
    layout(r#"[{ "id": "SUP-12345", "area": { "top": 100, "left": 0, "bottom": 500, "right": 595 } }]"#)
}

/// The 3x2 table from a well-formed invoice plus the supplier stamp.
fn invoice_words() -> Vec<Word> {
    vec![
        word("SUP-12345", 420.0, 52.0),
        word("Item", 10.0, 110.0),
        word("Qty", 100.0, 110.0),
        word("Widget", 10.0, 130.0),
        word("5", 100.0, 130.0),
        word("Gadget", 10.0, 150.0),
        word("2", 100.0, 150.0),
    ]
}

#[test]
fn end_to_end_table_and_supplier() {
    let layout = pass_through_layout();
    let extractor = MockExtractor {
        pages: vec![page(1, invoice_words())],
    };

    let invoice = extract_invoice(&[], &extractor, &layout).unwrap();

    assert_eq!(invoice.supplier_id, "SUP-12345");
    assert_eq!(invoice.probe, "stamp");
    assert!(invoice.table.headers.is_empty());
    assert_eq!(
        invoice.table.rows,
        vec![
            vec![Cell::Text("Item".into()), Cell::Text("Qty".into())],
            vec![Cell::Text("Widget".into()), Cell::Text("5".into())],
            vec![Cell::Text("Gadget".into()), Cell::Text("2".into())],
        ]
    );
    assert!(invoice.warnings.is_empty());

    // Write and read back: supplier in A1, table from row 2.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");
    let output = layout.supplier("SUP-12345").unwrap().output.clone();
    write_invoice(&invoice, &output, &path).unwrap();

    let mut workbook: Xlsx<_> = calamine::open_workbook(&path).unwrap();
    let sheet = workbook.worksheet_range("Invoice").unwrap();
    assert_eq!(
        sheet.get_value((0, 0)),
        Some(&Data::String("SUP-12345".into()))
    );
    assert_eq!(sheet.get_value((1, 0)), Some(&Data::String("Item".into())));
    assert_eq!(sheet.get_value((1, 1)), Some(&Data::String("Qty".into())));
    assert_eq!(sheet.get_value((2, 0)), Some(&Data::String("Widget".into())));
    assert_eq!(sheet.get_value((2, 1)), Some(&Data::String("5".into())));
    assert_eq!(sheet.get_value((3, 0)), Some(&Data::String("Gadget".into())));
    assert_eq!(sheet.get_value((3, 1)), Some(&Data::String("2".into())));
}

#[test]
fn empty_table_area_degrades_with_warning() {
    let layout = pass_through_layout();
    let extractor = MockExtractor {
        pages: vec![page(1, vec![word("SUP-12345", 420.0, 52.0)])],
    };

    let invoice = extract_invoice(&[], &extractor, &layout).unwrap();

    assert!(invoice.table.is_empty());
    assert_eq!(invoice.warnings.len(), 1);
    assert!(invoice.warnings[0].reason.contains("no table rows"));

    // The output file is still created.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");
    let output = layout.supplier("SUP-12345").unwrap().output.clone();
    write_invoice(&invoice, &output, &path).unwrap();

    let mut workbook: Xlsx<_> = calamine::open_workbook(&path).unwrap();
    let sheet = workbook.worksheet_range("Invoice").unwrap();
    assert_eq!(
        sheet.get_value((0, 0)),
        Some(&Data::String("SUP-12345".into()))
    );
    assert_eq!(sheet.get_value((1, 0)), None);
}

#[test]
fn unregistered_probe_text_warns_then_next_probe_matches() {
    let layout = pass_through_layout();
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            vec![
                word("INVOICE", 10.0, 5.0),
                word("SUP-12345", 420.0, 52.0),
                word("Widget", 10.0, 130.0),
            ],
        )],
    };

    let invoice = extract_invoice(&[], &extractor, &layout).unwrap();

    assert_eq!(invoice.supplier_id, "SUP-12345");
    assert!(invoice
        .warnings
        .iter()
        .any(|w| w.reason.contains("INVOICE")));
}

#[test]
fn no_probe_matches_is_an_error() {
    let layout = pass_through_layout();
    let extractor = MockExtractor {
        pages: vec![page(1, vec![word("Widget", 10.0, 130.0)])],
    };

    let result = extract_invoice(&[], &extractor, &layout);
    assert!(matches!(
        result,
        Err(FakturaError::SupplierNotDetected { probes: 2 })
    ));
}

#[test]
fn column_projection_shapes_the_output() {
    let layout = layout(
        r#"[{
            "id": "SUP-12345",
            "area": { "top": 100, "left": 0, "bottom": 500, "right": 595 },
            "columns": [
                { "source": 1, "header": "Description" },
                { "source": 0, "header": "Code", "text": true },
                { "source": 2, "header": "Quantity", "numeric": true }
            ]
        }]"#,
    );
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            vec![
                word("SUP-12345", 420.0, 52.0),
                word("00123", 10.0, 110.0),
                word("Widget", 100.0, 110.0),
                word("1.234,56kg", 200.0, 110.0),
            ],
        )],
    };

    let invoice = extract_invoice(&[], &extractor, &layout).unwrap();

    assert_eq!(invoice.table.headers, vec!["Description", "Code", "Quantity"]);
    assert_eq!(
        invoice.table.rows,
        vec![vec![
            Cell::Text("Widget".into()),
            Cell::Text("00123".into()),
            Cell::Number(dec!(1234.56)),
        ]]
    );

    // Code survives as a string with leading zeros after a write round-trip.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");
    let output = layout.supplier("SUP-12345").unwrap().output.clone();
    write_invoice(&invoice, &output, &path).unwrap();

    let mut workbook: Xlsx<_> = calamine::open_workbook(&path).unwrap();
    let sheet = workbook.worksheet_range("Invoice").unwrap();
    assert_eq!(
        sheet.get_value((1, 0)),
        Some(&Data::String("Description".into()))
    );
    assert_eq!(sheet.get_value((2, 1)), Some(&Data::String("00123".into())));
    assert_eq!(sheet.get_value((2, 2)), Some(&Data::Float(1234.56)));
}

#[test]
fn table_rows_concatenate_across_pages() {
    let layout = layout(
        r#"[{
            "id": "SUP-12345",
            "area": { "top": 100, "left": 0, "bottom": 500, "right": 595 }
        }]"#,
    );
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                vec![word("SUP-12345", 420.0, 52.0), word("first", 10.0, 110.0)],
            ),
            page(2, vec![word("second", 10.0, 110.0)]),
        ],
    };

    let invoice = extract_invoice(&[], &extractor, &layout).unwrap();

    assert_eq!(
        invoice.table.rows,
        vec![
            vec![Cell::Text("first".into())],
            vec![Cell::Text("second".into())],
        ]
    );
}

#[test]
fn extraction_is_idempotent() {
    let layout = pass_through_layout();
    let extractor = MockExtractor {
        pages: vec![page(1, invoice_words())],
    };

    let first = extract_invoice(&[], &extractor, &layout).unwrap();
    let second = extract_invoice(&[], &extractor, &layout).unwrap();

    assert_eq!(first.supplier_id, second.supplier_id);
    assert_eq!(first.table, second.table);
}

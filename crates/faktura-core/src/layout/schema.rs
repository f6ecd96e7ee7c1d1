use serde::{Deserialize, Serialize};

/// Rectangle on a PDF page, in points measured from the top-left corner.
///
/// Field order follows the `(top, left, bottom, right)` convention used by
/// common PDF table-extraction tools, so rectangles can be carried over from
/// existing layout notes unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// A candidate region where a supplier number may be printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeDef {
    pub name: String,
    #[serde(default = "default_page")]
    pub page: usize,
    pub area: Rect,
}

fn default_page() -> usize {
    1
}

/// A layout descriptor: where to look for supplier numbers, and per supplier,
/// where its invoice table lives and how to shape the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Ordered candidate regions, checked until one yields a registered id.
    pub probes: Vec<ProbeDef>,
    pub suppliers: Vec<SupplierDef>,
}

impl LayoutFile {
    pub fn supplier(&self, id: &str) -> Option<&SupplierDef> {
        self.suppliers.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierDef {
    /// The supplier number exactly as printed on the invoice.
    pub id: String,
    /// Region holding the invoice table.
    pub area: Rect,
    /// Pages to read the table from; empty means every page.
    #[serde(default)]
    pub pages: Vec<usize>,
    /// Horizontal gaps narrower than this (in points) merge into one column.
    #[serde(default = "default_column_gap")]
    pub column_gap: f32,
    /// Column projection applied to the raw grid; empty means pass-through.
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub output: OutputDef,
}

fn default_column_gap() -> f32 {
    6.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Zero-based index into the raw extracted grid.
    pub source: usize,
    pub header: String,
    /// Strip non-numeric noise and emit a number cell.
    #[serde(default)]
    pub numeric: bool,
    /// Always emit a string cell (keeps leading zeros).
    #[serde(default)]
    pub text: bool,
}

/// Where extracted data lands in the output workbook. Cells are zero-based
/// `(row, column)` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDef {
    #[serde(default = "default_sheet")]
    pub sheet: String,
    #[serde(default)]
    pub supplier_cell: (u32, u16),
    /// Top-left cell of the table block (header row, if any).
    #[serde(default = "default_origin")]
    pub table_origin: (u32, u16),
}

fn default_sheet() -> String {
    "Invoice".to_string()
}

fn default_origin() -> (u32, u16) {
    (1, 0)
}

impl Default for OutputDef {
    fn default() -> Self {
        OutputDef {
            sheet: default_sheet(),
            supplier_cell: (0, 0),
            table_origin: default_origin(),
        }
    }
}

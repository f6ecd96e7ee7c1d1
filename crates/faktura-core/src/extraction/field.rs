use crate::error::FakturaError;
use crate::extraction::{table, Page, Word};
use crate::layout::schema::{LayoutFile, ProbeDef, Rect, SupplierDef};
use crate::model::ExtractionWarning;
use tracing::{debug, info, warn};

/// Raw text inside a rectangular region of one page.
///
/// Words whose centre falls in the region are read in row order, left to
/// right, and joined with single spaces. An empty region yields an empty
/// string, not an error; no trimming happens beyond the join itself.
pub fn region_text(pages: &[Page], page_number: usize, area: &Rect) -> String {
    let words: Vec<&Word> = pages
        .iter()
        .filter(|p| p.number == page_number)
        .flat_map(|p| p.words.iter())
        .filter(|w| area.contains(w.x_center(), w.y_center()))
        .collect();

    let rows = table::cluster_rows(words);
    rows.iter()
        .flatten()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of supplier probing: the matched supplier and the probe that hit.
#[derive(Debug)]
pub struct Detection<'a> {
    pub supplier: &'a SupplierDef,
    pub probe: &'a ProbeDef,
}

/// Probe the layout's candidate regions, in order, for a registered supplier
/// number.
///
/// The first probe whose region text exactly equals a registered supplier id
/// wins. Probe text that matches no registered supplier is recorded as a
/// warning and probing continues; if no probe matches, the run fails with
/// `SupplierNotDetected`.
pub fn detect_supplier<'a>(
    pages: &[Page],
    layout: &'a LayoutFile,
    warnings: &mut Vec<ExtractionWarning>,
) -> Result<Detection<'a>, FakturaError> {
    for probe in &layout.probes {
        info!(probe = %probe.name, page = probe.page, "checking probe region");
        let text = region_text(pages, probe.page, &probe.area);

        if text.is_empty() {
            debug!(probe = %probe.name, "nothing found, checking next probe");
            continue;
        }

        match layout.supplier(&text) {
            Some(supplier) => {
                info!(supplier = %supplier.id, probe = %probe.name, "probe matched");
                return Ok(Detection { supplier, probe });
            }
            None => {
                warn!(probe = %probe.name, text = %text, "probe text is not a registered supplier");
                warnings.push(ExtractionWarning {
                    reason: format!(
                        "probe '{}' found '{}' which is not a registered supplier",
                        probe.name, text
                    ),
                });
            }
        }
    }

    Err(FakturaError::SupplierNotDetected {
        probes: layout.probes.len(),
    })
}

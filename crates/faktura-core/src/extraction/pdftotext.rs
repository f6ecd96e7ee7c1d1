use crate::error::FakturaError;
use crate::extraction::{Page, PdfExtractor, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout` so every word carries its bounding box;
/// region filters are then applied against word centres.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FakturaError> {
        // Write PDF bytes to a temp file; dropped (and deleted) on all paths.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| FakturaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| FakturaError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FakturaError::PdftotextNotFound
                } else {
                    FakturaError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(FakturaError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;

        for page in &pages {
            debug!(
                page = page.number,
                width = page.width,
                height = page.height,
                words = page.words.len(),
                "extracted page"
            );
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse the XML emitted by `pdftotext -bbox-layout`.
///
/// Pages carry width/height attributes but no number; numbering follows
/// document order. Only `<page>` and `<word>` elements matter here, the
/// flow/block/line grouping is ignored.
fn parse_bbox_xml(xml: &str) -> Result<Vec<Page>, FakturaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Page> = Vec::new();
    let mut current_box: Option<(f32, f32, f32, f32)> = None;
    let mut current_text = String::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| FakturaError::Extraction(format!("bad bbox XML: {}", e)))?
        {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"page" => {
                pages.push(Page {
                    number: pages.len() + 1,
                    width: attr_f32(e, "width").unwrap_or(0.0),
                    height: attr_f32(e, "height").unwrap_or(0.0),
                    words: Vec::new(),
                });
            }
            Event::Start(ref e) if e.local_name().as_ref() == b"word" => {
                current_box = Some((
                    attr_f32(e, "xMin").unwrap_or(0.0),
                    attr_f32(e, "yMin").unwrap_or(0.0),
                    attr_f32(e, "xMax").unwrap_or(0.0),
                    attr_f32(e, "yMax").unwrap_or(0.0),
                ));
                current_text.clear();
            }
            Event::Text(t) => {
                if current_box.is_some() {
                    let text = t
                        .unescape()
                        .map_err(|e| FakturaError::Extraction(format!("bad bbox XML: {}", e)))?;
                    current_text.push_str(&text);
                }
            }
            Event::End(ref e) if e.local_name().as_ref() == b"word" => {
                if let (Some((x_min, y_min, x_max, y_max)), Some(page)) =
                    (current_box.take(), pages.last_mut())
                {
                    let text = current_text.trim().to_string();
                    if !text.is_empty() {
                        page.words.push(Word {
                            text,
                            x_min,
                            y_min,
                            x_max,
                            y_max,
                        });
                    }
                }
                current_text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f32(e: &BytesStart, name: &str) -> Option<f32> {
    let attr = e.try_get_attribute(name).ok().flatten()?;
    attr.unescape_value().ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<body>
<doc>
  <page width="595.3" height="841.9">
    <flow>
      <block xMin="51.0" yMin="52.0" xMax="466.0" yMax="63.0">
        <line xMin="420.0" yMin="52.3" xMax="466.0" yMax="63.0">
          <word xMin="420.0" yMin="52.3" xMax="466.0" yMax="63.0">094384144</word>
        </line>
      </block>
      <block xMin="10.0" yMin="300.0" xMax="200.0" yMax="312.0">
        <line xMin="10.0" yMin="300.0" xMax="200.0" yMax="312.0">
          <word xMin="10.0" yMin="300.0" xMax="60.0" yMax="312.0">Widget</word>
          <word xMin="100.0" yMin="300.0" xMax="130.0" yMax="312.0">A &amp; B</word>
        </line>
      </block>
    </flow>
  </page>
  <page width="595.3" height="841.9">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn parses_pages_and_words() {
        let pages = parse_bbox_xml(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].width, 595.3);
        assert_eq!(pages[0].words.len(), 3);
        assert_eq!(pages[0].words[0].text, "094384144");
        assert_eq!(pages[0].words[0].x_min, 420.0);
        assert!(pages[1].words.is_empty());
    }

    #[test]
    fn unescapes_entities() {
        let pages = parse_bbox_xml(SAMPLE).unwrap();
        assert_eq!(pages[0].words[2].text, "A & B");
    }

    #[test]
    fn empty_document() {
        let pages = parse_bbox_xml("<doc></doc>").unwrap();
        assert!(pages.is_empty());
    }
}

use crate::extraction::{Page, Word};
use crate::layout::schema::Rect;

/// Words whose vertical centres differ by no more than this (in points)
/// belong to the same row.
const ROW_TOLERANCE: f32 = 4.0;

/// Reconstruct the table inside `area` as a rectangular grid of strings.
///
/// Words whose centre falls in the area are clustered into rows by vertical
/// centre, column spans are derived by merging word x-intervals across every
/// row (gaps narrower than `column_gap` merge into one column), and each cell
/// joins its words in x order. Cells with no words become empty strings.
///
/// `page_filter` selects which pages contribute rows; empty means all pages,
/// concatenated in page order. No words in the area on any selected page
/// yields an empty grid, not an error.
pub fn extract_table(
    pages: &[Page],
    area: &Rect,
    page_filter: &[usize],
    column_gap: f32,
) -> Vec<Vec<String>> {
    let mut all_rows: Vec<Vec<&Word>> = Vec::new();

    for page in pages {
        if !page_filter.is_empty() && !page_filter.contains(&page.number) {
            continue;
        }
        let words: Vec<&Word> = page
            .words
            .iter()
            .filter(|w| area.contains(w.x_center(), w.y_center()))
            .collect();
        all_rows.extend(cluster_rows(words));
    }

    if all_rows.is_empty() {
        return Vec::new();
    }

    let spans = column_spans(&all_rows, column_gap);
    all_rows.iter().map(|row| project_row(row, &spans)).collect()
}

/// Group words into rows by vertical centre, top to bottom; each row is
/// sorted left to right.
pub(crate) fn cluster_rows(mut words: Vec<&Word>) -> Vec<Vec<&Word>> {
    words.sort_by(|a, b| {
        a.y_center()
            .total_cmp(&b.y_center())
            .then(a.x_min.total_cmp(&b.x_min))
    });

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    let mut row_y = f32::NEG_INFINITY;

    for word in words {
        if (word.y_center() - row_y).abs() > ROW_TOLERANCE {
            rows.push(Vec::new());
            row_y = word.y_center();
        }
        if let Some(row) = rows.last_mut() {
            row.push(word);
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    }

    rows
}

/// Merge the x-intervals of every word across all rows into column spans.
fn column_spans(rows: &[Vec<&Word>], column_gap: f32) -> Vec<(f32, f32)> {
    let mut intervals: Vec<(f32, f32)> = rows
        .iter()
        .flatten()
        .map(|w| (w.x_min, w.x_max))
        .collect();
    intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut spans: Vec<(f32, f32)> = Vec::new();
    for (start, end) in intervals {
        match spans.last_mut() {
            Some(last) if start - last.1 < column_gap => {
                last.1 = last.1.max(end);
            }
            _ => spans.push((start, end)),
        }
    }
    spans
}

/// Assign a row's words to column spans and join cell words with spaces.
fn project_row(row: &[&Word], spans: &[(f32, f32)]) -> Vec<String> {
    let mut cells = vec![String::new(); spans.len()];

    for word in row {
        let x = word.x_center();
        if let Some(i) = spans.iter().position(|&(start, end)| x >= start && x <= end) {
            if !cells[i].is_empty() {
                cells[i].push(' ');
            }
            cells[i].push_str(&word.text);
        }
    }

    cells
}

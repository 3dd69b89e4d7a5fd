use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::ops::Range;
use std::path::Path;

use super::rows::DocumentTable;
use super::ExportError;

// A4 landscape.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const LEFT_MARGIN_MM: f32 = 14.0;
const TITLE_TOP_MM: f32 = 12.0;
const TABLE_TOP_MM: f32 = 16.0;
const BOTTOM_MARGIN_MM: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const TITLE_FONT_SIZE: f32 = 12.0;
const TABLE_FONT_SIZE: f32 = 8.0;
// Rough Helvetica advance at 8pt.
const CHAR_WIDTH_MM: f32 = 1.6;

const COLUMN_WIDTHS_MM: [f32; 8] = [62.0, 40.0, 28.0, 22.0, 22.0, 20.0, 26.0, 28.0];

/// Table lines, header included, that fit on one page.
pub const LINES_PER_PAGE: usize = 36;

/// Group rows into pages by their height in lines. Always yields at least
/// one page so an empty table still prints its header. A row taller than a
/// page gets a page to itself.
pub fn paginate(row_heights: &[usize], lines_per_page: usize) -> Vec<Range<usize>> {
    let capacity = lines_per_page.max(1);
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (index, height) in row_heights.iter().copied().enumerate() {
        if used > 0 && used + height > capacity {
            pages.push(start..index);
            start = index;
            used = 0;
        }
        used += height;
    }
    if pages.is_empty() || start < row_heights.len() {
        pages.push(start..row_heights.len());
    }
    pages
}

/// Wrap a cell onto as many lines as its column needs. Words longer than a
/// line are split.
pub fn wrap_cell(text: &str, width_mm: f32) -> Vec<String> {
    let max_chars = (width_mm / CHAR_WIDTH_MM).floor().max(1.0) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if !current.is_empty() && needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn wrap_row(cells: &[String]) -> Vec<Vec<String>> {
    cells
        .iter()
        .zip(COLUMN_WIDTHS_MM)
        .map(|(cell, width)| wrap_cell(cell, width))
        .collect()
}

fn row_height(row: &[Vec<String>]) -> usize {
    row.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

pub fn write_pdf(title: &str, table: &DocumentTable, path: &Path) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Vacancies",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let header = wrap_row(&table.headers);
    let body: Vec<Vec<Vec<String>>> = table.body.iter().map(|row| wrap_row(row)).collect();
    let heights: Vec<usize> = body.iter().map(|row| row_height(row)).collect();

    let body_lines = LINES_PER_PAGE.saturating_sub(row_height(&header));
    for (page_index, range) in paginate(&heights, body_lines).into_iter().enumerate() {
        let layer = if page_index == 0 {
            let layer = doc.get_page(first_page).get_layer(first_layer);
            layer.use_text(
                title,
                TITLE_FONT_SIZE,
                Mm(LEFT_MARGIN_MM),
                Mm(PAGE_HEIGHT_MM - TITLE_TOP_MM),
                &bold,
            );
            layer
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Vacancies");
            doc.get_page(page).get_layer(layer)
        };

        let mut top = PAGE_HEIGHT_MM - TABLE_TOP_MM;
        top = draw_row(&layer, &header, top, &bold);
        for row in &body[range] {
            top = draw_row(&layer, row, top, &regular);
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

/// Draw one wrapped row below `top` and return the new top edge. Lines past
/// the bottom margin are not drawn; only a single row taller than a whole
/// page reaches it.
fn draw_row(
    layer: &PdfLayerReference,
    cells: &[Vec<String>],
    top: f32,
    font: &IndirectFontRef,
) -> f32 {
    let mut x = LEFT_MARGIN_MM;
    for (lines, width) in cells.iter().zip(COLUMN_WIDTHS_MM) {
        for (index, line) in lines.iter().enumerate() {
            let baseline = top - LINE_HEIGHT_MM * (index as f32 + 1.0);
            if baseline < BOTTOM_MARGIN_MM {
                break;
            }
            layer.use_text(line.as_str(), TABLE_FONT_SIZE, Mm(x), Mm(baseline), font);
        }
        x += width;
    }
    top - LINE_HEIGHT_MM * row_height(cells) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staff::export::rows::DOCUMENT_HEADERS;

    #[test]
    fn paginate_fills_pages_by_line_height() {
        assert_eq!(paginate(&[], LINES_PER_PAGE), vec![0..0]);
        assert_eq!(paginate(&[1, 1, 1], LINES_PER_PAGE), vec![0..3]);
        assert_eq!(paginate(&[1; 71], 35), vec![0..35, 35..70, 70..71]);
        assert_eq!(paginate(&[2, 2, 1], 4), vec![0..2, 2..3]);
        assert_eq!(paginate(&[1, 9, 1], 4), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn page_capacity_matches_layout() {
        let usable = PAGE_HEIGHT_MM - TABLE_TOP_MM - BOTTOM_MARGIN_MM;
        assert!(LINES_PER_PAGE as f32 * LINE_HEIGHT_MM <= usable);
    }

    #[test]
    fn long_cells_wrap_without_losing_text() {
        assert_eq!(wrap_cell("Engineer", 62.0), vec!["Engineer".to_string()]);

        let department = "Customer Success & Onboarding";
        let lines = wrap_cell(department, 40.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() * 16 <= 400));
        assert_eq!(lines.join(" "), department);

        let lines = wrap_cell("Supercalifragilistic", 17.0);
        assert_eq!(lines, vec!["Supercalif".to_string(), "ragilistic".to_string()]);
        assert_eq!(wrap_cell("", 22.0), vec![String::new()]);
    }

    #[test]
    fn header_rows_report_their_wrapped_height() {
        let headers: Vec<String> = DOCUMENT_HEADERS.iter().map(|h| h.to_string()).collect();
        assert_eq!(row_height(&wrap_row(&headers)), 1);

        let headers: Vec<String> = ["Job Title", "Department", "Employment Type Category"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(row_height(&wrap_row(&headers)), 2);
    }

    #[test]
    fn pdf_is_written_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("E1-vacancies.pdf");
        let table = DocumentTable {
            headers: vec!["Job Title".to_string()],
            body: vec![vec!["Engineer".to_string()]],
        };

        write_pdf("Ada Lovelace - Vacancies", &table, &path).expect("pdf written");
        let bytes = std::fs::read(&path).expect("pdf readable");
        assert!(bytes.starts_with(b"%PDF"));
    }
}

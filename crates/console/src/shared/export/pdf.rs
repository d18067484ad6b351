//! Paginated PDF export of report sections
//!
//! Layout is computed first by [`plan_layout`] in millimetres from the top
//! of the page, then drawn with `printpdf`. Sections flow one after another;
//! a table that does not fit continues on the next page with its header row
//! repeated.

use contracts::shared::report::{ReportRow, ReportSection};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::io::BufWriter;

use crate::shared::error::{ConsoleError, ConsoleResult};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN_X: f32 = 14.0;
/// First text line on every page
pub const TOP: f32 = 15.0;
/// Nothing is placed below this offset
pub const BOTTOM: f32 = PAGE_HEIGHT - 15.0;
pub const ROW_HEIGHT: f32 = 7.0;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const CELL_PADDING: f32 = 2.0;

/// Subtotal row fill, RGB 230/230/230
const SHADE: f32 = 230.0 / 255.0;

/// One positioned element; `top` is measured from the top edge of `page`
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Text {
        page: usize,
        top: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    HeaderRow {
        page: usize,
        top: f32,
        section: usize,
    },
    Row {
        page: usize,
        top: f32,
        section: usize,
        row: usize,
    },
}

impl Placement {
    pub fn page(&self) -> usize {
        match self {
            Placement::Text { page, .. }
            | Placement::HeaderRow { page, .. }
            | Placement::Row { page, .. } => *page,
        }
    }

    pub fn top(&self) -> f32 {
        match self {
            Placement::Text { top, .. }
            | Placement::HeaderRow { top, .. }
            | Placement::Row { top, .. } => *top,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub placements: Vec<Placement>,
    pub page_count: usize,
    /// Cursor after the last section
    pub cursor: f32,
}

struct Cursor {
    page: usize,
    top: f32,
}

impl Cursor {
    /// Move to a fresh page unless `height` still fits
    fn reserve(&mut self, height: f32) {
        if self.top + height > BOTTOM && self.top > TOP {
            self.page += 1;
            self.top = TOP;
        }
    }
}

/// Position the title and every section without drawing anything.
///
/// Empty headings are skipped, sections without columns render only their
/// notes. Headings are kept on the same page as the first table row.
pub fn plan_layout(title: &str, sections: &[ReportSection]) -> LayoutPlan {
    let mut placements = Vec::new();
    let mut cursor = Cursor { page: 0, top: TOP };

    placements.push(Placement::Text {
        page: 0,
        top: cursor.top,
        size: TITLE_SIZE,
        bold: true,
        text: title.to_string(),
    });
    cursor.top += 10.0;

    for (section_idx, section) in sections.iter().enumerate() {
        let has_table = !section.columns.is_empty();

        if !section.heading.trim().is_empty() {
            let keep_with = if has_table { 2.0 * ROW_HEIGHT } else { 0.0 };
            cursor.reserve(6.0 + keep_with);
            placements.push(Placement::Text {
                page: cursor.page,
                top: cursor.top,
                size: HEADING_SIZE,
                bold: true,
                text: section.heading.clone(),
            });
            cursor.top += 6.0;
        }

        if has_table {
            cursor.reserve(2.0 * ROW_HEIGHT);
            placements.push(Placement::HeaderRow {
                page: cursor.page,
                top: cursor.top,
                section: section_idx,
            });
            cursor.top += ROW_HEIGHT;

            for row_idx in 0..section.rows.len() {
                if cursor.top + ROW_HEIGHT > BOTTOM {
                    cursor.page += 1;
                    cursor.top = TOP;
                    placements.push(Placement::HeaderRow {
                        page: cursor.page,
                        top: cursor.top,
                        section: section_idx,
                    });
                    cursor.top += ROW_HEIGHT;
                }
                placements.push(Placement::Row {
                    page: cursor.page,
                    top: cursor.top,
                    section: section_idx,
                    row: row_idx,
                });
                cursor.top += ROW_HEIGHT;
            }
            cursor.top += 6.0;
        }

        for note in &section.notes {
            cursor.reserve(6.0);
            placements.push(Placement::Text {
                page: cursor.page,
                top: cursor.top,
                size: BODY_SIZE,
                bold: false,
                text: note.clone(),
            });
            cursor.top += 6.0;
        }

        cursor.top += 4.0;
    }

    LayoutPlan {
        placements,
        page_count: cursor.page + 1,
        cursor: cursor.top,
    }
}

/// Render `title` and `sections` to PDF bytes
pub fn export_document(title: &str, sections: &[ReportSection]) -> ConsoleResult<Vec<u8>> {
    let plan = plan_layout(title, sections);

    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ConsoleError::Export(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ConsoleError::Export(e.to_string()))?;

    let mut layers = vec![doc.get_page(page1).get_layer(layer1)];
    for _ in 1..plan.page_count {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report Continued");
        layers.push(doc.get_page(page).get_layer(layer));
    }
    for layer in &layers {
        layer.set_outline_thickness(0.3);
        layer.set_outline_color(black());
    }

    let fonts = Fonts {
        regular: &font,
        bold: &font_bold,
    };

    for placement in &plan.placements {
        let layer = &layers[placement.page()];
        match placement {
            Placement::Text {
                top,
                size,
                bold,
                text,
                ..
            } => {
                let f = if *bold { fonts.bold } else { fonts.regular };
                layer.use_text(text.as_str(), *size, Mm(MARGIN_X), Mm(PAGE_HEIGHT - top), f);
            }
            Placement::HeaderRow { top, section, .. } => {
                let columns = &sections[*section].columns;
                draw_header(layer, &fonts, *top, columns);
            }
            Placement::Row {
                top, section, row, ..
            } => {
                let section = &sections[*section];
                draw_row(layer, &fonts, *top, section.columns.len(), &section.rows[*row]);
            }
        }
    }

    tracing::debug!(
        "PDF '{}': {} sections, {} pages",
        title,
        sections.len(),
        plan.page_count
    );

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| ConsoleError::Export(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ConsoleError::Export(e.to_string()))
}

struct Fonts<'a> {
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn column_width(count: usize) -> f32 {
    (PAGE_WIDTH - 2.0 * MARGIN_X) / count.max(1) as f32
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts<'_>, top: f32, columns: &[String]) {
    let width = column_width(columns.len());

    layer.set_fill_color(Color::Rgb(Rgb::new(41.0 / 255.0, 128.0 / 255.0, 185.0 / 255.0, None)));
    for idx in 0..columns.len() {
        cell_rect(layer, MARGIN_X + idx as f32 * width, top, width, PaintMode::FillStroke);
    }

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    for (idx, title) in columns.iter().enumerate() {
        cell_text(layer, fonts.bold, MARGIN_X + idx as f32 * width, top, width, title);
    }
    layer.set_fill_color(black());
}

fn draw_row(
    layer: &PdfLayerReference,
    fonts: &Fonts<'_>,
    top: f32,
    column_count: usize,
    row: &ReportRow,
) {
    let width = column_width(column_count);

    let mode = if row.emphasis {
        layer.set_fill_color(Color::Rgb(Rgb::new(SHADE, SHADE, SHADE, None)));
        PaintMode::FillStroke
    } else {
        PaintMode::Stroke
    };
    for idx in 0..column_count {
        cell_rect(layer, MARGIN_X + idx as f32 * width, top, width, mode);
    }
    layer.set_fill_color(black());

    let font = if row.emphasis { fonts.bold } else { fonts.regular };
    for idx in 0..column_count {
        let text = row.cells.get(idx).map(String::as_str).unwrap_or_default();
        cell_text(layer, font, MARGIN_X + idx as f32 * width, top, width, text);
    }
}

fn cell_rect(layer: &PdfLayerReference, x: f32, top: f32, width: f32, mode: PaintMode) {
    let bottom = PAGE_HEIGHT - top - ROW_HEIGHT;
    let points = vec![
        (Point::new(Mm(x), Mm(bottom)), false),
        (Point::new(Mm(x + width), Mm(bottom)), false),
        (Point::new(Mm(x + width), Mm(bottom + ROW_HEIGHT)), false),
        (Point::new(Mm(x), Mm(bottom + ROW_HEIGHT)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![points],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn cell_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    x: f32,
    top: f32,
    width: f32,
    text: &str,
) {
    let text = fit_text(text, width - 2.0 * CELL_PADDING, BODY_SIZE);
    let baseline = PAGE_HEIGHT - top - ROW_HEIGHT + 2.2;
    layer.use_text(text, BODY_SIZE, Mm(x + CELL_PADDING), Mm(baseline), font);
}

/// Cut `text` so it fits `width` mm at `size` pt, marking the cut with "..."
///
/// Uses an average Helvetica glyph width of half an em.
pub fn fit_text(text: &str, width: f32, size: f32) -> String {
    let glyph_mm = size * 0.3528 * 0.5;
    let max_chars = (width / glyph_mm).floor().max(0.0) as usize;
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

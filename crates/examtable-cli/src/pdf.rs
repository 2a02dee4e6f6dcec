//! printpdf-backed implementation of the core's timetable renderer port.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use examtable_core::export::{ExportError, PrintableTimetable, TimetableRenderer};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocumentReference, PdfDocument,
    PdfLayerReference, Rgb,
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 9.0;
const LAYER_NAME: &str = "timetable";

/// A4 renderer using the builtin Helvetica faces.
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl TimetableRenderer for PdfRenderer {
    fn render(&self, timetable: &PrintableTimetable, out: &Path) -> Result<(), ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            &timetable.title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let regular = builtin(&doc, BuiltinFont::Helvetica)?;
        let bold = builtin(&doc, BuiltinFont::HelveticaBold)?;
        let italic = builtin(&doc, BuiltinFont::HelveticaOblique)?;

        {
            let mut writer = PageWriter {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT_MM - MARGIN_MM,
            };

            writer.line(&timetable.title, TITLE_SIZE, &bold, 0.0);
            writer.line(&timetable.generated_at, SUBTITLE_SIZE, &regular, 0.0);
            writer.gap(4.0);

            if timetable.rows.is_empty() {
                writer.line("(no exams)", BODY_SIZE, &italic, 0.0);
            }
            for row in &timetable.rows {
                writer.line(&row.heading, HEADING_SIZE, &bold, 0.0);
                writer.line(&row.subject, BODY_SIZE, &italic, 2.0);
                if !row.notes.is_empty() {
                    writer.layer.set_fill_color(gray());
                    writer.line(&row.notes, BODY_SIZE, &regular, 2.0);
                    writer.layer.set_fill_color(black());
                }
                writer.gap(2.0);
            }
        }

        let file = File::create(out)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|err| ExportError::Renderer(err.to_string()))
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, indent: f32) {
        // pt -> mm with a 1.4 line-height factor.
        let advance = size * 0.3528 * 1.4;
        self.ensure_room(advance);
        self.layer
            .use_text(text, size, Mm(MARGIN_MM + indent), Mm(self.y), font);
        self.y -= advance;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|err| ExportError::Renderer(err.to_string()))
}

fn gray() -> Color {
    Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

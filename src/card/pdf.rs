use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb};
use super::{CardError, CardLayout, Element, FontWeight, CARD_TITLE};

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn grey() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None))
}

fn pdf_error(e: impl std::fmt::Debug) -> CardError {
    CardError::Pdf(format!("{:?}", e))
}

/// Draw a card layout into a single-page PDF
pub fn render(layout: &CardLayout) -> Result<Vec<u8>, CardError> {
    let (doc, page, layer) = PdfDocument::new(
        CARD_TITLE,
        Mm(layout.width),
        Mm(layout.height),
        "card",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
    let canvas = doc.get_page(page).get_layer(layer);

    canvas.set_outline_thickness(0.5);
    for element in &layout.elements {
        match element {
            Element::Text { x, y, size, weight, content } => {
                let font = match weight {
                    FontWeight::Regular => &regular,
                    FontWeight::Bold => &bold,
                };
                canvas.set_fill_color(black());
                canvas.use_text(content.as_str(), *size, Mm(*x), Mm(*y), font);
            }
            Element::Frame { x, y, width, height, caption } => {
                canvas.set_outline_color(grey());
                canvas.add_rect(
                    Rect::new(Mm(*x), Mm(*y), Mm(x + width), Mm(y + height))
                        .with_mode(PaintMode::Stroke),
                );
                if let Some(caption) = caption {
                    draw_caption(&canvas, caption, *x, *y, *height, &regular);
                }
            }
            Element::Qr { x, y, size, matrix } => {
                let width = matrix.width();
                if width == 0 {
                    continue;
                }
                let module = size / width as f32;
                canvas.set_fill_color(black());
                for (row, col) in matrix.dark_modules() {
                    let left = x + module * col as f32;
                    let top = y + size - module * row as f32;
                    canvas.add_rect(
                        Rect::new(Mm(left), Mm(top - module), Mm(left + module), Mm(top))
                            .with_mode(PaintMode::Fill),
                    );
                }
            }
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_caption(canvas: &PdfLayerReference, caption: &str, x: f32, y: f32, height: f32, font: &IndirectFontRef) {
    canvas.set_fill_color(grey());
    canvas.use_text(caption, 6.0, Mm(x + 1.5), Mm(y + height / 2.0), font);
}

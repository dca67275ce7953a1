//! Participant card
//!
//! The card is built in two steps: [`CardLayout::build`] computes a fixed
//! geometry from the applicant context and the full stage list, then
//! [`pdf::render`] draws it. Only the second step touches the PDF library.

pub mod pdf;
pub mod qr;

use thiserror::Error;
use crate::models::{ApplicantContext, Stage};
use crate::progress::ordered;
use crate::utils::text::truncate;
pub use qr::QrMatrix;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Failed to encode QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Failed to generate PDF: {0}")]
    Pdf(String),
}

/// A6 landscape
pub const PAGE_WIDTH_MM: f32 = 148.0;
pub const PAGE_HEIGHT_MM: f32 = 105.0;

const MARGIN: f32 = 8.0;
const QR_SIZE: f32 = 30.0;
const PHOTO_W: f32 = 24.0;
const PHOTO_H: f32 = 32.0;
const SIGN_W: f32 = 40.0;
const SIGN_H: f32 = 18.0;
const CELL_H: f32 = 10.0;
const CELL_MAX_W: f32 = 14.0;
const LABEL_SIZE: f32 = 7.0;
const GAP: f32 = 3.0;

const PT_TO_MM: f32 = 0.3528;
// Average Helvetica advance, leaning wide for capitals
const GLYPH_EM: f32 = 0.62;

pub const CARD_TITLE: &str = "KARTU PESERTA SELEKSI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Positions are in millimetres from the bottom-left corner of the page
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        content: String,
    },
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        caption: Option<String>,
    },
    Qr {
        x: f32,
        y: f32,
        size: f32,
        matrix: QrMatrix,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
}

fn text(x: f32, y: f32, size: f32, weight: FontWeight, content: impl Into<String>) -> Element {
    Element::Text { x, y, size, weight, content: content.into() }
}

/// Estimated width of `content` set in builtin Helvetica at `size` points
pub fn text_width_mm(content: &str, size: f32) -> f32 {
    content.chars().count() as f32 * size * GLYPH_EM * PT_TO_MM
}

/// Cut `content` so it fits in `max_width` millimetres at `size` points
fn fit(content: &str, size: f32, max_width: f32) -> String {
    let max_chars = (max_width / (size * GLYPH_EM * PT_TO_MM)).floor() as usize;
    truncate(content, max_chars)
}

fn frame(x: f32, y: f32, width: f32, height: f32, caption: Option<&str>) -> Element {
    Element::Frame { x, y, width, height, caption: caption.map(str::to_string) }
}

impl CardLayout {
    pub fn build(context: &ApplicantContext, stages: &[Stage]) -> Result<Self, CardError> {
        let mut elements = Vec::new();
        let top = PAGE_HEIGHT_MM - MARGIN;

        // Header, kept clear of the QR block
        let header_w = PAGE_WIDTH_MM - 2.0 * MARGIN - QR_SIZE - GAP;
        let header = [
            (4.0, 11.0, FontWeight::Bold, CARD_TITLE.to_string()),
            (12.0, 9.0, FontWeight::Bold, context.display_name.clone()),
            (17.0, 8.0, FontWeight::Regular, format!("Posisi: {}", context.position)),
            (22.0, 8.0, FontWeight::Regular, format!("No. Peserta: {}", context.participant_number)),
        ];
        for (offset, size, weight, content) in header {
            elements.push(text(MARGIN, top - offset, size, weight, fit(&content, size, header_w)));
        }

        // QR code, top right
        let matrix = QrMatrix::encode(&context.qr_payload())?;
        elements.push(Element::Qr {
            x: PAGE_WIDTH_MM - MARGIN - QR_SIZE,
            y: top - QR_SIZE,
            size: QR_SIZE,
            matrix,
        });

        // Photo placeholder, left
        let photo_y = top - 26.0 - PHOTO_H;
        elements.push(frame(MARGIN, photo_y, PHOTO_W, PHOTO_H, Some("Foto 3x4")));

        // Signature boxes
        let sign_y = photo_y;
        let sign_x = MARGIN + PHOTO_W + 6.0;
        elements.push(frame(sign_x, sign_y, SIGN_W, SIGN_H, Some("Peserta")));
        elements.push(frame(sign_x + SIGN_W + 4.0, sign_y, SIGN_W, SIGN_H, Some("Panitia")));

        // Stage index cells, every stage in pipeline order
        let ordered = ordered(stages);
        if !ordered.is_empty() {
            let available = PAGE_WIDTH_MM - 2.0 * MARGIN;
            let cell_w = (available / ordered.len() as f32).min(CELL_MAX_W);
            let pad = (cell_w * 0.15).min(1.5);
            for (i, _) in ordered.iter().enumerate() {
                let x = MARGIN + cell_w * i as f32;
                let label = roman(i + 1);
                // Long numerals shrink to stay inside narrow cells
                let size = LABEL_SIZE.min((cell_w - 2.0 * pad) / text_width_mm(&label, 1.0));
                elements.push(frame(x, MARGIN, cell_w, CELL_H, None));
                elements.push(text(x + pad, MARGIN + CELL_H - 3.5, size, FontWeight::Bold, label));
            }
        }

        Ok(CardLayout {
            width: PAGE_WIDTH_MM,
            height: PAGE_HEIGHT_MM,
            elements,
        })
    }

    /// Labels of the stage index cells, left to right
    pub fn stage_cell_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut in_cells = false;
        for element in &self.elements {
            match element {
                Element::Frame { caption: None, .. } => in_cells = true,
                Element::Text { content, .. } if in_cells => {
                    labels.push(content.as_str());
                    in_cells = false;
                }
                _ => {}
            }
        }
        labels
    }
}

/// Roman numeral for a 1-based stage index; 0 renders as an empty string
pub fn roman(mut n: usize) -> String {
    const TABLE: &[(usize, &str)] = &[
        (1000, "M"), (900, "CM"), (500, "D"), (400, "CD"),
        (100, "C"), (90, "XC"), (50, "L"), (40, "XL"),
        (10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I"),
    ];
    let mut out = String::new();
    for &(value, numeral) in TABLE {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// Build and draw the participant card, returning PDF bytes
pub fn render_card(context: &ApplicantContext, stages: &[Stage]) -> Result<Vec<u8>, CardError> {
    let layout = CardLayout::build(context, stages)?;
    pdf::render(&layout)
}

use qrcode::{Color, QrCode};
use qrcode::types::QrError;

/// Square module matrix of an encoded QR code, row-major, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(payload: &str) -> Result<Self, QrError> {
        let code = QrCode::new(payload.as_bytes())?;
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(QrMatrix { width, modules })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Dark modules as (row, col), row 0 at the top
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i / self.width, i % self.width))
    }
}

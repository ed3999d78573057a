//! QR rendering of sealed envelopes
//!
//! The QR code carries the lowercase hex of the envelope bytes, matching what
//! Catalyst Voting scans.

use anyhow::{Context, Result};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use std::path::Path;

/// Renders arbitrary bytes as a QR code of their hex encoding
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    ec_level: EcLevel,
}

impl QrRenderer {
    pub fn new(ec_level: EcLevel) -> Self {
        Self { ec_level }
    }

    fn code(&self, payload: &[u8]) -> Result<QrCode> {
        QrCode::with_error_correction_level(hex::encode(payload), self.ec_level)
            .context("Failed to build QR code")
    }

    /// Compact terminal rendering, two modules per character
    pub fn render_text(&self, payload: &[u8]) -> Result<String> {
        Ok(self
            .code(payload)?
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }

    pub fn render_svg(&self, payload: &[u8]) -> Result<String> {
        Ok(self
            .code(payload)?
            .render::<svg::Color>()
            .min_dimensions(256, 256)
            .build())
    }

    /// Write to `path`: SVG for a `.svg` extension, terminal text otherwise
    pub fn write_file(&self, payload: &[u8], path: &Path) -> Result<()> {
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let rendered = if is_svg {
            self.render_svg(payload)?
        } else {
            self.render_text(payload)?
        };
        std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write QR code to {}", path.display()))
    }
}

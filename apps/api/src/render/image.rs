//! Fits the applicant photo into the photo slot without distortion.

use std::io::Cursor;

use image::{GenericImageView, ImageFormat};
use thiserror::Error;

use crate::layout::spec::{Envelope, PhotoSlot};

#[derive(Debug, Error)]
pub enum AssetDecodeError {
    #[error("photo could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("photo has zero width or height")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSize {
    pub width: f64,
    pub height: f64,
}

/// Largest size with the source's aspect ratio that fits inside `envelope`.
pub fn fit_within(src_width: u32, src_height: u32, envelope: Envelope) -> ScaledSize {
    if src_width == 0 || src_height == 0 {
        return ScaledSize {
            width: 0.0,
            height: 0.0,
        };
    }
    let (w, h) = (f64::from(src_width), f64::from(src_height));
    let scale = (envelope.width / w).min(envelope.height / h);
    ScaledSize {
        width: w * scale,
        height: h * scale,
    }
}

/// A PNG ready for the sheet, its scale factors, and the row/column sizes that make the
/// photo slot exactly as large as the scaled image.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub png: Vec<u8>,
    pub width_px: u16,
    pub height_px: u16,
    pub scale_x: f64,
    pub scale_y: f64,
    /// (row, pixels)
    pub row_heights: Vec<(u32, u16)>,
    /// (column, pixels)
    pub column_widths: Vec<(u16, u16)>,
}

/// Splits `total` pixels over `parts` tracks; the first `total % parts` get one extra.
fn split_px(total: u16, parts: u16) -> impl Iterator<Item = u16> {
    let (base, extra) = (total / parts, total % parts);
    (0..parts).map(move |i| base + u16::from(i < extra))
}

pub fn embed(bytes: &[u8], slot: &PhotoSlot) -> Result<EmbeddedImage, AssetDecodeError> {
    let decoded = image::load_from_memory(bytes)?;
    let (src_width, src_height) = decoded.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(AssetDecodeError::Empty);
    }

    // Everything is re-encoded as PNG so the workbook only ever carries one image type.
    let mut png = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    // Whole pixels, so the slot tracks can add up to the image exactly.
    let size = fit_within(src_width, src_height, slot.envelope);
    let width_px = size.width.round().clamp(1.0, f64::from(u16::MAX)) as u16;
    let height_px = size.height.round().clamp(1.0, f64::from(u16::MAX)) as u16;

    let row_heights = (slot.range.first.row..=slot.range.last.row)
        .zip(split_px(height_px, slot.range.rows() as u16))
        .collect();
    let column_widths = (slot.range.first.col..=slot.range.last.col)
        .zip(split_px(width_px, slot.range.cols()))
        .collect();

    Ok(EmbeddedImage {
        png,
        width_px,
        height_px,
        scale_x: f64::from(width_px) / f64::from(src_width),
        scale_y: f64::from(height_px) / f64::from(src_height),
        row_heights,
        column_widths,
    })
}

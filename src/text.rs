//! Text watermark rendering.
//!
//! Glyphs are rasterized with `ab_glyph` from an embedded DejaVu Sans face
//! and blended straight onto the target image, so there is no intermediate
//! canvas and no background box.

use ab_glyph::{point, Font, FontRef, GlyphId, PxScale, PxScaleFont, ScaleFont};
use image::{Rgba, RgbaImage};

use crate::blending::{blend_pixel, centered_offset};
use crate::error::{Error, Result};

/// Embedded font data (DejaVu Sans, Bitstream Vera license).
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Font size used for text watermarks, in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 32.0;

/// Styling for a text watermark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Text colour; the alpha channel is multiplied into glyph coverage.
    pub color: Rgba<u8>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: Rgba([0, 0, 0, 255]),
        }
    }
}

fn embedded_font() -> Result<FontRef<'static>> {
    FontRef::try_from_slice(EMBEDDED_FONT_DATA).map_err(|e| Error::Font(e.to_string()))
}

/// Horizontal advance of `text` including kerning, in pixels.
fn text_width(scaled: &PxScaleFont<&FontRef<'_>>, text: &str) -> f32 {
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    width
}

/// Single-line bounding box of `text` as `(width, height)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn block_size(scaled: &PxScaleFont<&FontRef<'_>>, text: &str) -> (u32, u32) {
    (
        text_width(scaled, text).ceil() as u32,
        scaled.height().ceil() as u32,
    )
}

/// Measure the single-line bounding box of `text` as `(width, height)`.
///
/// # Errors
///
/// Returns [`Error::Font`] if the embedded font cannot be parsed.
pub fn measure_text(text: &str, style: &TextStyle) -> Result<(u32, u32)> {
    let font = embedded_font()?;
    let scaled = font.as_scaled(PxScale::from(style.font_size));
    Ok(block_size(&scaled, text))
}

/// Draw `text` centred horizontally and vertically over the whole image.
///
/// The text is a single line. Anything that falls outside the image is
/// clipped; empty text draws nothing.
///
/// # Errors
///
/// Returns [`Error::Font`] if the embedded font cannot be parsed.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn draw_text_centered(image: &mut RgbaImage, text: &str, style: &TextStyle) -> Result<()> {
    if text.is_empty() {
        log::debug!("Empty watermark text, nothing to draw");
        return Ok(());
    }

    let font = embedded_font()?;
    let scale = PxScale::from(style.font_size);
    let scaled = font.as_scaled(scale);

    let (text_w, text_h) = block_size(&scaled, text);
    let left = centered_offset(image.width(), text_w);
    let top = centered_offset(image.height(), text_h);
    log::debug!("Text block {text_w}x{text_h} at ({left}, {top})");

    let baseline = top as f32 + scaled.ascent();
    let mut cursor_x = left as f32;
    let mut prev: Option<GlyphId> = None;

    let (img_w, img_h) = (i64::from(image.width()), i64::from(image.height()));

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(cursor_x, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (min_x, min_y) = (bounds.min.x as i64, bounds.min.y as i64);

            outlined.draw(|gx, gy, coverage| {
                let x = min_x + i64::from(gx);
                let y = min_y + i64::from(gy);
                if x < 0 || y < 0 || x >= img_w || y >= img_h {
                    return;
                }

                let dst = image.get_pixel_mut(x as u32, y as u32);
                *dst = blend_pixel(*dst, style.color, coverage);
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }

    Ok(())
}

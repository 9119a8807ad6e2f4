//! The two kinds of watermark and how each is burned into an image.

use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

use crate::blending::{centered_offset, composite_over};
use crate::engine::open_image;
use crate::error::Result;
use crate::text::{draw_text_centered, TextStyle};

/// Source opacity used when compositing an image watermark.
pub const IMAGE_WATERMARK_OPACITY: f32 = 0.5;

/// Which kind of watermark the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkKind {
    /// Render a string.
    Text,
    /// Composite a second image.
    Image,
}

impl WatermarkKind {
    /// All kinds, in menu order.
    pub const ALL: [WatermarkKind; 2] = [WatermarkKind::Text, WatermarkKind::Image];

    /// Menu label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WatermarkKind::Text => "Text watermark",
            WatermarkKind::Image => "Image watermark",
        }
    }
}

impl fmt::Display for WatermarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully specified watermark, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Watermark {
    /// Text drawn centred over the image.
    Text {
        /// The string to render. May be empty.
        text: String,
        /// Font size and colour.
        style: TextStyle,
    },
    /// An image file composited centred at half opacity.
    Image {
        /// Path to the watermark asset.
        path: PathBuf,
    },
}

impl Watermark {
    /// Text watermark with the default style.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Watermark::Text {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Image watermark read from `path`.
    #[must_use]
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Watermark::Image { path: path.into() }
    }

    /// The menu entry this watermark corresponds to.
    #[must_use]
    pub fn kind(&self) -> WatermarkKind {
        match self {
            Watermark::Text { .. } => WatermarkKind::Text,
            Watermark::Image { .. } => WatermarkKind::Image,
        }
    }

    /// Burn the watermark into `target`.
    ///
    /// Only the image variant touches the filesystem, to read its asset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Open`] if the watermark asset cannot be read,
    /// or [`crate::Error::Font`] if the text font fails to load.
    pub fn apply(&self, target: &mut RgbaImage) -> Result<()> {
        match self {
            Watermark::Text { text, style } => {
                log::info!("Applying text watermark {text:?}");
                draw_text_centered(target, text, style)
            }
            Watermark::Image { path } => {
                let overlay = open_image(path)?;
                apply_image_watermark(target, &overlay);
                Ok(())
            }
        }
    }
}

/// Composite `overlay` centred on `target` at [`IMAGE_WATERMARK_OPACITY`].
///
/// An overlay larger than the target is clipped to the target's bounds.
pub fn apply_image_watermark(target: &mut RgbaImage, overlay: &RgbaImage) {
    let x = centered_offset(target.width(), overlay.width());
    let y = centered_offset(target.height(), overlay.height());
    log::info!(
        "Applying {}x{} image watermark at ({x}, {y})",
        overlay.width(),
        overlay.height()
    );
    composite_over(target, overlay, x, y, IMAGE_WATERMARK_OPACITY);
}

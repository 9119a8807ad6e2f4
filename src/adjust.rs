//! Global colour adjustments offered before watermarking.
//!
//! Each adjustment is a per-pixel map over the colour channels; alpha is
//! left untouched. Brightness and contrast take a relative amount in
//! `[-1, 1]`, where `0` is a no-op.

use std::fmt;

use image::RgbaImage;

/// Relative amount used for the menu's brighten and contrast entries.
pub const ADJUSTMENT_AMOUNT: f32 = 0.3;

/// Rec.709 luma weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// One of the adjustments offered in the edit menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Raise brightness by [`ADJUSTMENT_AMOUNT`].
    Brighten,
    /// Raise contrast by [`ADJUSTMENT_AMOUNT`].
    IncreaseContrast,
    /// Desaturate to luma.
    Greyscale,
    /// Replace every colour channel with its complement.
    Invert,
}

impl Adjustment {
    /// All adjustments, in menu order.
    pub const ALL: [Adjustment; 4] = [
        Adjustment::Brighten,
        Adjustment::IncreaseContrast,
        Adjustment::Greyscale,
        Adjustment::Invert,
    ];

    /// Menu label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Adjustment::Brighten => "Make image brighter",
            Adjustment::IncreaseContrast => "Increase contrast",
            Adjustment::Greyscale => "Make image black and white",
            Adjustment::Invert => "Invert image",
        }
    }

    /// Apply this adjustment to `image` in place.
    pub fn apply(self, image: &mut RgbaImage) {
        match self {
            Adjustment::Brighten => brightness(image, ADJUSTMENT_AMOUNT),
            Adjustment::IncreaseContrast => contrast(image, ADJUSTMENT_AMOUNT),
            Adjustment::Greyscale => greyscale(image),
            Adjustment::Invert => invert(image),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Apply `adjustment` if one was chosen; `None` leaves the image as decoded.
pub fn apply_adjustment(image: &mut RgbaImage, adjustment: Option<Adjustment>) {
    if let Some(adjustment) = adjustment {
        log::info!("Applying adjustment: {adjustment}");
        adjustment.apply(image);
    }
}

/// Shift brightness by `amount` in `[-1, 1]`.
///
/// Positive amounts move each channel toward white by that fraction of the
/// remaining headroom; negative amounts scale toward black.
pub fn brightness(image: &mut RgbaImage, amount: f32) {
    let amount = amount.clamp(-1.0, 1.0);
    map_channels(image, |c| {
        let c = f32::from(c);
        if amount < 0.0 {
            c * (1.0 + amount)
        } else {
            c + (255.0 - c) * amount
        }
    });
}

/// Change contrast by `amount` in `[-1, 1]` around the mid-grey point.
pub fn contrast(image: &mut RgbaImage, amount: f32) {
    // Keep the factor finite at the +1 end.
    let amount = amount.clamp(-1.0, 0.999);
    let factor = (amount + 1.0) / (1.0 - amount);
    map_channels(image, |c| (factor * (f32::from(c) - 127.0) + 127.0).floor());
}

/// Replace the colour channels of every pixel with its luma.
pub fn greyscale(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        let luma =
            LUMA_R * f32::from(px[0]) + LUMA_G * f32::from(px[1]) + LUMA_B * f32::from(px[2]);
        let grey = to_channel(luma);
        px[0] = grey;
        px[1] = grey;
        px[2] = grey;
    }
}

/// Replace every colour channel `c` with `255 - c`.
pub fn invert(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        for ch in 0..3 {
            px[ch] = 255 - px[ch];
        }
    }
}

fn map_channels(image: &mut RgbaImage, f: impl Fn(u8) -> f32) {
    for px in image.pixels_mut() {
        for ch in 0..3 {
            px[ch] = to_channel(f(px[ch]));
        }
    }
}

/// Clamp to the channel range and truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

//! Alpha blending math for stamping watermarks.
//!
//! Watermarks are applied with the Porter-Duff "source over" operator:
//! `out = src * src_alpha + dst * dst_alpha * (1 - src_alpha)`
//!
//! The source alpha is additionally scaled by an opacity factor, so a fully
//! opaque logo composited at 0.5 lets half of the base image show through.

use image::{Rgba, RgbaImage};

/// Output alpha below this is treated as fully transparent.
const MIN_OUT_ALPHA: f32 = 0.001;

/// Blend `src` over `dst`, scaling the source alpha by `opacity`.
///
/// `opacity` is clamped to `[0, 1]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let src_alpha = f32::from(src[3]) / 255.0 * opacity.clamp(0.0, 1.0);
    let dst_alpha = f32::from(dst[3]) / 255.0;

    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha < MIN_OUT_ALPHA {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let s = f32::from(s);
        let d = f32::from(d);
        let value = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };

    let alpha = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        alpha,
    ])
}

/// Composite `overlay` onto `target` with its top-left corner at `(x, y)`.
///
/// Offsets may be negative. Overlay pixels that fall outside the target are
/// clipped; the target is never resized.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn composite_over(target: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let target_w = i64::from(target.width());
    let target_h = i64::from(target.height());

    // Clip to image bounds
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + i64::from(overlay.width())).min(target_w);
    let y_end = (y + i64::from(overlay.height())).min(target_h);

    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let src = *overlay.get_pixel((tx - x) as u32, (ty - y) as u32);
            let dst = target.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_pixel(*dst, src, opacity);
        }
    }
}

/// Offset that centres a span of `inner` pixels within `outer` pixels.
///
/// Negative when `inner` is larger; truncates toward zero for odd differences.
#[must_use]
pub fn centered_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)) / 2
}

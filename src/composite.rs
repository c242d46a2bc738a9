//! Flattens an image onto an opaque canvas, using the alpha channel as a
//! per-pixel blend mask.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

use crate::color::Background;

/// Whether the decoded image carries any alpha channel (LA or RGBA, any depth).
pub fn has_alpha(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// Allocates an opaque canvas of the given size filled with `background`.
pub fn canvas(width: u32, height: u32, background: Background) -> RgbImage {
    RgbImage::from_pixel(width, height, background.0)
}

/// Linear blend of `src` over `bg` weighted by `alpha / 255`, rounded to nearest.
pub fn blend(src: Rgb<u8>, alpha: u8, bg: Rgb<u8>) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |s: u8, b: u8| ((s as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([
        mix(src[0], bg[0]),
        mix(src[1], bg[1]),
        mix(src[2], bg[2]),
    ])
}

/// Produces an opaque RGB image of the same size as `img`.
///
/// Images without alpha are copied as-is (converted to 8-bit RGB); images with
/// alpha are composited pixel by pixel over a canvas of `background`.
pub fn flatten(img: &DynamicImage, background: Background) -> RgbImage {
    if !has_alpha(img) {
        return img.to_rgb8();
    }

    let (w, h) = img.dimensions();
    let rgba = img.to_rgba8();
    let mut out = canvas(w, h, background);

    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = blend(Rgb([r, g, b]), a, *dst);
    }

    out
}

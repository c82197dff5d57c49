//! Image loading and the raster primitives the card template is built from.
//!
//! Decoding goes through the [`image`] crate with path-carrying errors. The
//! drawing helpers work on an RGB canvas and clip everything at its edges.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use log::debug;

use crate::config::Rect;
use crate::error::BadgeError;

/// Resampling filter used for logos and photos.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Opens and decodes the image at `path`.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage, BadgeError> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path).map_err(|err| BadgeError::io(path, err))?;
    reader
        .with_guessed_format()
        .map_err(|err| BadgeError::io(path, err))?
        .decode()
        .map_err(|source| BadgeError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Decodes the image at `path` if it is a regular file.
///
/// A missing file is the normal "asset absent" case and yields `Ok(None)`.
pub fn load_optional_image(path: impl AsRef<Path>) -> Result<Option<DynamicImage>, BadgeError> {
    let path = path.as_ref();
    if !path.is_file() {
        debug!("Optional image {} not present", path.display());
        return Ok(None);
    }
    decode_image_from_path(path).map(Some)
}

/// Fills the inclusive rectangle `(x0, y0)..=(x1, y1)`.
pub fn fill_rect_inclusive(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let x1 = x1.min(canvas.width() - 1);
    let y1 = y1.min(canvas.height() - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }
    for y in y0..=y1 {
        for x in x0..=x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Fills `rect` including its right and bottom edge lines.
pub fn fill_frame(canvas: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    fill_rect_inclusive(canvas, rect.x, rect.y, rect.right(), rect.bottom(), color);
}

/// Scales `image` to exactly fill `area`, ignoring its aspect ratio, and pastes it opaquely.
pub fn paste_scaled(canvas: &mut RgbImage, image: &DynamicImage, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let scaled = image.resize_exact(area.width, area.height, RESIZE_FILTER).to_rgb8();
    imageops::replace(canvas, &scaled, area.x, area.y);
}

/// Scales `image` to exactly fill `area` and composites it using its alpha channel.
pub fn overlay_scaled(canvas: &mut RgbImage, image: &DynamicImage, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let scaled = imageops::resize(&image.to_rgba8(), area.width, area.height, RESIZE_FILTER);
    overlay_alpha(canvas, &scaled, area.x, area.y);
}

/// Alpha-composites `top` over `canvas` with its top-left corner at `(x, y)`.
pub fn overlay_alpha(canvas: &mut RgbImage, top: &RgbaImage, x: u32, y: u32) {
    for (tx, ty, pixel) in top.enumerate_pixels() {
        let (cx, cy) = (x + tx, y + ty);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            continue;
        }
        let target = canvas.get_pixel_mut(cx, cy);
        for channel in 0..3 {
            let fg = pixel[channel] as u32;
            let bg = target[channel] as u32;
            target[channel] = ((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn near(pixel: &Rgb<u8>, expected: [u8; 3]) -> bool {
        pixel
            .0
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (*a as i16 - *b as i16).abs() <= 1)
    }

    #[test]
    fn inclusive_fill_covers_both_edges_and_clips() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        fill_rect_inclusive(&mut canvas, 2, 3, 20, 5, Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(2, 3), &Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(9, 5), &Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(1, 3), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(2, 6), &Rgb([0, 0, 0]));
    }

    #[test]
    fn transparent_pixels_leave_canvas_untouched() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let mut top = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        top.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
        overlay_alpha(&mut canvas, &top, 3, 3);
        assert_eq!(canvas.get_pixel(3, 3), &Rgb([10, 20, 30]));

        overlay_alpha(&mut canvas, &top, 0, 0);
        assert_eq!(canvas.get_pixel(1, 1), &Rgb([200, 100, 50]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn paste_scaled_fills_the_whole_area() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]));
        let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 7, Rgb([40, 80, 120])));
        paste_scaled(&mut canvas, &photo, Rect::new(5, 5, 10, 4));
        assert!(near(canvas.get_pixel(5, 5), [40, 80, 120]));
        assert!(near(canvas.get_pixel(14, 8), [40, 80, 120]));
        assert_eq!(canvas.get_pixel(15, 8), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(14, 9), &Rgb([0, 0, 0]));
    }

    #[test]
    fn corrupt_image_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").expect("write");
        let err = load_optional_image(&path).expect_err("corrupt file must fail");
        assert!(err.to_string().contains("broken.png"), "got: {err}");
    }
}

//! Text measurement and rasterization onto a card canvas.
//!
//! Coordinates passed to [`draw_text`] name the top-left corner of the text
//! line: the baseline sits one ascent below `y`.

use image::{Rgb, RgbImage};
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::fonts::{BuiltinFace, FontFace, LoadedFont};

fn layout_glyphs(font: &Font<'static>, size: f32, text: &str) -> Vec<PositionedGlyph<'static>> {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent)).collect()
}

/// Width of the inked bounding box of `text` when rendered with `font`.
pub fn text_width(font: &LoadedFont, text: &str) -> i32 {
    match font.face() {
        FontFace::TrueType(face) => {
            let mut bounds: Option<(i32, i32)> = None;
            for glyph in layout_glyphs(face, font.size(), text) {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    bounds = Some(match bounds {
                        Some((min, max)) => (min.min(bb.min.x), max.max(bb.max.x)),
                        None => (bb.min.x, bb.max.x),
                    });
                }
            }
            bounds.map(|(min, max)| max - min).unwrap_or(0)
        }
        FontFace::Builtin(face) => face.text_width(text) as i32,
    }
}

/// Left edge that centers a run of `text_width` pixels inside a container.
///
/// Uses floor division so odd remainders and over-long text resolve the same
/// way on both sides of zero.
pub fn centered_x(container_x: i32, container_width: i32, text_width: i32) -> i32 {
    container_x + (container_width - text_width).div_euclid(2)
}

fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x, y);
    for channel in 0..3 {
        let fg = color[channel] as f32;
        let bg = pixel[channel] as f32;
        pixel[channel] = (fg * coverage + bg * (1.0 - coverage)).round() as u8;
    }
}

fn draw_builtin(canvas: &mut RgbImage, face: &BuiltinFace, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    face.rasterize(text, |dx, dy| blend_pixel(canvas, x + dx, y + dy, color, 1.0));
}

/// Draws `text` with its line box anchored at `(x, y)`, clipping at the canvas edges.
pub fn draw_text(canvas: &mut RgbImage, font: &LoadedFont, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    match font.face() {
        FontFace::TrueType(face) => {
            for glyph in layout_glyphs(face, font.size(), text) {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, coverage| {
                        blend_pixel(
                            canvas,
                            x + bb.min.x + gx as i32,
                            y + bb.min.y + gy as i32,
                            color,
                            coverage,
                        );
                    });
                }
            }
        }
        FontFace::Builtin(face) => draw_builtin(canvas, face, x, y, text, color),
    }
}

/// Draws `text` horizontally centered inside `[container_x, container_x + container_width)`
/// and returns the left edge it was drawn at.
pub fn draw_text_centered(
    canvas: &mut RgbImage,
    font: &LoadedFont,
    container_x: i32,
    container_width: i32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) -> i32 {
    let x = centered_x(container_x, container_width, text_width(font, text));
    draw_text(canvas, font, x, y, text, color);
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_floors_odd_remainders() {
        assert_eq!(centered_x(0, 800, 101), 349);
        assert_eq!(centered_x(540, 200, 100), 590);
    }

    #[test]
    fn centering_overlong_text_floors_towards_negative() {
        assert_eq!(centered_x(0, 10, 15), -3);
    }

    #[test]
    fn builtin_text_is_drawn_and_clipped() {
        let font = LoadedFont::builtin(8.0);
        let mut canvas = RgbImage::from_pixel(20, 8, Rgb([0, 0, 0]));
        draw_text(&mut canvas, &font, -4, 0, "HI", Rgb([255, 255, 255]));
        let lit = canvas.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(lit > 0);
    }

    #[test]
    fn builtin_width_is_the_advance() {
        let font = LoadedFont::builtin(16.0);
        assert_eq!(text_width(&font, "Jane"), 64);
    }

    #[test]
    fn centered_builtin_text_is_symmetric() {
        let font = LoadedFont::builtin(8.0);
        let mut canvas = RgbImage::from_pixel(40, 8, Rgb([0, 0, 0]));
        let x = draw_text_centered(&mut canvas, &font, 0, 40, 0, "ab", Rgb([9, 9, 9]));
        assert_eq!(x, 12);
    }
}

//! Built-in 8x8 bitmap face used when no font file can be loaded.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

const CELL: u32 = 8;

/// The `font8x8` glyph set magnified by an integer factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinFace {
    magnification: u32,
}

impl BuiltinFace {
    /// Picks the magnification whose cell height is closest to `size` pixels.
    pub fn for_size(size: f32) -> Self {
        let magnification = (size / CELL as f32).round().max(1.0) as u32;
        Self { magnification }
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    /// Height of one text line in pixels.
    pub fn line_height(&self) -> u32 {
        CELL * self.magnification
    }

    /// Horizontal advance of `text`; every glyph occupies a full cell.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * CELL * self.magnification
    }

    fn glyph(c: char) -> [u8; 8] {
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }

    /// Calls `plot` with the offset of every inked pixel, relative to the
    /// top-left corner of the text line.
    pub fn rasterize(&self, text: &str, mut plot: impl FnMut(i32, i32)) {
        let scale = self.magnification as i32;
        let cell = CELL as i32 * scale;

        for (index, c) in text.chars().enumerate() {
            let origin_x = index as i32 * cell;
            for (row, bits) in Self::glyph(c).iter().enumerate() {
                for col in 0..CELL as i32 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x0 = origin_x + col * scale;
                    let y0 = row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            plot(x0 + dx, y0 + dy);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnification_tracks_requested_size() {
        assert_eq!(BuiltinFace::for_size(2.0).magnification(), 1);
        assert_eq!(BuiltinFace::for_size(22.0).magnification(), 3);
        assert_eq!(BuiltinFace::for_size(36.0).magnification(), 5);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let face = BuiltinFace::for_size(8.0);
        assert_eq!(face.text_width("Zoë"), 24);
        assert_eq!(face.text_width(""), 0);
    }

    #[test]
    fn rasterized_pixels_stay_inside_the_line() {
        let face = BuiltinFace::for_size(16.0);
        let width = face.text_width("Ab") as i32;
        let height = face.line_height() as i32;
        let mut inked = 0;
        face.rasterize("Ab", |x, y| {
            assert!((0..width).contains(&x) && (0..height).contains(&y));
            inked += 1;
        });
        assert!(inked > 0);
    }
}

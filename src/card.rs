//! Compositing of a single badge card.

use image::RgbImage;

use crate::config::LayoutConfig;
use crate::elements::{fill_frame, fill_rect_inclusive, overlay_scaled, paste_scaled};
use crate::fonts::FontSet;
use crate::model::{CardAssets, EmployeeRecord};
use crate::text::{draw_text, draw_text_centered};

/// A rendered badge: an RGB raster of the layout's fixed size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    name: String,
    image: RgbImage,
}

impl Card {
    /// Employee name printed on the card.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Draws cards for a fixed layout and font set.
///
/// The renderer holds no per-card state: every call to [`CardRenderer::render`]
/// starts from a freshly allocated canvas.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    layout: LayoutConfig,
    fonts: FontSet,
}

impl CardRenderer {
    pub fn new(layout: LayoutConfig, fonts: FontSet) -> Self {
        Self { layout, fonts }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Renders `record` onto the template.
    pub fn render(&self, record: &EmployeeRecord, assets: &CardAssets) -> Card {
        let layout = &self.layout;
        let mut canvas = RgbImage::from_pixel(layout.width, layout.height, layout.background);

        if let Some(logo) = &assets.logo {
            overlay_scaled(&mut canvas, logo, layout.logo_box);
        }

        draw_text(
            &mut canvas,
            &self.fonts.company_name,
            layout.company_x,
            layout.company_name_y,
            &layout.company_name,
            layout.foreground,
        );
        draw_text(
            &mut canvas,
            &self.fonts.company_sub,
            layout.company_x,
            layout.company_sub_y,
            &layout.company_subtitle,
            layout.foreground,
        );

        fill_frame(&mut canvas, layout.photo_box, layout.foreground);
        if let Some(photo) = &assets.photo {
            paste_scaled(&mut canvas, photo, layout.photo_area());
        }

        draw_text_centered(
            &mut canvas,
            &self.fonts.title,
            layout.photo_box.x as i32,
            layout.photo_box.width as i32,
            layout.title_y,
            record.title(),
            layout.foreground,
        );

        fill_rect_inclusive(
            &mut canvas,
            0,
            layout.stripe_y,
            layout.width,
            layout.height,
            layout.foreground,
        );
        draw_text_centered(
            &mut canvas,
            &self.fonts.name,
            0,
            layout.width as i32,
            layout.name_y,
            record.name(),
            layout.background,
        );

        Card {
            name: record.name().to_owned(),
            image: canvas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRAND_ORANGE, WHITE};
    use image::{DynamicImage, Rgb, Rgba, RgbaImage};

    fn renderer() -> CardRenderer {
        let layout = LayoutConfig::default();
        let fonts = FontSet::builtin(&layout);
        CardRenderer::new(layout, fonts)
    }

    #[test]
    fn card_has_layout_dimensions() {
        let card = renderer().render(&EmployeeRecord::new("Ann", "CTO", ""), &CardAssets::none());
        assert_eq!(card.dimensions(), (800, 400));
        assert_eq!(card.name(), "Ann");
    }

    #[test]
    fn blank_photo_frame_without_photo() {
        let card = renderer().render(
            &EmployeeRecord::new("Ann", "CTO", "missing.png"),
            &CardAssets::none(),
        );
        let image = card.image();
        assert_eq!(image.get_pixel(600, 120), &WHITE);
        assert_eq!(image.get_pixel(740, 290), &WHITE);
        assert_eq!(image.get_pixel(5, 5), &BRAND_ORANGE);
        assert_eq!(image.get_pixel(5, 395), &WHITE);
    }

    #[test]
    fn photo_is_scaled_inside_the_margin() {
        let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([0, 0, 255])));
        let card = renderer().render(
            &EmployeeRecord::new("Ann", "CTO", "ann.png"),
            &CardAssets::none().with_photo(photo),
        );
        let image = card.image();
        assert_eq!(image.get_pixel(544, 54), &WHITE);
        let inside = image.get_pixel(600, 150);
        assert!(inside[2] >= 250 && inside[0] <= 5, "got {inside:?}");
    }

    #[test]
    fn transparent_logo_keeps_background() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0])));
        let card = renderer().render(
            &EmployeeRecord::new("Ann", "CTO", ""),
            &CardAssets::none().with_logo(logo),
        );
        assert_eq!(card.image().get_pixel(100, 100), &BRAND_ORANGE);
    }

    #[test]
    fn name_is_drawn_in_brand_color_inside_the_stripe() {
        let card = renderer().render(&EmployeeRecord::new("Jane Doe", "Engineer", ""), &CardAssets::none());
        let stripe_has_name = card
            .image()
            .enumerate_pixels()
            .any(|(_, y, pixel)| y >= 340 && *pixel == BRAND_ORANGE);
        assert!(stripe_has_name);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = renderer();
        let record = EmployeeRecord::new("Jane Doe", "Engineer", "");
        let a = renderer.render(&record, &CardAssets::none());
        let b = renderer.render(&record, &CardAssets::none());
        assert_eq!(a, b);
    }
}

//! Static configuration for a badge run.
//!
//! [`LayoutConfig`] carries every geometric and stylistic constant of the card
//! template, [`BadgePaths`] names the files a run touches, and [`BadgeConfig`]
//! bundles both together with the font search directories and output
//! resolution. The values are immutable once built and handed to the renderer
//! explicitly, so tests can swap in alternate layouts.

use std::env;
use std::path::{Path, PathBuf};

use image::Rgb;

use crate::fonts;

/// Brand orange used for the card background and the employee name.
pub const BRAND_ORANGE: Rgb<u8> = Rgb([255, 102, 0]);

/// Foreground white used for the branding text, photo frame and name stripe.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Resolution at which cards are placed onto PDF pages.
pub const DEFAULT_DPI: f64 = 100.0;

/// Environment variable naming the directory that holds the input table and assets.
pub const BASE_DIR_ENV: &str = "ID_BADGES_DIR";

/// Axis-aligned box in card pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a box from its top-left corner and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate one past the bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Shrinks the box by `margin` on every side, saturating at zero size.
    pub fn inset(&self, margin: u32) -> Self {
        let double = margin.saturating_mul(2);
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(double),
            height: self.height.saturating_sub(double),
        }
    }
}

/// A font selection: a file name (or path) and a pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub file: PathBuf,
    pub size: f32,
}

impl FontSpec {
    pub fn new(file: impl Into<PathBuf>, size: f32) -> Self {
        Self {
            file: file.into(),
            size,
        }
    }
}

/// Geometry, palette, branding text and fonts of the card template.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub logo_box: Rect,
    pub photo_box: Rect,
    pub photo_margin: u32,
    pub stripe_y: u32,
    pub company_x: i32,
    pub company_name_y: i32,
    pub company_sub_y: i32,
    pub title_y: i32,
    pub name_y: i32,
    pub company_name: String,
    pub company_subtitle: String,
    pub company_name_font: FontSpec,
    pub company_sub_font: FontSpec,
    pub title_font: FontSpec,
    pub name_font: FontSpec,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let width = 800;
        let height = 400;
        let logo_box = Rect::new(40, 40, 160, 160);
        let photo_box = Rect::new(width - 260, 50, 200, 240);
        let stripe_y = height - 80;
        let company_name_y = 70;

        Self {
            width,
            height,
            background: BRAND_ORANGE,
            foreground: WHITE,
            logo_box,
            photo_box,
            photo_margin: 8,
            stripe_y,
            company_x: (logo_box.right() + 20) as i32,
            company_name_y,
            company_sub_y: company_name_y + 50,
            title_y: (photo_box.bottom() + 10) as i32,
            name_y: (stripe_y + 20) as i32,
            company_name: "Unsolvability".to_owned(),
            company_subtitle: "Tie Enterprises".to_owned(),
            company_name_font: FontSpec::new("arialbd.ttf", 36.0),
            company_sub_font: FontSpec::new("arial.ttf", 24.0),
            title_font: FontSpec::new("arial.ttf", 22.0),
            name_font: FontSpec::new("arialbd.ttf", 28.0),
        }
    }
}

impl LayoutConfig {
    /// Sets the canvas size and returns the updated layout.
    ///
    /// Only the canvas changes; boxes and text anchors keep their coordinates.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the background and foreground colors and returns the updated layout.
    pub fn with_palette(mut self, background: Rgb<u8>, foreground: Rgb<u8>) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    /// Sets both lines of company branding and returns the updated layout.
    pub fn with_branding(mut self, name: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.company_name = name.into();
        self.company_subtitle = subtitle.into();
        self
    }

    /// Sets the photo frame and returns the updated layout.
    pub fn with_photo_box(mut self, photo_box: Rect) -> Self {
        self.photo_box = photo_box;
        self
    }

    /// Region the photo is scaled into: the frame minus its margin.
    pub fn photo_area(&self) -> Rect {
        self.photo_box.inset(self.photo_margin)
    }
}

/// Files read and written by a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgePaths {
    pub input_csv: PathBuf,
    pub photo_dir: PathBuf,
    pub logo: PathBuf,
    pub output_pdf: PathBuf,
}

impl BadgePaths {
    /// Standard file names below a single base directory.
    pub fn from_base_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            input_csv: dir.join("employee.csv"),
            photo_dir: dir.join("photos"),
            logo: dir.join("logo.png"),
            output_pdf: dir.join("employee_ids.pdf"),
        }
    }

    /// Location of a record's photo, or `None` for an empty file name.
    pub fn photo_path(&self, photo_filename: &str) -> Option<PathBuf> {
        if photo_filename.is_empty() {
            None
        } else {
            Some(self.photo_dir.join(photo_filename))
        }
    }
}

/// Everything a batch run needs.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeConfig {
    pub paths: BadgePaths,
    pub layout: LayoutConfig,
    pub font_dirs: Vec<PathBuf>,
    pub dpi: f64,
}

impl BadgeConfig {
    /// Creates a configuration with the default layout and font search directories.
    pub fn new(paths: BadgePaths) -> Self {
        Self {
            paths,
            layout: LayoutConfig::default(),
            font_dirs: fonts::font_directory_candidates(),
            dpi: DEFAULT_DPI,
        }
    }

    /// Resolves the base directory from `ID_BADGES_DIR`, falling back to the
    /// current working directory.
    pub fn from_env() -> Self {
        let base = env::var_os(BASE_DIR_ENV)
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(BadgePaths::from_base_dir(base))
    }

    /// Replaces the layout and returns the updated configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the font search directories and returns the updated configuration.
    pub fn with_font_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.font_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output resolution and returns the updated configuration.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }
}

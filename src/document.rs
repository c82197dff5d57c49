//! Assembly of rendered cards into a multi-page PDF.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use log::debug;
use printpdf::indices::{PdfLayerIndex, PdfPageIndex};
use printpdf::{Image, Mm, PdfDocument, PdfDocumentReference};

use crate::card::Card;
use crate::config::DEFAULT_DPI;
use crate::error::BadgeError;

const MM_PER_INCH: f64 = 25.4;
const LAYER_NAME: &str = "Card";

/// Document title written into the PDF metadata.
pub const DEFAULT_TITLE: &str = "Employee ID Cards";

fn px_to_mm(px: u32, dpi: f64) -> Mm {
    Mm(MM_PER_INCH * px as f64 / dpi)
}

/// Serialized PDF together with the number of pages it holds.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Collects cards in order and writes them one per page.
///
/// Each page is sized to its card at the configured resolution, so an 800x400
/// card at 100 dpi lands on an 8x4 inch page with no margins.
pub struct DocumentBuilder {
    title: String,
    dpi: f64,
    cards: Vec<Card>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            dpi: DEFAULT_DPI,
            cards: Vec::new(),
        }
    }
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title and returns the updated builder.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the placement resolution and returns the updated builder.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Appends a card as the next page.
    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Appends a card and returns the updated builder.
    pub fn add_card(mut self, card: Card) -> Self {
        self.push_card(card);
        self
    }

    pub fn page_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Employee names in page order.
    pub fn page_titles(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.name().to_owned()).collect()
    }

    /// Serializes all cards into a PDF, one page each, in insertion order.
    pub fn render(self) -> Result<RenderedPdf, BadgeError> {
        let pages = self.cards.len();
        let mut cards = self.cards.into_iter();
        let first = cards.next().ok_or(BadgeError::EmptyDocument)?;

        let (width, height) = first.dimensions();
        let (document, page, layer) = PdfDocument::new(
            self.title.as_str(),
            px_to_mm(width, self.dpi),
            px_to_mm(height, self.dpi),
            LAYER_NAME,
        );
        place_card(&document, page, layer, first, self.dpi);

        for card in cards {
            let (width, height) = card.dimensions();
            let (page, layer) = document.add_page(
                px_to_mm(width, self.dpi),
                px_to_mm(height, self.dpi),
                LAYER_NAME,
            );
            place_card(&document, page, layer, card, self.dpi);
        }

        let mut writer = BufWriter::new(Vec::new());
        document
            .save(&mut writer)
            .map_err(|err| BadgeError::Pdf(err.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|err| BadgeError::Pdf(err.to_string()))?;

        debug!("Rendered {} page(s) into {} bytes", pages, bytes.len());
        Ok(RenderedPdf { bytes, pages })
    }

    /// Renders the document and adds one outline entry per page, titled with
    /// the employee name.
    #[cfg(feature = "bookmarks")]
    pub fn render_with_bookmarks(self) -> Result<RenderedPdf, BadgeError> {
        let titles = self.page_titles();
        let rendered = self.render()?;
        let bytes = crate::bookmarks::apply_page_bookmarks(&rendered.bytes, &titles)?;
        Ok(RenderedPdf {
            bytes,
            pages: rendered.pages,
        })
    }

    /// Renders the document and writes it to `path`.
    pub fn write_to(self, path: impl AsRef<Path>) -> Result<RenderedPdf, BadgeError> {
        let path = path.as_ref();
        #[cfg(feature = "bookmarks")]
        let rendered = self.render_with_bookmarks()?;
        #[cfg(not(feature = "bookmarks"))]
        let rendered = self.render()?;
        fs::write(path, &rendered.bytes).map_err(|err| BadgeError::io(path, err))?;
        Ok(rendered)
    }
}

fn place_card(
    document: &PdfDocumentReference,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    card: Card,
    dpi: f64,
) {
    let layer = document.get_page(page).get_layer(layer);
    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(card.into_image()));
    image.add_to_layer(layer, None, None, None, None, None, Some(dpi));
}

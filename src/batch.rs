//! The batch driver: records in, one PDF out.

use std::fmt;
use std::path::PathBuf;

use log::info;

use crate::card::CardRenderer;
use crate::config::BadgeConfig;
use crate::document::DocumentBuilder;
use crate::error::BadgeError;
use crate::fonts::FontSet;
use crate::model::CardAssets;
use crate::records;

/// Progress notices emitted while a batch runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchEvent {
    /// The input table does not exist.
    MissingInput { path: PathBuf },
    /// The input table holds no rows.
    NoRecords,
    /// A card is about to be rendered (`index` is zero-based).
    Rendering { index: usize, name: String },
    /// The document was written.
    Written { path: PathBuf, pages: usize },
}

impl fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { path } => write!(f, "Missing CSV: {}", path.display()),
            Self::NoRecords => write!(f, "No cards to generate."),
            Self::Rendering { name, .. } => write!(f, "→ Generating card for {name}"),
            Self::Written { path, .. } => write!(f, "Done! See {}", path.display()),
        }
    }
}

/// How a batch run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// No input table; nothing was written.
    MissingInput,
    /// Input table without rows; nothing was written.
    NoRecords,
    /// The document was written with one page per record.
    Written { path: PathBuf, pages: usize },
}

/// Runs a batch, reporting progress through `on_event`.
///
/// Records are rendered strictly in input order, each onto a fresh canvas with
/// its own photo and logo loaded just for that card.
pub fn run<F>(config: &BadgeConfig, mut on_event: F) -> Result<BatchOutcome, BadgeError>
where
    F: FnMut(&BatchEvent),
{
    let paths = &config.paths;

    let Some(records) = records::read_records(&paths.input_csv)? else {
        on_event(&BatchEvent::MissingInput {
            path: paths.input_csv.clone(),
        });
        return Ok(BatchOutcome::MissingInput);
    };

    if records.is_empty() {
        on_event(&BatchEvent::NoRecords);
        return Ok(BatchOutcome::NoRecords);
    }

    info!(
        "Rendering {} card(s) from {}",
        records.len(),
        paths.input_csv.display()
    );

    let fonts = FontSet::load(&config.layout, &config.font_dirs);
    let renderer = CardRenderer::new(config.layout.clone(), fonts);
    let mut document = DocumentBuilder::new().with_dpi(config.dpi);

    for (index, record) in records.iter().enumerate() {
        on_event(&BatchEvent::Rendering {
            index,
            name: record.name().to_owned(),
        });
        let assets = CardAssets::load(paths, record)?;
        document.push_card(renderer.render(record, &assets));
    }

    let rendered = document.write_to(&paths.output_pdf)?;
    info!(
        "Wrote {} page(s) to {}",
        rendered.pages,
        paths.output_pdf.display()
    );

    on_event(&BatchEvent::Written {
        path: paths.output_pdf.clone(),
        pages: rendered.pages,
    });
    Ok(BatchOutcome::Written {
        path: paths.output_pdf.clone(),
        pages: rendered.pages,
    })
}

//! Error type shared by the badge pipeline.
//!
//! Only failures that abort a run live here. A missing input table or an empty
//! record set are ordinary [`crate::batch::BatchOutcome`] values, and absent
//! logo/photo files are plain `None` assets.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while reading records, decoding assets or writing the document.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The input table could not be parsed.
    #[error("Failed to read employee table: {0}")]
    Csv(#[from] csv::Error),

    /// The input table lacks one of the required columns.
    #[error("Employee table is missing the '{column}' column")]
    MissingColumn { column: &'static str },

    /// An existing image file could not be opened or decoded.
    #[error("Failed to decode image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// printpdf refused to serialize the document.
    #[error("Failed to assemble PDF: {0}")]
    Pdf(String),

    /// A document was rendered without any cards.
    #[error("Cannot render a document without pages")]
    EmptyDocument,

    /// The outline could not be embedded into the rendered PDF.
    #[cfg(feature = "bookmarks")]
    #[error("Failed to embed bookmarks: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

impl BadgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_the_column() {
        let err = BadgeError::MissingColumn {
            column: "photo_filename",
        };
        assert!(err.to_string().contains("photo_filename"), "got: {err}");
    }

    #[test]
    fn io_error_keeps_its_source() {
        let err = BadgeError::io(
            "out/employee_ids.pdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = std::error::Error::source(&err).expect("io source");
        assert!(source.to_string().contains("denied"));
        assert!(err.to_string().contains("employee_ids.pdf"));
    }
}

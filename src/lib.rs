//! Core entry point for the id_badges crate.
//!
//! Employee records are read from a CSV table, composited onto a fixed badge
//! template and written as a multi-page PDF, one card per page:
//!
//! ```text
//! employee.csv -> records -> card -> document -> employee_ids.pdf
//! ```
//!
//! [`batch::run`] drives the whole pipeline; the individual stages are public
//! so callers can render cards with alternate layouts or assemble documents
//! themselves.

pub mod batch;
pub mod card;
pub mod config;
pub mod document;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod records;
pub mod text;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use batch::{run, BatchEvent, BatchOutcome};
pub use card::{Card, CardRenderer};
pub use config::{BadgeConfig, BadgePaths, FontSpec, LayoutConfig, Rect};
pub use document::{DocumentBuilder, RenderedPdf};
pub use error::BadgeError;
pub use fonts::{load_font, FontOrigin, FontSet, LoadedFont};
pub use model::{CardAssets, EmployeeRecord};

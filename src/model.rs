//! Values flowing through a badge run: input records and per-card assets.

use image::DynamicImage;

use crate::config::BadgePaths;
use crate::elements;
use crate::error::BadgeError;

/// One row of the employee table, with surrounding whitespace removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeRecord {
    name: String,
    title: String,
    photo_filename: String,
}

impl EmployeeRecord {
    /// Creates a record, trimming every field.
    pub fn new(
        name: impl AsRef<str>,
        title: impl AsRef<str>,
        photo_filename: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_owned(),
            title: title.as_ref().trim().to_owned(),
            photo_filename: photo_filename.as_ref().trim().to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// File name of the portrait inside the photo directory; may be empty.
    pub fn photo_filename(&self) -> &str {
        &self.photo_filename
    }
}

/// Optional bitmaps composited onto a single card.
///
/// `None` means the asset is absent and the corresponding feature is simply
/// not drawn.
#[derive(Clone, Debug, Default)]
pub struct CardAssets {
    pub logo: Option<DynamicImage>,
    pub photo: Option<DynamicImage>,
}

impl CardAssets {
    /// Assets with neither logo nor photo.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the logo and returns the updated assets.
    pub fn with_logo(mut self, logo: impl Into<Option<DynamicImage>>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Sets the photo and returns the updated assets.
    pub fn with_photo(mut self, photo: impl Into<Option<DynamicImage>>) -> Self {
        self.photo = photo.into();
        self
    }

    /// Loads the logo and the record's photo from disk.
    ///
    /// Files that do not exist yield `None`; files that exist but fail to
    /// decode abort with [`BadgeError::Image`].
    pub fn load(paths: &BadgePaths, record: &EmployeeRecord) -> Result<Self, BadgeError> {
        let logo = elements::load_optional_image(&paths.logo)?;
        let photo = match paths.photo_path(record.photo_filename()) {
            Some(path) => elements::load_optional_image(path)?,
            None => None,
        };
        Ok(Self { logo, photo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let record = EmployeeRecord::new(" Jane Doe ", "\tEngineer", "jane.png  ");
        assert_eq!(record.name(), "Jane Doe");
        assert_eq!(record.title(), "Engineer");
        assert_eq!(record.photo_filename(), "jane.png");
    }

    #[test]
    fn missing_files_load_as_absent_assets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = BadgePaths::from_base_dir(dir.path());
        let record = EmployeeRecord::new("Jane", "Engineer", "jane.png");
        let assets = CardAssets::load(&paths, &record).expect("absent assets are not errors");
        assert!(assets.logo.is_none());
        assert!(assets.photo.is_none());
    }
}

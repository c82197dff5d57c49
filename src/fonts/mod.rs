//! Font resolution for the card renderer.
//!
//! A [`FontSpec`] names a font file and a pixel size. [`load_font`] walks a list
//! of search directories and returns the first file that parses as a
//! TrueType/OpenType face; when none does, it hands back the built-in bitmap
//! face instead of an error so a card always renders.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rusttype::Font;
use thiserror::Error;

use crate::config::{FontSpec, LayoutConfig};

mod builtin;

pub use builtin::BuiltinFace;

/// Environment variable pointing at a directory with the template fonts.
pub const FONTS_DIR_ENV: &str = "ID_BADGES_FONTS_DIR";

/// Environment variable overriding the Windows font directory lookup.
pub const WINDOWS_FONTS_DIR_ENV: &str = "ID_BADGES_WINDOWS_FONTS_DIR";

const UNIX_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

/// Directories searched for template fonts, in priority order.
pub fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    if let Some(windows) = windows_font_directory() {
        push_unique(&mut candidates, windows);
    }

    for dir in UNIX_FONT_DIRS {
        push_unique(&mut candidates, PathBuf::from(dir));
    }

    candidates
}

/// Where a [`LoadedFont`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Parsed from the font file at this path.
    File(PathBuf),
    /// The built-in bitmap face.
    Builtin,
}

/// Glyph source backing a [`LoadedFont`].
#[derive(Clone)]
pub enum FontFace {
    TrueType(Font<'static>),
    Builtin(BuiltinFace),
}

/// A resolved font at a fixed pixel size.
#[derive(Clone)]
pub struct LoadedFont {
    face: FontFace,
    size: f32,
    origin: FontOrigin,
}

impl LoadedFont {
    /// The built-in face magnified to approximate `size` pixels.
    pub fn builtin(size: f32) -> Self {
        Self {
            face: FontFace::Builtin(BuiltinFace::for_size(size)),
            size,
            origin: FontOrigin::Builtin,
        }
    }

    /// Wraps an already parsed TrueType face.
    pub fn from_font(font: Font<'static>, size: f32, origin: FontOrigin) -> Self {
        Self {
            face: FontFace::TrueType(font),
            size,
            origin,
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Requested pixel size.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// Whether the resolution fell back to the built-in face.
    pub fn is_builtin(&self) -> bool {
        matches!(self.origin, FontOrigin::Builtin)
    }
}

impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont")
            .field("size", &self.size)
            .field("origin", &self.origin)
            .finish()
    }
}

#[derive(Debug, Error)]
enum FontLoadError {
    #[error("not a file")]
    Missing,
    #[error("{0}")]
    Read(#[from] io::Error),
    #[error("not a TrueType/OpenType font")]
    Parse,
}

fn load_font_file(path: &Path) -> Result<Font<'static>, FontLoadError> {
    if !path.is_file() {
        return Err(FontLoadError::Missing);
    }
    let data = fs::read(path)?;
    Font::try_from_vec(data).ok_or(FontLoadError::Parse)
}

fn font_file_candidates(spec: &FontSpec, search_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates = vec![spec.file.clone()];
    if spec.file.is_relative() {
        for dir in search_dirs {
            push_unique(&mut candidates, dir.join(&spec.file));
        }
    }
    candidates
}

/// Resolves `spec` against `search_dirs`.
///
/// The file name is tried as given first, then below each search directory in
/// order. The first candidate that reads and parses wins; if none does the
/// built-in face is returned.
pub fn load_font(spec: &FontSpec, search_dirs: &[PathBuf]) -> LoadedFont {
    let candidates = font_file_candidates(spec, search_dirs);

    for candidate in &candidates {
        match load_font_file(candidate) {
            Ok(font) => {
                debug!("Loaded font {} at {}px", candidate.display(), spec.size);
                return LoadedFont::from_font(font, spec.size, FontOrigin::File(candidate.clone()));
            }
            Err(FontLoadError::Missing) => {}
            Err(err) => debug!("Skipping font candidate {}: {}", candidate.display(), err),
        }
    }

    warn!(
        "Font '{}' unavailable ({} locations checked); falling back to the built-in face.",
        spec.file.display(),
        candidates.len()
    );
    LoadedFont::builtin(spec.size)
}

/// The four faces used by the card template.
#[derive(Clone, Debug)]
pub struct FontSet {
    pub company_name: LoadedFont,
    pub company_sub: LoadedFont,
    pub title: LoadedFont,
    pub name: LoadedFont,
}

impl FontSet {
    /// Resolves every font named by `layout`.
    pub fn load(layout: &LayoutConfig, search_dirs: &[PathBuf]) -> Self {
        Self {
            company_name: load_font(&layout.company_name_font, search_dirs),
            company_sub: load_font(&layout.company_sub_font, search_dirs),
            title: load_font(&layout.title_font, search_dirs),
            name: load_font(&layout.name_font, search_dirs),
        }
    }

    /// Built-in faces at the layout's sizes, independent of the host's fonts.
    pub fn builtin(layout: &LayoutConfig) -> Self {
        Self {
            company_name: LoadedFont::builtin(layout.company_name_font.size),
            company_sub: LoadedFont::builtin(layout.company_sub_font.size),
            title: LoadedFont::builtin(layout.title_font.size),
            name: LoadedFont::builtin(layout.name_font.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_falls_back_to_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spec = FontSpec::new("definitely-not-installed.ttf", 28.0);
        let font = load_font(&spec, &[dir.path().to_path_buf()]);
        assert!(font.is_builtin());
        assert_eq!(font.size(), 28.0);
    }

    #[test]
    fn unparseable_font_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("arial.ttf"), b"not a font").expect("write stub");
        let spec = FontSpec::new("arial.ttf", 22.0);
        let font = load_font(&spec, &[dir.path().to_path_buf()]);
        assert_eq!(font.origin(), &FontOrigin::Builtin);
    }

    #[test]
    fn search_dirs_follow_the_bare_file_name() {
        let spec = FontSpec::new("arialbd.ttf", 36.0);
        let dirs = vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/a")];
        let candidates = font_file_candidates(&spec, &dirs);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("arialbd.ttf"),
                PathBuf::from("/a/arialbd.ttf"),
                PathBuf::from("/b/arialbd.ttf"),
            ]
        );
    }

    #[test]
    fn absolute_font_path_is_not_joined() {
        let spec = FontSpec::new("/opt/fonts/brand.ttf", 20.0);
        let candidates = font_file_candidates(&spec, &[PathBuf::from("/a")]);
        assert_eq!(candidates, vec![PathBuf::from("/opt/fonts/brand.ttf")]);
    }
}

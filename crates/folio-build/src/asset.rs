//! Source assets and their discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions copied verbatim into the build directory.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "woff", "woff2", "ttf",
];

/// Type tag of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Markup,
    Stylesheet,
    Script,
    Static,
}

impl AssetKind {
    /// File extensions (lowercase, without the dot) belonging to this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetKind::Markup => &["html"],
            AssetKind::Stylesheet => &["css"],
            AssetKind::Script => &["js"],
            AssetKind::Static => STATIC_EXTENSIONS,
        }
    }

    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [
            AssetKind::Markup,
            AssetKind::Stylesheet,
            AssetKind::Script,
            AssetKind::Static,
        ]
        .into_iter()
        .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Markup => "markup",
            AssetKind::Stylesheet => "stylesheet",
            AssetKind::Script => "script",
            AssetKind::Static => "static",
        }
    }
}

/// A source file read into memory. Never mutated after reading.
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    pub kind: AssetKind,
    pub content: Vec<u8>,
}

impl Asset {
    /// Read an asset from disk.
    pub fn read(path: impl Into<PathBuf>, kind: AssetKind) -> io::Result<Self> {
        let path = path.into();
        let content = fs::read(&path)?;
        Ok(Self {
            path,
            kind,
            content,
        })
    }
}

/// List the files of `kind` directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list. Subdirectories are not
/// descended into.
pub fn discover(dir: &Path, kind: AssetKind) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if AssetKind::from_path(&path) == Some(kind) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            AssetKind::from_path(Path::new("index.html")),
            Some(AssetKind::Markup)
        );
        assert_eq!(
            AssetKind::from_path(Path::new("css/site.CSS")),
            Some(AssetKind::Stylesheet)
        );
        assert_eq!(
            AssetKind::from_path(Path::new("js/main.js")),
            Some(AssetKind::Script)
        );
        assert_eq!(
            AssetKind::from_path(Path::new("fonts.woff2")),
            Some(AssetKind::Static)
        );
        assert_eq!(AssetKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(AssetKind::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_discover_is_flat_and_sorted() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("b.html"), "b").unwrap();
        fs::write(dir.join("a.html"), "a").unwrap();
        fs::write(dir.join("logo.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("c.html"), "c").unwrap();

        let found = discover(dir, AssetKind::Markup).unwrap();
        assert_eq!(found, vec![dir.join("a.html"), dir.join("b.html")]);

        let found = discover(dir, AssetKind::Static).unwrap();
        assert_eq!(found, vec![dir.join("logo.png")]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let temp = TempDir::new().unwrap();
        let found = discover(&temp.path().join("missing"), AssetKind::Stylesheet).unwrap();
        assert!(found.is_empty());
    }
}

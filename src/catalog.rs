//! Gallery catalogs: the list of cards a gallery is built from.
//!
//! A catalog comes either from a JSON manifest or from scanning a directory of
//! images, where each top-level folder becomes a category.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};
use walkdir::{DirEntry, WalkDir};

/// Manifest filename looked up in the library root
pub const MANIFEST_FILENAME: &str = "gallery.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("library path does not exist: {}", .0.display())]
    MissingLibrary(PathBuf),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One gallery entry. Category and title may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Image source, relative to the library root or absolute
    pub image: String,
}

impl CardSpec {
    pub fn new(category: Option<&str>, title: Option<&str>, image: &str) -> Self {
        Self {
            category: category.map(str::to_string),
            title: title.map(str::to_string),
            image: image.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub cards: Vec<CardSpec>,
}

impl Catalog {
    /// Use `manifest` if given, else `library/gallery.json` if present, else scan.
    #[instrument(skip_all, fields(library = %library.display()))]
    pub fn load(library: &Path, manifest: Option<&Path>) -> Result<Self, CatalogError> {
        if let Some(path) = manifest {
            return Self::read_manifest(path);
        }
        let default_manifest = library.join(MANIFEST_FILENAME);
        if default_manifest.is_file() {
            debug!(path = %default_manifest.display(), "using library manifest");
            return Self::read_manifest(&default_manifest);
        }
        Self::scan(library)
    }

    pub fn read_manifest(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Self = serde_json::from_str(&text).map_err(|source| CatalogError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        info!(cards = catalog.cards.len(), path = %path.display(), "loaded manifest");
        Ok(catalog)
    }

    pub fn write_manifest(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CatalogError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json + "\n").map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a catalog from the image files under `root`, in file-name order.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::MissingLibrary(root.to_path_buf()));
        }

        let mut cards = Vec::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() || !is_image_file(entry.path()) {
                continue;
            }
            if let Some(card) = card_for_entry(root, &entry) {
                cards.push(card);
            }
        }

        info!(cards = cards.len(), "scanned library");
        Ok(Self { cards })
    }

    /// Distinct categories in order of first appearance, compared case-insensitively.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut categories = Vec::new();
        for category in self.cards.iter().filter_map(|c| c.category.as_deref()) {
            let key = category.to_lowercase();
            if category.trim().is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            categories.push(category.to_string());
        }
        categories
    }
}

fn card_for_entry(root: &Path, entry: &DirEntry) -> Option<CardSpec> {
    let relative = entry.path().strip_prefix(root).ok()?;
    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    let category = (components.len() > 1).then(|| components[0].clone());
    let title = entry
        .path()
        .file_stem()
        .map(|s| humanize_title(&s.to_string_lossy()));

    Some(CardSpec {
        category,
        title,
        image: components.join("/"),
    })
}

/// `misty_morning-02` → `Misty Morning 02`
pub fn humanize_title(stem: &str) -> String {
    stem.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Image formats the lightbox can decode
pub fn is_image_file(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    matches!(
        extension.as_str(),
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tiff" | "tif"
    )
}

/// Check if a directory entry is hidden (starts with .)
/// Never considers the root entry (depth 0) as hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_library() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("nature/forest")).unwrap();
        fs::create_dir_all(root.join("city")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("nature/misty_morning.jpg"), "data").unwrap();
        fs::write(root.join("nature/forest/old-oak.png"), "data").unwrap();
        fs::write(root.join("city/skyline.JPG"), "data").unwrap();
        fs::write(root.join("city/notes.txt"), "data").unwrap();
        fs::write(root.join(".cache/thumb.jpg"), "data").unwrap();
        fs::write(root.join("loose.webp"), "data").unwrap();
        temp
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("a.JPEG")));
        assert!(is_image_file(Path::new("a.webp")));
        assert!(!is_image_file(Path::new("a.mp4")));
        assert!(!is_image_file(Path::new("noext")));
    }

    #[test]
    fn test_humanize_title() {
        assert_eq!(humanize_title("misty_morning"), "Misty Morning");
        assert_eq!(humanize_title("old-oak"), "Old Oak");
        assert_eq!(humanize_title("IMG_0042"), "IMG 0042");
        assert_eq!(humanize_title("__"), "");
    }

    #[test]
    fn test_scan_uses_top_level_folder_as_category() {
        let library = setup_library();
        let catalog = Catalog::scan(library.path()).unwrap();

        let images: Vec<_> = catalog.cards.iter().map(|c| c.image.as_str()).collect();
        assert_eq!(
            images,
            vec!["city/skyline.JPG", "loose.webp", "nature/forest/old-oak.png", "nature/misty_morning.jpg"]
        );

        let oak = &catalog.cards[2];
        assert_eq!(oak.category.as_deref(), Some("nature"));
        assert_eq!(oak.title.as_deref(), Some("Old Oak"));

        let loose = &catalog.cards[1];
        assert_eq!(loose.category, None);
    }

    #[test]
    fn test_scan_missing_library_errors() {
        let result = Catalog::scan(Path::new("/nonexistent/gallery/root"));
        assert!(matches!(result, Err(CatalogError::MissingLibrary(_))));
    }

    #[test]
    fn test_categories_first_appearance_case_insensitive() {
        let catalog = Catalog {
            cards: vec![
                CardSpec::new(Some("Nature"), None, "a.jpg"),
                CardSpec::new(None, None, "b.jpg"),
                CardSpec::new(Some("city"), None, "c.jpg"),
                CardSpec::new(Some("nature"), None, "d.jpg"),
                CardSpec::new(Some("  "), None, "e.jpg"),
            ],
        };
        assert_eq!(catalog.categories(), vec!["Nature", "city"]);
    }

    #[test]
    fn test_manifest_missing_fields_deserialize_to_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gallery.json");
        fs::write(&path, r#"{"cards":[{"image":"x.jpg"},{"category":"art","title":"Sunset","image":"s.jpg"}]}"#)
            .unwrap();

        let catalog = Catalog::read_manifest(&path).unwrap();
        assert_eq!(catalog.cards[0], CardSpec::new(None, None, "x.jpg"));
        assert_eq!(catalog.cards[1].title.as_deref(), Some("Sunset"));
    }

    #[test]
    fn test_invalid_manifest_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gallery.json");
        fs::write(&path, "{not json").unwrap();

        let result = Catalog::read_manifest(&path);
        assert!(matches!(result, Err(CatalogError::Manifest { .. })));
    }

    #[test]
    fn test_load_prefers_library_manifest_over_scan() {
        let library = setup_library();
        let manifest = Catalog {
            cards: vec![CardSpec::new(Some("art"), Some("Only"), "only.jpg")],
        };
        manifest
            .write_manifest(&library.path().join(MANIFEST_FILENAME))
            .unwrap();

        let loaded = Catalog::load(library.path(), None).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_load_scans_without_manifest() {
        let library = setup_library();
        let loaded = Catalog::load(library.path(), None).unwrap();
        assert_eq!(loaded.cards.len(), 4);
    }
}

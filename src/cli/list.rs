use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::catalog::Catalog;
use crate::document::{Document, MemoryDocument};
use crate::gallery::{GalleryController, GalleryEvent, ALL_CATEGORIES};

/// A visible card for display purposes
#[derive(Debug, Clone, PartialEq)]
pub struct CardInfo {
    pub title: String,
    pub category: String,
    pub image: String,
}

/// Options for filtering the card list
#[derive(Debug, Default)]
pub struct ListOptions {
    pub category: Option<String>,
    pub search: Option<String>,
    pub manifest: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ListResult {
    pub visible: Vec<CardInfo>,
    pub total: usize,
}

/// Run the gallery headlessly with the given filter and report what stays visible
pub fn run_list(library_path: &Path, options: ListOptions) -> Result<ListResult> {
    let catalog = Catalog::load(library_path, options.manifest.as_deref())?;
    let mut gallery = GalleryController::new(MemoryDocument::from_catalog(&catalog));

    // Search first: activating the filter afterwards reads the stored query,
    // even when no button carries exactly the requested category.
    if let Some(query) = options.search {
        gallery.dispatch(GalleryEvent::SearchChanged { query });
    }
    let category = options.category.unwrap_or_else(|| ALL_CATEGORIES.to_string());
    gallery.dispatch(GalleryEvent::ActivateFilter { category });

    let doc = gallery.document();
    let visible = gallery
        .visible()
        .into_iter()
        .map(|card| CardInfo {
            title: card.title.clone(),
            category: card.category.clone(),
            image: doc
                .first_descendant_by_tag(card.node, "img")
                .and_then(|img| doc.attribute(img, "src"))
                .unwrap_or_default(),
        })
        .collect();

    Ok(ListResult {
        visible,
        total: gallery.cards().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardSpec;
    use std::fs;
    use tempfile::TempDir;

    fn setup_manifest() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gallery.json");
        Catalog {
            cards: vec![
                CardSpec::new(Some("art"), Some("Sunset"), "art/sunset.jpg"),
                CardSpec::new(Some("photo"), Some("Sunrise"), "photo/sunrise.jpg"),
                CardSpec::new(Some("art"), Some("Dawn"), "art/dawn.jpg"),
            ],
        }
        .write_manifest(&path)
        .unwrap();
        (temp, path)
    }

    fn titles(result: &ListResult) -> Vec<&str> {
        result.visible.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_list_everything_by_default() {
        let (temp, _) = setup_manifest();
        let result = run_list(temp.path(), ListOptions::default()).unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(titles(&result), vec!["Sunset", "Sunrise", "Dawn"]);
    }

    #[test]
    fn test_list_by_category() {
        let (temp, _) = setup_manifest();
        let result = run_list(
            temp.path(),
            ListOptions {
                category: Some("art".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(titles(&result), vec!["Sunset", "Dawn"]);
        assert_eq!(result.visible[1].image, "art/dawn.jpg");
    }

    #[test]
    fn test_list_by_search() {
        let (temp, _) = setup_manifest();
        let result = run_list(
            temp.path(),
            ListOptions {
                search: Some("sun".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(titles(&result), vec!["Sunset", "Sunrise"]);
    }

    #[test]
    fn test_list_category_ignores_case_and_keeps_search() {
        let (temp, _) = setup_manifest();
        let result = run_list(
            temp.path(),
            ListOptions {
                category: Some("ART".to_string()),
                search: Some("dawn".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(titles(&result), vec!["Dawn"]);
    }

    #[test]
    fn test_list_with_explicit_manifest() {
        let (_temp, manifest) = setup_manifest();
        let empty_library = TempDir::new().unwrap();
        fs::write(empty_library.path().join("stray.jpg"), "data").unwrap();

        let result = run_list(
            empty_library.path(),
            ListOptions {
                manifest: Some(manifest),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_list_nonexistent_library_errors() {
        let result = run_list(Path::new("/nonexistent/library"), ListOptions::default());
        assert!(result.is_err());
    }
}

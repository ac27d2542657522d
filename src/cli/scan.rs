use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, instrument};

use crate::catalog::{Catalog, MANIFEST_FILENAME};

/// Options for the scan command
#[derive(Debug, Default)]
pub struct ScanOptions {
    /// Manifest destination (defaults to `gallery.json` in the library root)
    pub output: Option<PathBuf>,
    /// Report only, don't write a manifest
    pub dry_run: bool,
}

/// Statistics from the scan operation
#[derive(Debug, Default)]
pub struct ScanStats {
    pub cards: usize,
    pub categories: Vec<String>,
    pub uncategorized: usize,
    pub manifest: Option<PathBuf>,
}

/// Scan a directory of images and write the resulting catalog as a manifest
#[instrument(skip_all, fields(library = %library_path.display()))]
pub fn run_scan(library_path: &Path, options: ScanOptions) -> Result<ScanStats> {
    let library_path = library_path
        .canonicalize()
        .with_context(|| format!("Library path does not exist: {}", library_path.display()))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Scanning {}...", library_path.display()));

    let catalog = Catalog::scan(&library_path)?;
    spinner.finish_and_clear();

    let mut stats = ScanStats {
        cards: catalog.cards.len(),
        categories: catalog.categories(),
        uncategorized: catalog.cards.iter().filter(|c| c.category.is_none()).count(),
        manifest: None,
    };

    if !options.dry_run {
        let output = options
            .output
            .unwrap_or_else(|| library_path.join(MANIFEST_FILENAME));
        catalog
            .write_manifest(&output)
            .with_context(|| format!("Failed to write manifest: {}", output.display()))?;
        info!(cards = stats.cards, manifest = %output.display(), "wrote manifest");
        stats.manifest = Some(output);
    }

    Ok(stats)
}

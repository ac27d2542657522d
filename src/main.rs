use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use galleria::cli::{run_list, run_scan, ListOptions, ScanOptions};
use galleria::logging::{init_logging, LOG_ENV};
use galleria::tui::run_tui;

#[derive(Parser)]
#[command(name = "galleria")]
#[command(about = "Filterable image gallery with a keyboard-driven lightbox")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the gallery directory (launches TUI if no subcommand)
    #[arg(global = true)]
    library: Option<PathBuf>,

    /// Read cards from this manifest instead of `gallery.json` or a scan
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of images and write a gallery manifest
    Scan {
        /// Path to gallery root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Manifest destination (defaults to PATH/gallery.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Report what would be written without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// List the cards that stay visible under a filter
    List {
        /// Path to gallery root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Category filter (as on the filter buttons)
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search over title and category
        #[arg(long)]
        search: Option<String>,
        /// Read cards from this manifest
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging - guard must be held for logs to flush
    let _guard = init_logging().ok();
    let verbose = std::env::var(LOG_ENV).is_ok();
    let start = Instant::now();

    let cli = Cli::parse();

    let result = run_command(cli);

    if verbose {
        let elapsed = start.elapsed();
        eprintln!("Completed in {:.2?}", elapsed);
    }

    result
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Scan {
            path,
            output,
            dry_run,
        }) => {
            let stats = run_scan(&path, ScanOptions { output, dry_run })?;
            println!(
                "Scanned: {} cards in {} categories ({} uncategorized)",
                stats.cards,
                stats.categories.len(),
                stats.uncategorized
            );
            if !stats.categories.is_empty() {
                println!("Categories: {}", stats.categories.join(", "));
            }
            match stats.manifest {
                Some(manifest) => println!("Wrote {}", manifest.display()),
                None => println!("Dry run: no manifest written"),
            }
        }
        Some(Commands::List {
            path,
            category,
            search,
            manifest,
        }) => {
            let options = ListOptions {
                category,
                search,
                manifest,
            };
            let result = run_list(&path, options)?;
            for card in &result.visible {
                let category = if card.category.is_empty() {
                    String::new()
                } else {
                    format!(" #{}", card.category)
                };
                println!("{}{} ({})", card.title, category, card.image);
            }
            println!("{} of {} cards visible", result.visible.len(), result.total);
        }
        None => {
            // Launch TUI
            let library = cli.library.unwrap_or_else(|| PathBuf::from("."));
            run_tui(&library, cli.manifest.as_deref())?;
        }
    }

    Ok(())
}

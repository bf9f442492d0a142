use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::collection::Collection;
use crate::record::Record;
use crate::theme::ThemeManager;

/// Marcador - Terminal bookmark collection manager
#[derive(Parser)]
#[command(name = "marcador")]
#[command(about = "A TUI-based bookmark collection manager with inline editing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Dry run mode (don't write the collection file)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Bookmark collection file (JSON)
    #[arg(long, global = true)]
    pub collection: Option<PathBuf>,

    /// Color theme to start with
    #[arg(long)]
    pub theme: Option<String>,
}

impl Cli {
    /// Log level implied by the CLI flags
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available color themes
    Themes,

    /// Write a sample bookmark collection
    Sample {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a bookmark collection file
    Check {
        /// Collection file to check
        file: PathBuf,
    },
}

/// Handle CLI subcommands that run instead of the TUI
pub fn handle_command(command: Commands, dry_run: bool) -> Result<()> {
    match command {
        Commands::Themes => handle_themes(),
        Commands::Sample { output } => handle_sample(output, dry_run),
        Commands::Check { file } => handle_check(&file),
    }
}

fn handle_themes() -> Result<()> {
    println!("🎨 Available Themes");
    println!("===================\n");

    let manager = ThemeManager::new();
    let default_name = manager.current_theme().name.clone();
    for name in manager.available_themes() {
        let marker = if name == default_name { " (default)" } else { "" };
        println!("   {}{}", name, marker);
    }

    println!("\n💡 Start with a theme using: marcador --theme <name>");
    Ok(())
}

fn handle_sample(output: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let records = Record::sample_set();

    match output {
        Some(path) => {
            println!("📚 Sample Bookmark Collection");
            println!("=============================\n");

            if dry_run {
                println!("🧪 Dry run mode - no file will be written");
                println!(
                    "   Would write {} bookmarks to {}",
                    records.len(),
                    path.display()
                );
                return Ok(());
            }

            let count = records.len();
            let mut collection = Collection::from_records(records);
            collection
                .save_as(&path)
                .map_err(|e| anyhow!("Failed to write sample collection: {}", e))?;
            println!("✅ Wrote {} sample bookmarks to {}", count, path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&records)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn handle_check(file: &Path) -> Result<()> {
    println!("🔍 Collection Check");
    println!("===================\n");

    let report = check_collection(file)?;

    println!("   File: {}", file.display());
    println!("   Bookmarks: {}", report.record_count);

    if report.invalid_urls.is_empty() && report.empty_titles == 0 && report.duplicate_ids == 0 {
        println!("\n✅ Collection looks good");
        return Ok(());
    }

    if !report.invalid_urls.is_empty() {
        println!(
            "\n⚠️  {} bookmark(s) with unparseable URLs:",
            report.invalid_urls.len()
        );
        for title in &report.invalid_urls {
            println!("   - {}", title);
        }
    }
    if report.empty_titles > 0 {
        println!(
            "\n⚠️  {} bookmark(s) with an empty title",
            report.empty_titles
        );
    }
    if report.duplicate_ids > 0 {
        println!("\n⚠️  {} duplicate bookmark id(s)", report.duplicate_ids);
    }

    Ok(())
}

/// Findings from validating a collection file
#[derive(Debug)]
pub struct CheckReport {
    pub record_count: usize,
    pub invalid_urls: Vec<String>,
    pub empty_titles: usize,
    pub duplicate_ids: usize,
}

pub fn check_collection(path: &Path) -> Result<CheckReport> {
    let collection = Collection::load(path)
        .map_err(|e| anyhow!("Failed to load collection {}: {}", path.display(), e))?;

    let mut invalid_urls = Vec::new();
    let mut empty_titles = 0;
    let mut seen = HashSet::new();
    let mut duplicate_ids = 0;

    for record in collection.records() {
        if !record.has_valid_url() {
            invalid_urls.push(record.title.clone());
        }
        if record.title.trim().is_empty() {
            empty_titles += 1;
        }
        if !seen.insert(record.id) {
            duplicate_ids += 1;
        }
    }

    Ok(CheckReport {
        record_count: collection.len(),
        invalid_urls,
        empty_titles,
        duplicate_ids,
    })
}

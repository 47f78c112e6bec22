//! innsync CLI - refreshes the Wandering Inn chapter and word-count data files.

use anyhow::{Context, Result};
use clap::Parser;
use innsync::config::Config;
use innsync::console::{Console, group_thousands};
use innsync::fetch::HttpSource;
use innsync::store::OutputStore;
use innsync::updater::{UpdateSummary, Updater};
use std::path::PathBuf;
use std::process::ExitCode;

/// Fetches the table of contents and word counts and rewrites the data files.
#[derive(Parser, Debug)]
#[command(name = "innsync")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write the data files to.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let console = Console::new();

    if let Err(e) = innsync::logging::init() {
        console.warning(&format!("Logging disabled: {e:#}"));
    }

    console.section("innsync - Wandering Inn Data Updater");

    match run(&args, &console).await {
        Ok(summary) => {
            print_summary(&console, &summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            console.error(&format!("Error updating data: {e:#}"));
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, console: &Console) -> Result<UpdateSummary> {
    console.step("Loading configuration...");
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    config.validate().context("Invalid configuration")?;
    console.success("Configuration loaded");

    let source = HttpSource::new(&config.http).context("Failed to set up HTTP client")?;
    let store = OutputStore::new(&config.output);

    console.step("Fetching table of contents and word counts...");
    console.info(&format!("TOC: {}", config.sources.table_of_contents_url));
    console.info(&format!("Word counts: {}", config.sources.word_count_url));

    let summary = Updater::new(&source, &config.sources, &store)
        .run()
        .await
        .context("Update failed")?;

    console.success(&format!(
        "Found {} volumes, {} books, {} chapters",
        summary.volumes, summary.books, summary.chapters
    ));
    console.success(&format!(
        "Loaded {} word count entries",
        summary.word_count_entries
    ));
    console.success(&format!("Chapters saved to {}", summary.paths.chapters.display()));
    console.success(&format!(
        "Word counts saved to {}",
        summary.paths.word_counts.display()
    ));

    Ok(summary)
}

fn print_summary(console: &Console, summary: &UpdateSummary) {
    console.section("Update complete!");
    console.summary(&[
        ("Volumes", console.count(summary.volumes as u64)),
        ("Books", console.count(summary.books as u64)),
        ("Total chapters", console.count(summary.chapters as u64)),
        (
            "Total word count entries",
            console.count(summary.word_count_entries as u64),
        ),
        ("Total words", console.count(summary.total_words)),
    ]);

    if !summary.diagnostics.is_empty() {
        console.warning(&format!(
            "{} table of contents entries had problems",
            group_thousands(summary.diagnostics.len() as u64)
        ));
        for diagnostic in &summary.diagnostics {
            console.info(&console.muted(&format!(
                "volume {}, book {}, entry {}: {}",
                diagnostic.volume + 1,
                diagnostic.book + 1,
                diagnostic.entry + 1,
                diagnostic.error
            )));
        }
    }
}

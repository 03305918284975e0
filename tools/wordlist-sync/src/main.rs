//! Word List Sync Tool
//!
//! Downloads a public word-frequency list and imports it into the Kousei
//! lexicon store, replacing the engine's small built-in baseline with a
//! full dictionary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use kousei_store::LexiconStore;

/// English frequency list: `word count` per line, 50k most common words.
const LIST_URL: &str =
    "https://raw.githubusercontent.com/hermitdave/FrequencyWords/master/content/2018/en/en_50k.txt";

/// Default list directory
fn default_list_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kousei")
        .join("wordlists")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "wordlist-sync")]
#[command(about = "Download and import word-frequency lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lexicon database path
    #[arg(long, env = "KOUSEI_DB", default_value = "kousei.db")]
    db: PathBuf,

    /// Directory for downloaded lists
    #[arg(short = 'D', long, env = "KOUSEI_WORDLIST_DIR")]
    list_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the frequency list
    Download {
        /// Force re-download if the file exists
        #[arg(short, long)]
        force: bool,
    },
    /// Import a downloaded list into the store
    Import {
        /// Import this file instead of the downloaded default
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Download and import (full refresh)
    Reset,
    /// Remove downloaded files
    Clean {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show list and store status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let list_dir = cli.list_dir.clone().unwrap_or_else(default_list_dir);
    let list_file = list_dir.join("en_50k.txt");

    match cli.command {
        Commands::Download { force } => {
            download(&list_dir, &list_file, force).await?;
        }
        Commands::Import { file } => {
            let path = file.unwrap_or(list_file);
            import(&cli.db, &path)?;
        }
        Commands::Reset => {
            download(&list_dir, &list_file, true).await?;
            import(&cli.db, &list_file)?;
        }
        Commands::Clean { yes } => {
            if !list_file.exists() {
                println!("Nothing to clean.");
                return Ok(());
            }
            if !yes {
                println!("This will remove {}.", list_file.display());
                print!("Are you sure? [y/N]: ");
                use std::io::Write;
                std::io::stdout().flush()?;

                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;

                if !input.trim().eq_ignore_ascii_case("y") {
                    info!("clean cancelled");
                    return Ok(());
                }
            }
            std::fs::remove_file(&list_file)?;
            println!("Removed {}", list_file.display());
        }
        Commands::Status => {
            if list_file.exists() {
                let size = std::fs::metadata(&list_file)?.len();
                println!("List file: {} ({} bytes)", list_file.display(), size);
            } else {
                println!("List file: not downloaded (run `wordlist-sync download`)");
            }

            let store = LexiconStore::open(&cli.db)?;
            store.init_schema()?;
            let stats = store.stats()?;
            println!("Store:     {}", cli.db.display());
            println!("  imported words: {}", stats.wordlist_words);
        }
    }

    Ok(())
}

/// Fetch the list over HTTPS and write it next to the store.
async fn download(dir: &PathBuf, file: &PathBuf, force: bool) -> Result<()> {
    if file.exists() && !force {
        println!(
            "{} already exists (use --force to re-download)",
            file.display()
        );
        return Ok(());
    }

    std::fs::create_dir_all(dir)?;
    info!("downloading {LIST_URL}");

    let body = reqwest::get(LIST_URL)
        .await
        .context("request failed")?
        .error_for_status()
        .context("server returned an error")?
        .text()
        .await
        .context("failed to read response body")?;

    std::fs::write(file, &body)
        .with_context(|| format!("failed to write {}", file.display()))?;
    println!("Downloaded {} ({} bytes)", file.display(), body.len());
    Ok(())
}

/// Parse `word count` lines and bulk-import them.
fn import(db: &PathBuf, file: &PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let rows: Vec<(String, u32)> = raw
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let word = parts.next()?;
            if !word.chars().all(|c| c.is_alphabetic() || c == '\'') {
                return None;
            }
            // Counts from big corpora can overflow u32; saturate.
            let frequency = parts
                .next()
                .and_then(|f| f.parse::<u64>().ok())
                .map(|f| f.min(u64::from(u32::MAX)) as u32)
                .unwrap_or(1);
            Some((word.to_string(), frequency))
        })
        .collect();

    let mut store = LexiconStore::bootstrap(db)?;
    let written = store.import_wordlist(rows)?;
    println!("Imported {written} words into {}", db.display());
    Ok(())
}

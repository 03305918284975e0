//! Kousei command-line interface.
//!
//! One entry point for every component: one-shot checks, text statistics,
//! the canonical demo, database management, and the web service.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use kousei_core::checker::{Checker, CheckerConfig};
use kousei_core::types::CheckMode;
use kousei_core::TextStats;
use kousei_server::AppConfig;
use kousei_store::LexiconStore;

/// Sentences exercising each correction path.
const DEMO_SENTENCES: &[&str] = &[
    "She went to the sea to meat her friend.",
    "Their going to the store to buy there groceries.",
    "I recieve the package yesterday and it was definately worth it.",
    "The weather is to hot for me to go outside.",
    "Its a beautiful day and the sun is shining bright.",
];

/// Context-aware spell checker
#[derive(Parser)]
#[command(name = "kousei")]
#[command(about = "Context-aware spell checker for English text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lexicon database path (default kousei.db)
    #[arg(long, env = "KOUSEI_DB", global = true)]
    db: Option<PathBuf>,

    /// Model directory (tokenizer.json, config.json, model.safetensors)
    #[arg(long, env = "KOUSEI_MODEL_DIR", global = true)]
    models_dir: Option<PathBuf>,

    /// Run rules-only, never loading the masked-LM
    #[arg(long, global = true)]
    no_model: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a piece of text and print the corrections
    Check {
        /// The text to check
        text: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print text statistics and readability metrics
    Stats {
        /// The text to analyze
        text: String,
    },
    /// Run the canonical demo sentences through the checker
    Demo,
    /// Manage the lexicon database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Start the web API and dashboard
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, env = "KOUSEI_CONFIG")]
        config: Option<PathBuf>,
        /// Listen host
        #[arg(long)]
        host: Option<String>,
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create the schema
    Init,
    /// Create the schema and populate the sample data
    Seed,
    /// Print row counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let db_override = cli.db.clone();
    let db = db_override
        .clone()
        .unwrap_or_else(|| PathBuf::from("kousei.db"));
    let models_dir = cli.models_dir.clone();
    let no_model = cli.no_model;

    match cli.command {
        Commands::Check { text, json } => {
            let checker = build_checker(&db, models_dir, no_model)?;
            let report = checker.check(&text)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Stats { text } => {
            let stats = TextStats::analyze(&text);
            println!("Words:                {}", stats.word_count);
            println!("Characters:           {}", stats.character_count);
            println!("Sentences:            {}", stats.sentence_count);
            println!("Flesch reading ease:  {:.1}", stats.flesch_reading_ease);
            println!("Flesch-Kincaid grade: {:.1}", stats.flesch_kincaid_grade);
            println!(
                "Readability index:    {:.1}",
                stats.automated_readability_index
            );
        }
        Commands::Demo => {
            let checker = build_checker(&db, models_dir, no_model)?;
            println!(
                "Engine: {}",
                if checker.has_neural() {
                    "masked-LM + rules"
                } else {
                    "rules-only"
                }
            );
            for (i, sentence) in DEMO_SENTENCES.iter().enumerate() {
                println!("\nTest case {}:", i + 1);
                println!("  Original:  {sentence}");
                let report = checker.check(sentence)?;
                println!("  Corrected: {}", report.corrected);
                println!("  Confidence: {:.2}", report.confidence);
                for correction in &report.corrections {
                    println!(
                        "    {} -> {} ({})",
                        correction.original, correction.corrected, correction.kind
                    );
                }
                let stats = TextStats::analyze(sentence);
                println!(
                    "  Stats: {} words, {} sentences",
                    stats.word_count, stats.sentence_count
                );
            }
        }
        Commands::Db { action } => run_db_action(&db, action)?,
        Commands::Serve { config, host, port } => {
            let mut config = AppConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(db) = db_override {
                config.store.path = db;
            }
            if let Some(dir) = models_dir {
                config.model.dir = Some(dir);
            }
            if no_model {
                config.model.enabled = false;
            }
            kousei_server::run(config).await?;
        }
    }

    Ok(())
}

/// Bootstrap the store and hydrate a checker from it.
fn build_checker(db: &Path, models_dir: Option<PathBuf>, no_model: bool) -> Result<Checker> {
    let store = LexiconStore::bootstrap(db)
        .with_context(|| format!("failed to open database {}", db.display()))?;
    let data = store.lexicon_data()?;

    let mut config = CheckerConfig::new();
    if let Some(dir) = models_dir {
        config = config.with_model_dir(dir);
    }
    if no_model {
        config = config.with_mode(CheckMode::Rules).with_neural(false);
    }

    Ok(Checker::new(config, data)?)
}

fn print_report(report: &kousei_core::CheckReport) {
    println!("Original:  {}", report.input);
    println!("Corrected: {}", report.corrected);
    println!("Confidence: {:.2} ({} mode)", report.confidence, report.mode);

    if report.corrections.is_empty() {
        println!("No corrections needed.");
    } else {
        println!("Corrections:");
        for correction in &report.corrections {
            println!(
                "  {} -> {} ({}, confidence {:.2})",
                correction.original, correction.corrected, correction.kind, correction.confidence
            );
        }
    }

    let with_candidates: Vec<_> = report
        .issues
        .iter()
        .filter(|i| !i.candidates.is_empty())
        .collect();
    if !with_candidates.is_empty() {
        println!("Suggestions:");
        for issue in with_candidates {
            let words: Vec<&str> = issue.candidates.iter().map(|c| c.word.as_str()).collect();
            println!("  {} ({}): {}", issue.word, issue.kind, words.join(", "));
        }
    }
}

fn run_db_action(db: &Path, action: DbAction) -> Result<()> {
    match action {
        DbAction::Init => {
            let store = LexiconStore::open(db)?;
            store.init_schema()?;
            info!("schema created");
            println!("Initialized {}", db.display());
        }
        DbAction::Seed => {
            let store = LexiconStore::bootstrap(db)?;
            let stats = store.stats()?;
            println!(
                "Seeded {} ({} misspellings, {} homophone groups, {} context rules)",
                db.display(),
                stats.misspellings,
                stats.homophone_groups,
                stats.context_patterns
            );
        }
        DbAction::Status => {
            let store = LexiconStore::open(db)?;
            store.init_schema()?;
            let stats = store.stats()?;
            println!("Database: {}", db.display());
            println!("  misspellings:     {}", stats.misspellings);
            println!("  homophone groups: {}", stats.homophone_groups);
            println!("  context rules:    {}", stats.context_patterns);
            println!("  word list:        {}", stats.wordlist_words);
            println!("  checks recorded:  {}", stats.checks);
        }
    }
    Ok(())
}

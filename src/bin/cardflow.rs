//! Cardflow CLI: inspect formatting, search a card library, store documents.
//!
//! Usage:
//!   cardflow render <file> [--json]
//!   cardflow minimize <file> [--size N]
//!   cardflow search --library <file> <query>
//!   cardflow save <name> <file> [--db path]
//!   cardflow list [--db path]

use cardflow::insertion::{template, CandidateSearch};
use cardflow::{
    Document, DocumentId, DocumentRecord, EngineConfig, FormattingData, LibraryProvider, SqliteSink,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cardflow",
    version,
    about = "Text annotation and card insertion engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Engine configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered segments of a document file
    Render {
        /// JSON file with `text` and `formatting`
        file: PathBuf,
        /// Emit segments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Minimize everything outside emphasis and print the resulting formatting
    Minimize {
        /// JSON file with `text` and `formatting`
        file: PathBuf,
        /// Font size for minimized ranges (defaults to the configured size)
        #[arg(long)]
        size: Option<f32>,
    },
    /// Rank a card library against a query and print the top insertion
    Search {
        /// Library file (YAML or JSON) with `cards` and `notes`
        #[arg(long)]
        library: PathBuf,
        /// Search text, as typed after the slash
        #[arg(default_value = "")]
        query: String,
    },
    /// Store a document file under a name
    Save {
        /// Document name
        name: String,
        /// JSON file with `text` and `formatting`
        file: PathBuf,
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List stored documents
    List {
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// On-disk shape of a document passed to the CLI
#[derive(Deserialize)]
struct DocumentFile {
    text: String,
    #[serde(default)]
    formatting: Option<FormattingData>,
}

/// Get the default database path (~/.local/share/cardflow/documents.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("cardflow").join("documents.db")
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    match path {
        Some(path) => EngineConfig::load(path).map_err(|e| format!("Failed to load config: {}", e)),
        None => Ok(EngineConfig::default()),
    }
}

fn load_document(path: &Path, id: DocumentId, config: EngineConfig) -> Result<Document, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let file: DocumentFile = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    let record = DocumentRecord::new(id, file.text, file.formatting.unwrap_or_default());
    Ok(Document::open(record, config))
}

fn open_sink(db: Option<PathBuf>) -> Result<SqliteSink, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    SqliteSink::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))
}

fn cmd_render(config: EngineConfig, file: &Path, json: bool) -> i32 {
    let document = match load_document(file, DocumentId::new(), config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let segments = document.segments();
    if json {
        return match serde_json::to_string_pretty(&segments) {
            Ok(out) => {
                println!("{}", out);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }
    for seg in &segments {
        let classes = seg.style.classes();
        let label = if classes.is_empty() {
            "plain".to_string()
        } else {
            classes.join(" ")
        };
        println!("{:>6}..{:<6} {:<28} {:?}", seg.start, seg.end, label, seg.text);
    }
    0
}

fn cmd_minimize(config: EngineConfig, file: &Path, size: Option<f32>) -> i32 {
    let config = match size {
        Some(size) => config.with_minimize_size(size),
        None => config,
    };
    let mut document = match load_document(file, DocumentId::new(), config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if !document.minimize_non_emphasized() {
        eprintln!("No emphasis ranges; formatting unchanged");
    }
    match serde_json::to_string_pretty(document.formatting()) {
        Ok(out) => {
            println!("{}", out);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_search(config: EngineConfig, library: &Path, query: &str) -> i32 {
    let provider = match LibraryProvider::load(library) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let search = CandidateSearch::new(Arc::new(provider), config.max_results);
    let items = search.run(query).await;
    if items.is_empty() {
        println!("No matches for '{}'.", query);
        return 0;
    }
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, item.kind, item.title);
    }
    println!();
    print!("{}", template::render(&items[0]));
    0
}

async fn cmd_save(config: EngineConfig, name: &str, file: &Path, db: Option<PathBuf>) -> i32 {
    let sink = match open_sink(db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut document = match load_document(file, DocumentId::from_name(name), config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match document.save(&sink).await {
        Ok(()) => {
            println!(
                "Saved '{}' ({}, {} ranges)",
                name,
                document.id(),
                document.formatting().range_count()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_list(db: Option<PathBuf>) -> i32 {
    let sink = match open_sink(db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let records = match sink.list() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if records.is_empty() {
        println!("No documents.");
        return 0;
    }
    for record in &records {
        let preview: String = record.text.chars().take(40).collect();
        println!(
            "  {}  {}  {:>3} ranges  {:?}",
            record.id,
            record.updated_at.format("%Y-%m-%d %H:%M"),
            record.formatting.range_count(),
            preview
        );
    }
    0
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Render { file, json } => cmd_render(config, &file, json),
        Commands::Minimize { file, size } => cmd_minimize(config, &file, size),
        Commands::Search { library, query } => cmd_search(config, &library, &query).await,
        Commands::Save { name, file, db } => cmd_save(config, &name, &file, db).await,
        Commands::List { db } => cmd_list(db),
    };
    std::process::exit(code);
}

//! dq-metadata CLI - serve and inspect AI-ready column metadata context
//!
//! Usage:
//!   dq-metadata serve [--port <port>]
//!   dq-metadata context <app> [--schema <schema>] [--db <file>]
//!   dq-metadata classify <column> <type> [--heuristics <file>]
//!   dq-metadata check-heuristics [--path <file>]
//!   dq-metadata seed <db> <columns.json>
//!
//! Examples:
//!   dq-metadata context billing --schema public
//!   dq-metadata classify created_at timestamp

use clap::{Parser, Subcommand};
use dq_metadata::config::{HeuristicRuleStore, HeuristicRules, Settings};
use dq_metadata::context::ContextSynthesizer;
use dq_metadata::enrichment::EnrichmentEngine;
use dq_metadata::logging::{init_logging, LoggingConfig};
use dq_metadata::metadata::{create_schema, insert_column, ColumnRecord, SqliteMetadataSource};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dq-metadata")]
#[command(about = "dq-metadata - natural-language column metadata context for LLM pipelines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[cfg(feature = "server")]
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the metadata context for one application as JSON
    Context {
        /// Application name
        app: String,

        /// Restrict to one schema
        #[arg(short, long)]
        schema: Option<String>,

        /// SQLite metadata database (defaults to the configured path)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Classify a single column by name and raw type
    Classify {
        /// Column name
        column: String,

        /// Raw database type (e.g. "varchar(255)")
        data_type: String,

        /// Heuristics file (defaults to the configured path)
        #[arg(long)]
        heuristics: Option<PathBuf>,
    },

    /// Validate a heuristics document
    CheckHeuristics {
        /// Heuristics file (defaults to the configured path)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Load column records from a JSON array into a SQLite metadata database
    Seed {
        /// SQLite database file (created if missing)
        db: PathBuf,

        /// JSON file containing an array of column records
        columns: PathBuf,
    },
}

impl Commands {
    /// Whether the command reads the service configuration.
    ///
    /// Commands given every path on the command line run with defaults, so a
    /// broken config file or environment cannot stop them.
    fn needs_settings(&self) -> bool {
        match self {
            #[cfg(feature = "server")]
            Commands::Serve { .. } => true,
            Commands::Context { .. } => true,
            Commands::Classify { heuristics, .. } => heuristics.is_none(),
            Commands::CheckHeuristics { path } => path.is_none(),
            Commands::Seed { .. } => false,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = if cli.command.needs_settings() {
        match Settings::load() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Settings::default()
    };

    if let Err(e) = init_logging(&LoggingConfig::from_settings(&settings.service)) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve { port } => cmd_serve(settings, port).await,
        Commands::Context { app, schema, db } => cmd_context(settings, app, schema, db).await,
        Commands::Classify {
            column,
            data_type,
            heuristics,
        } => cmd_classify(&settings, &column, &data_type, heuristics),
        Commands::CheckHeuristics { path } => cmd_check_heuristics(&settings, path),
        Commands::Seed { db, columns } => cmd_seed(db, columns),
    }
}

/// Load the rule store, logging and reporting a failure.
fn load_rules(settings: &Settings, path: Option<PathBuf>) -> Option<Arc<HeuristicRules>> {
    let store = match path {
        Some(path) => HeuristicRuleStore::new(path, None),
        None => HeuristicRuleStore::from_settings(&settings.heuristics),
    };
    match store.get_rules() {
        Ok(rules) => Some(rules),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load heuristics");
            eprintln!("Error: {}", e);
            None
        }
    }
}

async fn open_synthesizer(
    settings: &Settings,
    rules: Arc<HeuristicRules>,
    db: Option<PathBuf>,
) -> Result<ContextSynthesizer, String> {
    let path = match db {
        Some(path) => path,
        None => settings.database.resolved_path().map_err(|e| e.to_string())?,
    };
    let source = SqliteMetadataSource::open(&path, settings.database.pool_size)
        .await
        .map_err(|e| e.to_string())?;
    Ok(ContextSynthesizer::new(
        Arc::new(source),
        EnrichmentEngine::new(rules),
    ))
}

#[cfg(feature = "server")]
async fn cmd_serve(mut settings: Settings, port: Option<u16>) -> ExitCode {
    use dq_metadata::web::{serve, AppState};

    tracing::info!(env = %settings.service.env, "Starting dq-metadata service");

    // Fail fast before accepting traffic.
    let Some(rules) = load_rules(&settings, None) else {
        tracing::error!("Failed to initialize service");
        return ExitCode::FAILURE;
    };

    let synthesizer = match open_synthesizer(&settings, rules, None).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize service");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(port) = port {
        settings.server.port = port;
    }
    let state = Arc::new(AppState::new(
        synthesizer,
        settings.service.project_name.clone(),
    ));

    match serve(&settings.server, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_context(
    settings: Settings,
    app: String,
    schema: Option<String>,
    db: Option<PathBuf>,
) -> ExitCode {
    let Some(rules) = load_rules(&settings, None) else {
        return ExitCode::FAILURE;
    };

    let synthesizer = match open_synthesizer(&settings, rules, db).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let context = match synthesizer.build_app_context(&app, schema.as_deref()).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&context) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing context: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_classify(
    settings: &Settings,
    column: &str,
    data_type: &str,
    heuristics: Option<PathBuf>,
) -> ExitCode {
    let Some(rules) = load_rules(settings, heuristics) else {
        return ExitCode::FAILURE;
    };

    let engine = EnrichmentEngine::new(rules);
    let result = engine.classify(column, data_type);

    println!("Column:          {}", result.column_name);
    println!("Raw type:        {}", result.data_type);
    println!("Normalized type: {}", result.normalized_type);
    println!(
        "Sensitivity:     {}",
        result.sensitivity.map(|s| s.as_str()).unwrap_or("-")
    );
    println!("Candidate key:   {}", result.is_candidate_key);
    println!("Temporal:        {}", result.is_temporal);
    println!("Semantic role:   {}", result.semantic_role);
    ExitCode::SUCCESS
}

fn cmd_check_heuristics(settings: &Settings, path: Option<PathBuf>) -> ExitCode {
    let Some(rules) = load_rules(settings, path) else {
        return ExitCode::FAILURE;
    };

    println!("✓ Heuristics are valid");
    println!("  PII keywords:           {}", rules.pii_keywords.len());
    println!("  Candidate key patterns: {}", rules.candidate_key_patterns.len());
    println!("  Temporal patterns:      {}", rules.temporal_patterns.len());
    println!(
        "  Cardinality thresholds: low={} high={}",
        rules.low_cardinality_threshold, rules.high_cardinality_threshold
    );
    ExitCode::SUCCESS
}

fn cmd_seed(db: PathBuf, columns: PathBuf) -> ExitCode {
    let content = match fs::read_to_string(&columns) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", columns.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let records: Vec<ColumnRecord> = match serde_json::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing '{}': {}", columns.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = rusqlite::Connection::open(&db).and_then(|mut conn| {
        create_schema(&conn)?;
        let tx = conn.transaction()?;
        for record in &records {
            insert_column(&tx, record)?;
        }
        tx.commit()
    });

    match result {
        Ok(()) => {
            println!("Seeded {} columns into {}", records.len(), db.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error seeding '{}': {}", db.display(), e);
            ExitCode::FAILURE
        }
    }
}

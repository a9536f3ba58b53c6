use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use folio::config::{load_config, FolioConfig};
use folio::resolver::Resolver;
use folio::web::{router, AppState};

/// Web front end for a precomputed mathematical reference database.
#[derive(Parser)]
#[command(name = "folio", about = "Serve a precomputed mathematical reference database")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Path to the reference store SQLite file
        #[arg(short, long)]
        database: Option<PathBuf>,
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print store statistics
    Status {
        /// Path to the reference store SQLite file
        #[arg(short, long)]
        database: Option<PathBuf>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> folio::errors::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FolioConfig::default(),
    };

    match cli.command {
        Commands::Serve { database, bind } => {
            let db_path = database.unwrap_or_else(|| PathBuf::from(&config.database));
            let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());

            let resolver = Resolver::open(&db_path)?;
            let stats = resolver.stats()?;
            tracing::info!(
                tags = stats.tag_count,
                chapters = stats.chapter_count,
                db = %db_path.display(),
                "opened reference store"
            );

            let state = Arc::new(AppState {
                resolver,
                site_title: config.site_title.clone(),
            });

            serve(router(state), &bind_addr)?;
        }
        Commands::Status { database, json } => {
            let db_path = database.unwrap_or_else(|| PathBuf::from(&config.database));
            let resolver = Resolver::open(&db_path)?;
            let stats = resolver.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Reference store at {}", db_path.display());
                println!("  Tags:     {}", stats.tag_count);
                println!("  Chapters: {}", stats.chapter_count);
                println!("  Proofs:   {}", stats.proof_count);
                println!("  DB size:  {} bytes", stats.db_size_bytes);
            }
        }
    }
    Ok(())
}

fn serve(app: axum::Router, bind_addr: &str) -> folio::errors::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!(addr = %bind_addr, "listening");
        axum::serve(listener, app).await?;
        Ok(())
    })
}

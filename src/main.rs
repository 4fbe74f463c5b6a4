//! paperscope - Research Papers Explorer
//!
//! Loads a pre-cleaned research-paper metadata CSV and exposes the derived
//! dashboard views: sample rows, per-year counts, top journals, title word
//! frequencies, and the source distribution.
//!
//! ## Usage
//!
//! ### CLI Mode
//! ```bash
//! paperscope report metadata_cleaned.csv --year 2021 --output ./views
//! ```
//!
//! ### HTTP Server Mode
//! ```bash
//! paperscope serve --data metadata_cleaned.csv --port 3000
//! ```

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use clap::{Parser, Subcommand};
use paperscope::aggregate::{self, LabelCount, YearCount};
use paperscope::dataset::{Dataset, PaperRecord};
use paperscope::titles;
use paperscope::views::{self, DashboardView, ViewOptions};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Research Papers Explorer - Dataset Aggregation Microservice
#[derive(Parser)]
#[command(name = "paperscope")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard views for a dataset, optionally exporting CSVs
    Report {
        /// Path to the metadata CSV
        data: PathBuf,

        /// Year to filter on (default: newest year in the dataset)
        #[arg(long)]
        year: Option<i32>,

        /// Rows in the random sample
        #[arg(long, default_value = "5")]
        sample: usize,

        /// Journals shown in the top-journals view
        #[arg(long, default_value = "10")]
        top_journals: usize,

        /// Words shown in the title word-frequency view
        #[arg(long, default_value = "25")]
        top_words: usize,

        /// Directory to write the derived views as CSV files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run as HTTP server exposing the views as JSON
    Serve {
        /// Path to the metadata CSV
        #[arg(long)]
        data: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Report {
            data,
            year,
            sample,
            top_journals,
            top_words,
            output,
        } => run_report(data, year, sample, top_journals, top_words, output),
        Commands::Serve { data, port, host } => run_server(data, host, port).await,
    }
}

// ============================================================================
// Report Mode
// ============================================================================

fn run_report(
    data: PathBuf,
    year: Option<i32>,
    sample: usize,
    top_journals: usize,
    top_words: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let dataset = Dataset::load(&data)
        .with_context(|| format!("Failed to load dataset: {}", data.display()))?;

    let mut opts = ViewOptions {
        sample_size: sample,
        top_journals,
        top_words,
    };
    if opts.sample_size > dataset.len() {
        warn!(
            requested = opts.sample_size,
            available = dataset.len(),
            "Sample larger than dataset, clamping"
        );
        opts.sample_size = dataset.len();
    }

    let view = views::build(&dataset, year, &opts)?;

    println!("Papers loaded: {}", view.total_papers);
    if view.records_without_year > 0 {
        println!("Without a parseable year: {}", view.records_without_year);
    }
    if let (Some(min), Some(max)) = (view.year_min, view.year_max) {
        println!("Year range: {} - {}", min, max);
    }
    if let Some(selected) = view.selected_year {
        println!(
            "Number of papers in {}: {}",
            selected, view.papers_in_selected_year
        );
    }

    println!("\n--- Sample of the Dataset ---");
    for record in &view.sample {
        println!(
            "{} | {} | {}",
            record.title.as_deref().unwrap_or("(untitled)"),
            record.journal.as_deref().unwrap_or("-"),
            record
                .publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    println!("\n--- Publications Over Time ---");
    for entry in &view.papers_per_year {
        println!("{}: {}", entry.year, entry.count);
    }

    println!("\n--- Top {} Journals ---", opts.top_journals);
    for entry in &view.top_journals {
        println!("{}: {}", entry.label, entry.count);
    }

    println!("\n--- Title Words ---");
    for entry in &view.title_words {
        println!("{}: {}", entry.label, entry.count);
    }

    println!("\n--- Distribution by Source ---");
    for entry in &view.papers_by_source {
        println!("{}: {}", entry.label, entry.count);
    }

    if let Some(dir) = output {
        std::fs::create_dir_all(&dir).context("Failed to create output directory")?;
        save_csv(&dir.join("sample.csv"), &view.sample)?;
        save_csv(&dir.join("papers_per_year.csv"), &view.papers_per_year)?;
        save_csv(&dir.join("top_journals.csv"), &view.top_journals)?;
        save_csv(&dir.join("title_words.csv"), &view.title_words)?;
        save_csv(&dir.join("source_counts.csv"), &view.papers_by_source)?;
    }

    Ok(())
}

/// Save rows to a CSV file
fn save_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if rows.is_empty() {
        println!("No data to save to {:?}", path);
        return Ok(());
    }

    let mut wtr = csv::Writer::from_path(path).context("Failed to create CSV writer")?;
    for row in rows {
        wtr.serialize(row).context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV")?;
    println!("Saved: {:?}", path);
    Ok(())
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn run_server(data: PathBuf, host: String, port: u16) -> Result<()> {
    let dataset = Dataset::load(&data)
        .with_context(|| format!("Failed to load dataset: {}", data.display()))?;
    info!(rows = dataset.len(), "Dataset ready");

    // Loaded once, shared read-only for the lifetime of the server
    let app_state = Arc::new(AppState { dataset });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/summary", get(summary_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/papers", get(papers_handler))
        .route("/years", get(years_handler))
        .route("/journals", get(journals_handler))
        .route("/sources", get(sources_handler))
        .route("/words", get(words_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

struct AppState {
    dataset: Dataset,
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Dataset summary
#[derive(Debug, Serialize)]
struct SummaryResponse {
    total_papers: usize,
    year_min: Option<i32>,
    year_max: Option<i32>,
    records_without_year: usize,
    sources: usize,
}

async fn summary_handler(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let records = state.dataset.records();
    let range = state.dataset.year_range();
    Json(SummaryResponse {
        total_papers: records.len(),
        year_min: range.map(|(min, _)| min),
        year_max: range.map(|(_, max)| max),
        records_without_year: state.dataset.missing_year_count(),
        sources: aggregate::count_by_source(records).len(),
    })
}

/// Dashboard query parameters
#[derive(Debug, Deserialize)]
struct DashboardParams {
    year: Option<i32>,
    #[serde(default = "default_sample")]
    sample: usize,
    #[serde(default = "default_top_journals")]
    top_journals: usize,
    #[serde(default = "default_top_words")]
    top_words: usize,
}

fn default_sample() -> usize {
    5
}

fn default_top_journals() -> usize {
    10
}

fn default_top_words() -> usize {
    25
}

/// Dashboard response
#[derive(Serialize)]
struct DashboardResponse {
    status: String,
    view: Option<DashboardView>,
}

/// Full dashboard view, recomputed from the in-memory table per request
async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardResponse> {
    let opts = ViewOptions {
        sample_size: params.sample,
        top_journals: params.top_journals,
        top_words: params.top_words,
    };

    match views::build(&state.dataset, params.year, &opts) {
        Ok(view) => Json(DashboardResponse {
            status: "success".to_string(),
            view: Some(view),
        }),
        Err(e) => {
            error!(error = %e, "Dashboard build failed");
            Json(DashboardResponse {
                status: format!("error: {}", e),
                view: None,
            })
        }
    }
}

/// Year-filter query parameters
#[derive(Debug, Deserialize)]
struct PapersParams {
    year: i32,
}

/// Year-filtered papers response
#[derive(Serialize)]
struct PapersResponse {
    status: String,
    count: usize,
    papers: Vec<PaperRecord>,
}

/// Papers published in one year (the year-selector subset)
async fn papers_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PapersParams>,
) -> Json<PapersResponse> {
    let papers: Vec<PaperRecord> = aggregate::filter_by_year(state.dataset.records(), params.year)
        .into_iter()
        .cloned()
        .collect();

    Json(PapersResponse {
        status: "success".to_string(),
        count: papers.len(),
        papers,
    })
}

/// Publications-over-time series
async fn years_handler(State(state): State<Arc<AppState>>) -> Json<Vec<YearCount>> {
    Json(aggregate::count_by_year(state.dataset.records()))
}

/// Top-N query parameters
#[derive(Debug, Deserialize)]
struct TopParams {
    #[serde(default = "default_top_journals")]
    top: usize,
}

/// Top journals by paper count
async fn journals_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopParams>,
) -> Json<Vec<LabelCount>> {
    Json(aggregate::top_journals(state.dataset.records(), params.top))
}

/// Paper counts per source
async fn sources_handler(State(state): State<Arc<AppState>>) -> Json<Vec<LabelCount>> {
    Json(aggregate::count_by_source(state.dataset.records()))
}

/// Word-frequency query parameters
#[derive(Debug, Deserialize)]
struct WordsParams {
    #[serde(default = "default_top_words")]
    top: usize,
}

/// Word-frequency response
#[derive(Serialize)]
struct WordsResponse {
    status: String,
    words: Vec<LabelCount>,
}

/// Title word frequencies (the word-cloud input)
async fn words_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WordsParams>,
) -> Json<WordsResponse> {
    match titles::word_frequencies(state.dataset.records(), params.top) {
        Ok(words) => Json(WordsResponse {
            status: "success".to_string(),
            words,
        }),
        Err(e) => {
            error!(error = %e, "Word frequency computation failed");
            Json(WordsResponse {
                status: format!("error: {}", e),
                words: Vec::new(),
            })
        }
    }
}

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use clap::Parser;
use http::{HeaderValue, StatusCode, header};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use common::config::{AnalyzerConfig, BackendConfig, Config};
use crate::{
    error::ProcessingError,
    export::{self, ExportView, RowFilter},
    importer::CleaningReport,
    processor::{Analysis, ReviewProcessor},
    scorers::Scorer,
    summary::Summary,
};

pub const DEFAULT_CONFIG_PATH: &str = "target/debug/config/total_config.yaml";

/// Command line arguments that at least point at a config file.
pub trait ExecutableArgs: Parser {
    fn config_path(&self) -> &str;
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

impl ExecutableArgs for Args {
    fn config_path(&self) -> &str {
        &self.config
    }
}

pub fn initialize_executable<A: ExecutableArgs>() -> Result<(A, Config), Box<dyn Error + Send + Sync>> {
    match std::env::current_dir() {
        Ok(dir) => println!("Current directory: {:?}", dir),
        Err(e) => eprintln!("Failed to get current directory: {}", e),
    }

    let args = A::parse();
    println!("Loading config from: {}", args.config_path());
    let config = Config::load(args.config_path())?;
    println!("Loaded config: {:#?}", config);

    Ok((args, config))
}

/// `RUST_LOG` wins over the configured level when set.
pub fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Tracing already initialized: {}", e);
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

#[derive(Debug, Clone)]
pub struct AnalyzerRun {
    pub analysis: Analysis,
    pub output_path: PathBuf,
    pub rows_written: usize,
}

/// Analyzes one CSV file and writes the selected rows next to the other reports.
pub fn run_analyzer<S: Scorer>(
    config: &AnalyzerConfig,
    processor: &ReviewProcessor<S>,
    input: &Path,
    view: ExportView,
    filter: RowFilter,
) -> Result<AnalyzerRun, Box<dyn Error + Send + Sync>> {
    tracing::info!("Analyzing reviews from {}", input.display());
    let file = fs::File::open(input)
        .map_err(|e| format!("Failed to open {}: {}", input.display(), e))?;
    let analysis = processor.analyze(std::io::BufReader::new(file))?;

    let file_name = match filter {
        RowFilter::Fake => config.fake_reviews_file_name.as_str(),
        RowFilter::All => filter.default_file_name(),
    };
    fs::create_dir_all(&config.output_dir)?;
    let output_path = Path::new(&config.output_dir).join(file_name);
    let output = fs::File::create(&output_path)
        .map_err(|e| format!("Failed to create {}: {}", output_path.display(), e))?;
    let rows_written = export::write_csv(output, &analysis.dataset, view, filter)?;

    tracing::info!(
        rows = rows_written,
        view = %view,
        rows_filter = %filter,
        "Wrote {}",
        output_path.display()
    );

    Ok(AnalyzerRun {
        analysis,
        output_path,
        rows_written,
    })
}

// =============================================================================
// BACKEND
// =============================================================================

pub struct AppState<S: Scorer + 'static> {
    processor: Arc<ReviewProcessor<S>>,
    metrics: Option<PrometheusHandle>,
}

// Manual impl, the scorer itself does not need to be Clone.
impl<S: Scorer + 'static> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S: Scorer + 'static> AppState<S> {
    pub fn new(processor: Arc<ReviewProcessor<S>>, metrics: Option<PrometheusHandle>) -> Self {
        Self { processor, metrics }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analyzed_at: DateTime<Utc>,
    pub message: String,
    pub cleaning: CleaningReport,
    pub summary: Summary,
    pub reviews: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExportQuery {
    #[serde(default)]
    pub view: ExportView,
    #[serde(default)]
    pub rows: RowFilter,
}

pub fn create_router<S: Scorer + 'static>(state: AppState<S>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/reviews/analyze", post(analyze_reviews::<S>))
        .route("/api/reviews/export", post(export_reviews::<S>))
        .route("/metrics", get(render_metrics::<S>))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn run_backend<S: Scorer + 'static>(
    config: BackendConfig,
    processor: Arc<ReviewProcessor<S>>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let metrics = PrometheusBuilder::new().install_recorder()?;
    let allowed_origin = config.allowed_origin.parse::<HeaderValue>()?;

    let app = create_router(AppState::new(processor, Some(metrics)), config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    tracing::info!("Starting review backend at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn analyze_reviews<S: Scorer + 'static>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Response {
    let analysis = match run_analysis(&state, body).await {
        Ok(analysis) => analysis,
        Err(response) => return response,
    };

    let response = AnalyzeResponse {
        analyzed_at: analysis.analyzed_at,
        message: analysis.cleaning.message(),
        cleaning: analysis.cleaning,
        reviews: export::to_json_rows(&analysis.dataset, ExportView::Display, RowFilter::All),
        summary: analysis.summary,
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn export_reviews<S: Scorer + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<ExportQuery>,
    body: Bytes,
) -> Response {
    let analysis = match run_analysis(&state, body).await {
        Ok(analysis) => analysis,
        Err(response) => return response,
    };

    match export::to_csv_string(&analysis.dataset, query.view, query.rows) {
        Ok(csv) => {
            let disposition = format!("attachment; filename=\"{}\"", query.rows.default_file_name());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn render_metrics<S: Scorer + 'static>(State(state): State<AppState<S>>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}

// CSV parsing and scoring are CPU bound, keep them off the async workers.
async fn run_analysis<S: Scorer + 'static>(
    state: &AppState<S>,
    body: Bytes,
) -> Result<Analysis, Response> {
    let processor = Arc::clone(&state.processor);
    let result = tokio::task::spawn_blocking(move || processor.analyze(&body[..]))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Analysis task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        })?;

    result.map_err(error_response)
}

pub fn error_response(error: ProcessingError) -> Response {
    let status = match &error {
        ProcessingError::MissingColumn { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &error {
        ProcessingError::MissingColumn { .. } => error.to_string(),
        _ => format!("An error occurred while processing the file: {}", error),
    };

    tracing::warn!(error = %error, status = %status, "Review analysis failed");
    (status, Json(json!({ "error": message }))).into_response()
}

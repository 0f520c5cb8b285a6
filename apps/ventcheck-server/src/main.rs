//! Ventcheck Server
//!
//! Attic ventilation compliance for roofing estimates. Checks intake and
//! exhaust net free area against the 1:150 code requirement and renders a
//! downloadable scorecard. Provides REST API endpoints for:
//!
//! - Vent catalog listing
//! - Compliance calculation
//! - Scorecard PDF rendering
//!
//! The same scorecard can be rendered offline with the `report` subcommand.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compliance_engine::{ComplianceCalculator, UnknownVentPolicy, VentCatalog};

mod api;
mod error;
mod extract;

use api::{build_scorecard, routes, with_middleware, ReportRequest};

/// Command-line arguments for the ventcheck server
#[derive(Parser, Debug)]
#[command(name = "ventcheck-server")]
#[command(about = "Attic ventilation compliance API and scorecard renderer")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "VENTCHECK_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "VENTCHECK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "VENTCHECK_RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Vent catalog JSON to use instead of the built-in one
    #[arg(long, env = "VENTCHECK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Reject vent types missing from the catalog instead of counting them as zero
    #[arg(long, env = "VENTCHECK_STRICT_CATALOG")]
    strict_catalog: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Render a scorecard PDF from a JSON report request
    Report {
        /// Request file: {"squareFootage": .., "current": [..], "proposed": [..]}
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the PDF
        #[arg(short, long, default_value = scorecard_pdf::DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<ComplianceCalculator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let calculator = build_calculator(args.catalog.as_deref(), args.strict_catalog)?;

    match &args.command {
        Some(Command::Report { input, output }) => render_report(&calculator, input, output),
        Some(Command::Serve) | None => serve(&args, calculator).await,
    }
}

fn build_calculator(
    catalog_path: Option<&Path>,
    strict: bool,
) -> anyhow::Result<ComplianceCalculator> {
    let catalog = match catalog_path {
        Some(path) => VentCatalog::from_path(path)
            .with_context(|| format!("loading vent catalog {}", path.display()))?,
        None => VentCatalog::standard(),
    };
    info!("Vent catalog: {} vent types", catalog.len());

    let policy = if strict {
        UnknownVentPolicy::Reject
    } else {
        UnknownVentPolicy::Ignore
    };

    Ok(ComplianceCalculator::new(catalog).with_unknown_vent_policy(policy))
}

async fn serve(args: &Args, calculator: ComplianceCalculator) -> anyhow::Result<()> {
    info!("Starting ventcheck server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow!("rate limit must be at least 1 request per second"))?,
    );

    // Create shared state
    let state = AppState {
        calculator: Arc::new(calculator),
    };

    // Build router and apply middleware
    let app = with_middleware(routes(state).layer(GovernorLayer {
        config: governor_conf,
    }));

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    if args.strict_catalog {
        info!("Strict catalog: unknown vent types are rejected");
    }

    // Peer addresses are needed by the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn render_report(
    calculator: &ComplianceCalculator,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading report request {}", input.display()))?;
    let request: ReportRequest = serde_json::from_str(&json)
        .with_context(|| format!("parsing report request {}", input.display()))?;

    let today = chrono::Local::now().date_naive();
    let scorecard = build_scorecard(calculator, request, Some(today))?;
    scorecard_pdf::save(&scorecard, output)
        .with_context(|| format!("writing scorecard {}", output.display()))?;

    info!(
        "Wrote scorecard to {} (current compliant: {}, proposed compliant: {})",
        output.display(),
        scorecard.current.result.is_compliant(),
        scorecard.proposed.result.is_compliant()
    );

    Ok(())
}

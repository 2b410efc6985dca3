use anyhow::Context;
use casex_api::RestApi;
use casex_core::Catalog;
use casex_storage::{CaseFile, CaseSession, RecordCodec, RefreshPolicy, SessionOptions};
use clap::Parser;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Case-based reasoning server: ranks recorded cases by weighted similarity
#[derive(Parser, Debug)]
#[command(name = "casex")]
#[command(about = "A case-based reasoning engine", long_about = None)]
struct Args {
    /// Path to the case file (one delimited record per line)
    #[arg(short, long, default_value = "./data/cases.txt")]
    data_file: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 3001)]
    http_port: u16,

    /// JSON catalog replacing the built-in attribute catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Field delimiter of the case file
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// Only reload the case file on POST /cases/refresh instead of before every query
    #[arg(long)]
    manual_refresh: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting CaseX v{}", env!("CARGO_PKG_VERSION"));
    info!("Case file: {:?}", args.data_file);
    info!("HTTP API port: {}", args.http_port);

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::spondyloarthritis(),
    };
    info!("Catalog: {} attributes", catalog.attributes().len());

    let options = SessionOptions {
        refresh: if args.manual_refresh {
            RefreshPolicy::Manual
        } else {
            RefreshPolicy::BeforeEachQuery
        },
        codec: RecordCodec::new(args.delimiter),
    };

    let store = Arc::new(CaseFile::open(&args.data_file)?);
    let session = CaseSession::load_with(store, Arc::new(catalog), options)
        .context("loading case base")?;
    let session = Arc::new(Mutex::new(session));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(session, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("CaseX started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

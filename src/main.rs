use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkframe::api;
use inkframe::models::{AppConfig, DisplaySpec};
use inkframe::server;
use inkframe::services::ImagePipeline;

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Photo frame server for 7-color ACeP e-paper displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a photo to the panel wire format and write it to a file
    Convert {
        /// Input photo (any container format the decoder supports)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the wire-format text
        #[arg(short, long)]
        output: PathBuf,

        /// Display name used in log output (defaults to the input file name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkframe API",
        description = "Photo frame server for 7-color ACeP e-paper displays",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload,
        api::handle_image_data,
        api::handle_status,
        api::handle_wakeup,
        api::handle_clear,
        api::handle_sync,
    ),
    components(schemas(
        api::UploadRequest,
        api::UploadResponse,
        api::StatusResponse,
        api::WakeupResponse,
        api::ClearResponse,
        api::SyncResponse,
    )),
    tags(
        (name = "Images", description = "Image upload and registry management"),
        (name = "Device", description = "Endpoints polled by the e-paper device")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Convert {
            input,
            output,
            name,
        }) => run_convert_command(&input, &output, name),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert a photo to the wire format directly (no server needed)
fn run_convert_command(
    input: &PathBuf,
    output: &PathBuf,
    name: Option<String>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let name = name.unwrap_or_else(|| {
        input
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    });

    let bytes = std::fs::read(input)?;
    let pipeline = ImagePipeline::new(DisplaySpec::ACEP_5_65);
    let pending = pipeline
        .process(&bytes, name)
        .map_err(|e| anyhow::anyhow!("Conversion error: {e}"))?;

    std::fs::write(output, &pending.data)?;
    println!(
        "Converted {} -> {} ({} pixel codes)",
        input.display(),
        output.display(),
        pending.codes.len()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let album_configured = ["GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET", "GOOGLE_REFRESH_TOKEN", "GOOGLE_ALBUM_ID"]
        .iter()
        .all(|var| std::env::var(var).is_ok());

    println!("Inkframe v{VERSION}");
    println!("Photo frame server for 7-color ACeP e-paper displays\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR          = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  GOOGLE_*           = {}",
        if album_configured {
            "configured (album sync active)"
        } else {
            "(not set, album sync inactive)"
        }
    );
    println!(
        "  DAY_START_HOUR     = {}",
        std::env::var("DAY_START_HOUR").as_deref().unwrap_or("8 (default)")
    );
    println!(
        "  DAY_END_HOUR       = {}",
        std::env::var("DAY_END_HOUR").as_deref().unwrap_or("20 (default)")
    );
    println!(
        "  DAY_INTERVAL_SECS  = {}",
        std::env::var("DAY_INTERVAL_SECS").as_deref().unwrap_or("3600 (default)")
    );

    println!("\nPanel: {}x{} 7-color ACeP", DisplaySpec::ACEP_5_65.width, DisplaySpec::ACEP_5_65.height);

    println!("\nCommands:");
    println!("  inkframe serve     Start the HTTP server");
    println!("  inkframe convert   Convert a photo to the panel wire format");
    println!("\nRun 'inkframe --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AppConfig::from_env());
    let bind_addr = config.bind_addr.clone();

    // Create application state using shared server module
    let state = server::create_app_state(config.clone());

    // Background album sync: one pass at startup, then on an interval
    if let Some(album_sync) = state.album_sync.clone() {
        let pipeline = state.pipeline.clone();
        let registry = state.registry.clone();
        let interval_secs = config.sync_interval_secs;
        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
            loop {
                ticker.tick().await;
                match album_sync.run_once(&pipeline, registry.as_ref()).await {
                    Ok(count) if count > 0 => {
                        tracing::info!(photos = count, "Album sync stored new photos");
                    }
                    Ok(_) => {
                        tracing::debug!("Album sync found nothing new");
                    }
                    Err(e) => {
                        tracing::warn!(%e, "Album sync pass failed");
                    }
                }
            }
        });
    }

    // Build router: shared API routes plus OpenAPI documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Inkframe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

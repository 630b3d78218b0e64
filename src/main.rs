use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use folio::api;
use folio::assets::{Asset, AssetLoader, AssetSource};
use folio::models::{AppConfig, PageMetadata};
use folio::server;
use folio::services::{
    tag_pages, ContentIndex, DecodeLimits, FileImageSource, GrayscaleService, HttpImageSource,
    ImageSource,
};
use pixel_filter::Rect;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - tag listings and a canvas grayscale demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print one page of a tag listing as JSON
    Page {
        /// Tag slug, optionally percent-encoded
        tag: String,

        /// 1-based page number
        page: String,
    },
    /// Print tag counts, or the static route parameters with --params
    Tags {
        #[arg(long)]
        params: bool,
    },
    /// Grayscale an image into a PNG file
    #[command(group(ArgGroup::new("input").required(true).args(["url", "file"])))]
    Gray {
        /// Image URL (http or https)
        #[arg(long)]
        url: Option<String>,

        /// Local image file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Region as x,y,w,h (default: whole image)
        #[arg(long, value_parser = parse_rect)]
        rect: Option<Rect>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract blog content (posts.yaml, tag-data.json)
        #[arg(long)]
        content: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        description = "Tag-filtered blog listings and a canvas grayscale demo",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_tag_page,
        api::handle_tag_metadata,
        api::handle_tag_counts,
        api::handle_tag_params,
        api::handle_gray,
    ),
    components(schemas(api::TagPageResponse, api::TagParamsResponse, PageMetadata)),
    tags(
        (name = "Blog", description = "Tag listings and page metadata"),
        (name = "Canvas", description = "Image filter demo")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Page { tag, page }) => run_page_command(&tag, &page),
        Some(Commands::Tags { params }) => run_tags_command(params),
        Some(Commands::Gray {
            url,
            file,
            output,
            rect,
        }) => run_gray_command(url, file, &output, rect).await,
        Some(Commands::Init {
            content,
            config,
            all,
            force,
            list,
        }) => run_init_command(content, config, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Parse `x,y,w,h`.
fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,w,h, got '{s}'"));
    };
    let origin = |v: &str| v.parse::<i64>().map_err(|e| format!("'{v}': {e}"));
    let size = |v: &str| v.parse::<u32>().map_err(|e| format!("'{v}': {e}"));
    Ok(Rect::new(origin(*x)?, origin(*y)?, size(*w)?, size(*h)?))
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Asset loader from env vars, seeding configured paths that are empty
fn load_assets() -> Arc<AssetLoader> {
    let asset_loader = Arc::new(AssetLoader::from_env());
    match asset_loader.seed_if_configured() {
        Ok(seeded) if !seeded.is_empty() => {
            tracing::info!(count = seeded.len(), "Seeded missing paths with embedded assets");
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }
    asset_loader
}

/// Resolve a tag page without a server
fn run_page_command(tag: &str, page: &str) -> anyhow::Result<()> {
    init_cli_tracing();

    let asset_loader = load_assets();
    let config = AppConfig::load_from_assets(&asset_loader);
    let index = ContentIndex::load(&asset_loader)?;

    let tag = tag_pages::parse_route_tag(tag)?;
    let page = tag_pages::parse_page_number(page)?;
    let resolved = tag_pages::resolve_page(&tag, page, index.posts(), &config.blog)?;

    let response = api::TagPageResponse {
        page: resolved,
        metadata: PageMetadata::for_tag(&config.site, tag.as_str()),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn run_tags_command(params: bool) -> anyhow::Result<()> {
    init_cli_tracing();

    let asset_loader = load_assets();
    let index = ContentIndex::load(&asset_loader)?;

    let json = if params {
        let config = AppConfig::load_from_assets(&asset_loader);
        serde_json::to_string_pretty(&api::TagParamsResponse {
            tags: index.static_tag_params(),
            pages: index.static_page_params(config.blog.posts_per_page),
        })?
    } else {
        serde_json::to_string_pretty(index.tag_counts())?
    };
    println!("{json}");

    Ok(())
}

/// Grayscale an image to a PNG file (no server needed)
async fn run_gray_command(
    url: Option<String>,
    file: Option<PathBuf>,
    output: &Path,
    rect: Option<Rect>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let asset_loader = load_assets();
    let config = AppConfig::load_from_assets(&asset_loader);

    let (source, target): (Arc<dyn ImageSource>, String) = match (url, file) {
        (Some(url), _) => {
            let source = HttpImageSource::new(&config.gray)?;
            (Arc::new(source) as Arc<dyn ImageSource>, url)
        }
        (None, Some(file)) => {
            let name = file
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Not a file: {}", file.display()))?
                .to_string_lossy()
                .into_owned();
            let root = file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            let limits = DecodeLimits::from(&config.gray);
            let source = FileImageSource::new(root, limits);
            (Arc::new(source) as Arc<dyn ImageSource>, name)
        }
        (None, None) => anyhow::bail!("Either --url or --file is required"),
    };

    let service = GrayscaleService::new(source, None);
    let png_bytes = service.render_png(&target, rect).await?;

    std::fs::write(output, &png_bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    content: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for asset in Asset::ALL {
            println!("  {}", asset.default_path());
        }
        return Ok(());
    }

    let mut assets = Vec::new();
    if all || content {
        assets.extend(Asset::CONTENT);
    }
    if all || config {
        assets.push(Asset::Config);
    }

    if assets.is_empty() {
        eprintln!("No assets specified. Use --all, --content, or --config");
        eprintln!("\nRun 'folio init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&assets, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {}", f.display());
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {}", f.display());
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let content_dir = std::env::var("CONTENT_DIR").ok();

    println!("Folio v{VERSION}");
    println!("Tag listings and a canvas grayscale demo\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CONTENT_DIR = {}",
        content_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let loader = AssetLoader::from_env();
    for asset in Asset::ALL {
        let source = match loader.source(asset) {
            AssetSource::Filesystem(path) => path.display().to_string(),
            AssetSource::Embedded => "embedded".to_string(),
        };
        println!("  {:<14} {source}", asset.file_name());
    }

    println!("\nCommands:");
    println!("  folio serve    Start the HTTP server");
    println!("  folio page     Print a tag page as JSON");
    println!("  folio tags     Print tag counts or route parameters");
    println!("  folio gray     Grayscale an image to a PNG file");
    println!("  folio init     Extract embedded assets");
    println!("\nRun 'folio --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = load_assets();

    for asset in Asset::ALL {
        tracing::info!(asset = %asset, source = ?asset_loader.source(asset), "Asset source");
    }

    let state = server::create_app_state(asset_loader)?;

    // Shared API routes plus production-only docs and static files
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/static", ServeDir::new("./static"));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Folio server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

//! Bucket CMS Server
//!
//! Headless CMS admin API backed by S3-compatible object storage

use anyhow::Context;
use bucket_cms::api::{self, AppState};
use bucket_cms::auth::{AuthMode, AuthPolicy};
use bucket_cms::store::{BucketStore, MemoryStorage, S3Config, S3Storage};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bucket-server")]
#[command(about = "Headless CMS admin API over S3-compatible object storage")]
struct Args {
    /// Bind address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number
    #[arg(short = 'P', long, default_value = "8080")]
    port: u16,

    /// S3 bucket name
    #[arg(long, env = "BUCKET_S3_BUCKET")]
    bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "BUCKET_S3_REGION", default_value = "us-east-1")]
    region: String,

    /// S3 access key id
    #[arg(long, env = "BUCKET_S3_ACCESS_KEY")]
    access_key: Option<String>,

    /// S3 secret access key
    #[arg(long, env = "BUCKET_S3_SECRET_KEY")]
    secret_key: Option<String>,

    /// Custom S3 endpoint (MinIO, R2, ...)
    #[arg(long, env = "BUCKET_S3_ENDPOINT")]
    endpoint: Option<String>,

    /// Allow plain-http S3 endpoints (local development only)
    #[arg(long)]
    allow_http: bool,

    /// Base URL uploaded files are publicly reachable under
    #[arg(long, env = "BUCKET_PUBLIC_URL")]
    public_url: Option<String>,

    /// API bearer token (enables authentication)
    #[arg(long, env = "BUCKET_API_TOKEN")]
    api_token: Option<String>,

    /// Require the token for read routes too, not only writes
    #[arg(long)]
    protect_reads: bool,

    /// Sandbox mode: in-memory storage, open access, nothing persisted
    #[arg(long)]
    sandbox: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting Bucket CMS Server");

    let public_url = args
        .public_url
        .clone()
        .or_else(|| {
            args.bucket.as_ref().map(|bucket| {
                format!("https://s3.{}.amazonaws.com/{}", args.region, bucket)
            })
        })
        .unwrap_or_else(|| format!("http://{}:{}", args.host, args.port));

    let store = if args.sandbox {
        info!("Sandbox mode: in-memory storage, nothing will be persisted");
        BucketStore::new(Arc::new(MemoryStorage::new()), public_url)
    } else {
        let bucket = args
            .bucket
            .clone()
            .context("--bucket (or BUCKET_S3_BUCKET) is required outside sandbox mode")?;

        if args.access_key.is_some() != args.secret_key.is_some() {
            anyhow::bail!("Both --access-key and --secret-key must be provided together");
        }

        let config = S3Config {
            bucket,
            region: args.region.clone(),
            access_key: args.access_key.clone(),
            secret_key: args.secret_key.clone(),
            endpoint: args.endpoint.clone(),
            allow_http: args.allow_http,
        };
        let backend = S3Storage::connect(&config).context("Failed to initialize S3 backend")?;
        BucketStore::new(Arc::new(backend), public_url)
    };

    let auth = match &args.api_token {
        Some(token) => {
            info!("Authentication enabled (bearer token)");
            AuthPolicy::new(AuthMode::Token(token.clone()), args.protect_reads)
        }
        None => {
            info!("Running without authentication (open access)");
            AuthPolicy::open()
        }
    };

    let app = api::router(AppState { store, auth });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!("Server listening on http://{}", local_addr);
    info!("Ready to accept admin API requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down...");
    }
}

//! Content resolution service.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                 CONTENT RESOLVER                      │
//!                       │                                                       │
//!   GET/POST            │  ┌─────────┐    ┌──────────────┐    ┌─────────────┐  │
//!   /api/content/ ──────┼─▶│  http   │───▶│ UrlResolver  │───▶│   cache     │  │
//!   resolve             │  │ server  │    │   (engine)   │    │  (TTL)      │  │
//!                       │  └─────────┘    └──────┬───────┘    └─────────────┘  │
//!                       │                        │  priority order              │
//!                       │                        ▼                              │
//!                       │              ┌───────────────────┐                    │
//!                       │              │ circuit breakers  │                    │
//!                       │              └─────────┬─────────┘                    │
//!                       │          ┌─────────────┴─────────────┐                │
//!                       │          ▼                           ▼                │
//!                       │  ┌───────────────┐           ┌───────────────┐        │
//!                       │  │   commerce    │           │     cms       │        │
//!                       │  │ product/cat/  │           │ article/page  │        │
//!                       │  │   cms_page    │           │               │        │
//!                       │  └───────┬───────┘           └───────┬───────┘        │
//!                       └──────────┼───────────────────────────┼────────────────┘
//!                                  ▼                           ▼
//!                           catalog GraphQL              CMS GraphQL
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use content_resolver::admin;
use content_resolver::config::{load_config, ResolverConfig};
use content_resolver::http::{AppState, HttpServer};
use content_resolver::lifecycle::{build_resolver, signals, Shutdown};
use content_resolver::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "content-resolver")]
#[command(about = "Resolves storefront slugs across commerce and CMS backends", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "content-resolver starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        adapters = config.adapters.len(),
        cache_ttl_secs = config.cache.ttl_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let resolver = Arc::new(build_resolver(&config)?);
    let shutdown = Shutdown::new();

    let admin_task = if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let router = admin::setup_admin_router(
            AppState {
                resolver: resolver.clone(),
            },
            &config.admin.api_key,
        );
        Some(tokio::spawn(admin::serve_admin(
            listener,
            router,
            shutdown.subscribe(),
        )))
    } else {
        None
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, resolver);
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::shutdown_on_signal(&shutdown).await;

    server_task.await??;
    if let Some(task) = admin_task {
        task.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Notes Service
//!
//! Entry point for the note-taking HTTP service.

use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;

use notes_service::{config::AppConfig, server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing (M-LOG-STRUCTURED)
    telemetry::init(config.telemetry.format);

    server::start_server(Arc::new(config)).await
}

//! CLI entry for the HTTP boundary (feature `server`).

use anyhow::{Context, Result};

pub fn main_with_opts(port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build async runtime")?
        .block_on(crate::server::serve(port))
}

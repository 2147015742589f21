//! Kutulu bot binary.
//!
//! Reads the judge protocol on stdin and answers one action line per turn on
//! stdout. Logs go to stderr, and to a file when `KUTULU_LOG_DIR` is set.

use std::io;

use anyhow::Result;
use kutulu_client::{ClientConfig, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::init(config.log_dir.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    kutulu_client::run(stdin.lock(), stdout.lock(), &config)?;
    Ok(())
}

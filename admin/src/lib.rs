//! Operator console for the errand marketplace.
//!
//! Wires the reqwest transport into `errand_core::Services` and runs one
//! command per invocation. All network I/O lives in `transport`; everything
//! else works on store snapshots.

pub mod cli;
pub mod config;
pub mod console;
pub mod logging;
pub mod render;
pub mod transport;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use errand_core::Services;
use tracing::debug;

use crate::cli::Cli;
use crate::transport::ReqwestTransport;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(cli.settings.timeout()).context("building HTTP client")?;
    debug!(api_url = %cli.settings.api_url, "connecting");
    let services = Services::new(&cli.settings.api_url, Arc::new(transport));

    let mut out = Vec::new();
    let result = console::execute(cli.command, &services, &mut out).await;
    io::stdout().lock().write_all(&out).context("writing output")?;
    result
}

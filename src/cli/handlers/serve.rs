//! Serve command handler.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::http;
use crate::infra::JsonFileStore;
use crate::service::NoteService;

pub fn handle_serve(args: &ServeArgs, data_file: &Path, config: &Config) -> Result<()> {
    let host = config.host(args.host.as_ref());
    let port = config.port(args.port);
    info!(data_file = %data_file.display(), "using data file");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let service = NoteService::new(JsonFileStore::new(data_file));
    runtime.block_on(http::serve(&host, port, service))
}

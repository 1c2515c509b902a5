//! notes-api - a REST service for notes persisted in one JSON file

pub mod cli;
pub mod domain;
pub mod http;
pub mod infra;
pub mod logging;
pub mod service;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_completions, handle_edit, handle_list, handle_new, handle_remove, handle_serve,
        handle_show,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json)?;
    let config = Config::load(cli.config.as_deref())?;
    let data_file = config.data_file(cli.data_file.as_ref());

    match &cli.command {
        Command::Serve(args) => handle_serve(args, &data_file, &config),
        Command::List(args) => handle_list(args, &data_file),
        Command::New(args) => handle_new(args, &data_file),
        Command::Show(args) => handle_show(args, &data_file),
        Command::Edit(args) => handle_edit(args, &data_file),
        Command::Remove(args) => handle_remove(args, &data_file),
        Command::Completions(args) => handle_completions(args),
    }
}

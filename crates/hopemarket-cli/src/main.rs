//! Hopemarket CLI - lottery-to-crypto data storytelling dashboard.

mod cli;
mod commands;
mod logging;
mod page;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Serve {
            data_dir,
            port,
            no_open,
        } => commands::serve::run(cli.config, data_dir, port, no_open),

        Commands::Render {
            data_dir,
            output,
            year,
            no_glow,
            markers_only,
        } => commands::render::run(
            cli.config,
            data_dir,
            output,
            year,
            no_glow,
            markers_only,
            cli.verbose,
        ),

        Commands::Export {
            data_dir,
            output_dir,
            only,
        } => commands::export::run(cli.config, data_dir, output_dir, only, cli.verbose),

        Commands::Status { data_dir, json } => commands::status::run(cli.config, data_dir, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

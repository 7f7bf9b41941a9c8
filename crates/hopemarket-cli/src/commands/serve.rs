//! Serve command - run the dashboard web server.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    port: u16,
    no_open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = super::pipeline(config, data_dir)?;
    let data_dir = pipeline.config().data_dir.clone();
    let state = AppState::new(pipeline);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Serving dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data: {}", data_dir.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })
}

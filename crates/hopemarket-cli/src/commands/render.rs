//! Render command - write the dashboard as a standalone HTML file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use hopemarket::{ChartStyle, LineMode, PageParams, SectionBody};

use crate::page::{PageMode, render};

pub fn run(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output: PathBuf,
    year: Option<i64>,
    no_glow: bool,
    markers_only: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = super::pipeline(config, data_dir)?;
    let defaults = pipeline.config().style;

    let params = PageParams {
        year,
        style: ChartStyle {
            glow: defaults.glow && !no_glow,
            line_mode: if markers_only {
                LineMode::Markers
            } else {
                defaults.line_mode
            },
        },
    };

    let mut cache = pipeline.new_cache();
    let dashboard = pipeline.dashboard(&mut cache, &params);

    for section in &dashboard.sections {
        let (marker, note) = match &section.body {
            SectionBody::Chart { .. } => ("ok".green(), None),
            SectionBody::Warning { message } => ("warning".yellow(), Some(message)),
            SectionBody::Error { message } => ("error".red(), Some(message)),
        };
        println!("  {:8} {}", marker, section.title);
        if let (true, Some(note)) = (verbose, note) {
            println!("           {}", note.dimmed());
        }
    }

    fs::write(&output, render(&dashboard, PageMode::Standalone))?;
    println!();
    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}

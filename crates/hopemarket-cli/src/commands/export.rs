//! Export command - write the cleaned CSV files.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use hopemarket::Dataset;

pub fn run(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: PathBuf,
    only: Option<Dataset>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = super::pipeline(config, data_dir)?;
    let mut cache = pipeline.new_cache();

    fs::create_dir_all(&output_dir)?;

    let datasets: Vec<Dataset> = match only {
        Some(dataset) => vec![dataset],
        None => Dataset::ALL.to_vec(),
    };

    let mut written = 0;
    for dataset in datasets {
        match pipeline.export(&mut cache, dataset) {
            Ok(bytes) => {
                let path = output_dir.join(dataset.export_file_name());
                fs::write(&path, &bytes)?;
                written += 1;
                println!(
                    "{} {}",
                    "Wrote".green().bold(),
                    path.display().to_string().white()
                );
                if verbose {
                    println!("  {} bytes", bytes.len());
                }
            }
            Err(e) => {
                println!("{} {}: {}", "Skipped".yellow().bold(), dataset, e);
            }
        }
    }

    if written == 0 {
        return Err("No datasets could be exported. Run 'hopemarket status' to check the data directory.".into());
    }

    Ok(())
}

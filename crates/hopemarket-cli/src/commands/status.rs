//! Status command - show which source files were detected.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = super::pipeline(config, data_dir)?;
    let mut cache = pipeline.new_cache();
    let files = pipeline.file_status(&mut cache);

    if json_output {
        let status = serde_json::json!({
            "data_dir": pipeline.config().data_dir,
            "files": files,
            "ok": files.iter().filter(|f| f.ok).count(),
            "total": files.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Files detected in".cyan().bold(),
        pipeline.config().data_dir.display().to_string().white()
    );
    println!();

    for file in &files {
        let label = if file.ok {
            file.label().green().bold()
        } else {
            file.label().red().bold()
        };
        println!("  {:14} {:34} {}", file.dataset.to_string(), file.file, label);
        if let Some(diagnostic) = &file.diagnostic {
            println!("  {:14} {}", "", diagnostic.dimmed());
        }
    }

    let ok = files.iter().filter(|f| f.ok).count();
    println!();
    if ok == files.len() {
        println!("{}", "All datasets available.".green());
    } else {
        println!(
            "{} {} of {} datasets missing or empty; their sections will show a warning.",
            "Note:".yellow(),
            files.len() - ok,
            files.len()
        );
    }

    Ok(())
}

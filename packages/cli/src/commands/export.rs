use super::load_lesson;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Write the lesson document in the form the lesson store accepts
pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let lesson = load_lesson(cwd)?;
    lesson.validate()?;

    let json = if args.compact {
        serde_json::to_string(&lesson)?
    } else {
        serde_json::to_string_pretty(&lesson)?
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)?;
            println!(
                "{} Exported {} slides to {}",
                "✓".green(),
                lesson.slide_count(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

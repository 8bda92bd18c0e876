use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for cached lessons
    #[arg(short, long, default_value = ".slidecraft")]
    pub cache_dir: String,

    /// Save automatically after this many milliseconds without edits
    #[arg(long)]
    pub autosave_ms: Option<i64>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Slidecraft project...".bright_blue().bold());

    let mut config = Config {
        cache_dir: args.cache_dir.clone(),
        ..Config::default()
    };
    config.editor.autosave_debounce_ms = args.autosave_ms;

    let cache_dir = config.get_cache_dir(cwd);
    if !cache_dir.exists() {
        fs::create_dir_all(&cache_dir)?;
        println!("  {} Created {}/", "✓".green(), args.cache_dir);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: slidecraft new --course-id <id>");
    println!("  2. Run: slidecraft element add text \"Hello\"");
    println!("  3. Run: slidecraft show");

    Ok(())
}

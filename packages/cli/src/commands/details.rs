use super::open_session;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use slidecraft_editor::DetailsPatch;

#[derive(Debug, Args)]
pub struct DetailsArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn details(args: DetailsArgs, cwd: &str) -> Result<()> {
    if args.title.is_none() && args.description.is_none() {
        return Err(anyhow!("Nothing to update, pass --title or --description"));
    }

    let mut session = open_session(cwd)?;
    session.update_details(DetailsPatch {
        title: args.title,
        description: args.description,
    })?;
    session.save()?;

    println!("{} Updated {}", "✓".green(), session.current().title.bright_white());
    Ok(())
}

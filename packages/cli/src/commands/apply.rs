use super::open_session;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use slidecraft_editor::Mutation;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON file with one mutation or a list of them ("-" reads stdin)
    pub input: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Script {
    One(Mutation),
    Many(Vec<Mutation>),
}

impl Script {
    fn into_mutations(self) -> Vec<Mutation> {
        match self {
            Script::One(mutation) => vec![mutation],
            Script::Many(mutations) => mutations,
        }
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Mutation>> {
    let script: Script = serde_json::from_str(json).context("Invalid mutation JSON")?;
    Ok(script.into_mutations())
}

/// Apply every mutation or none of them
pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let json = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Cannot read {}", args.input.display()))?
    };
    let mutations = parse_script(&json)?;

    let mut session = open_session(cwd)?;
    let total = mutations.len();
    for (i, mutation) in mutations.into_iter().enumerate() {
        let name = mutation.name();
        session
            .apply(mutation)
            .with_context(|| format!("Mutation {} of {} ({}) failed, nothing saved", i + 1, total, name))?;
        println!("  {} {}", "✓".green(), name);
    }

    session.save()?;
    println!();
    println!("{} Applied {} mutations", "✅".green(), total);
    Ok(())
}

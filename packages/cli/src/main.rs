mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, details, element, export, init, new, show, slide, stats, ApplyArgs, DetailsArgs,
    ElementCommand, ExportArgs, InitArgs, NewArgs, ShowArgs, SlideCommand, StatsArgs,
};
use tracing_subscriber::EnvFilter;

/// Slidecraft CLI - Author slide-based lessons from the terminal
#[derive(Parser, Debug)]
#[command(name = "slidecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a slidecraft.config.json
    Init(InitArgs),

    /// Start a new lesson, replacing the cached one
    New(NewArgs),

    /// Print the lesson outline
    Show(ShowArgs),

    /// Slide count, progress and estimated duration
    Stats(StatsArgs),

    /// Change the lesson title or description
    Details(DetailsArgs),

    /// Add, remove, move or rename slides
    Slide {
        #[command(subcommand)]
        command: SlideCommand,
    },

    /// Add, update, remove or move elements
    Element {
        #[command(subcommand)]
        command: ElementCommand,
    },

    /// Apply mutations from a JSON file
    Apply(ApplyArgs),

    /// Export the lesson document as JSON
    Export(ExportArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Stats(args) => stats(args, &cwd),
        Command::Details(args) => details(args, &cwd),
        Command::Slide { command } => slide(command, &cwd),
        Command::Element { command } => element(command, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Export(args) => export(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, init, preview, seed, templates, widgets, EditArgs, InitArgs, PreviewArgs, SeedArgs,
    TemplatesArgs, WidgetsArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - seed, render and edit website builder pages
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pagecraft.config.json
    Init(InitArgs),

    /// List website templates
    Templates(TemplatesArgs),

    /// List widget types
    Widgets(WidgetsArgs),

    /// Seed a page from a template and print it
    Seed(SeedArgs),

    /// Print the static preview of a template
    Preview(PreviewArgs),

    /// Replay an edit script on a seeded page and save the result
    Edit(EditArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Templates(args) => templates(args),
        Command::Widgets(args) => widgets(args),
        Command::Seed(args) => seed(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

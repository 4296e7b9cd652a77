mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    countdown, cta, example, export, get, import, init, media, section, set, show, template,
    theme, version, CountdownArgs, CtaArgs, ExampleArgs, ExportArgs, GetArgs, ImportArgs,
    InitArgs, MediaArgs, SectionArgs, SetArgs, ShowArgs, TemplateArgs, ThemeArgs,
    VersionCommand,
};
use config::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesmith CLI - Edit landing page copy from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document store file (defaults to ./pagesmith.store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Directory holding pagesmith.config.json (defaults to current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pagesmith.config.json
    Init(InitArgs),

    /// Print every field, the CTA and section visibility
    Show(ShowArgs),

    /// Print one field's value
    Get(GetArgs),

    /// Set one field's value
    Set(SetArgs),

    /// Load a field's example copy
    Example(ExampleArgs),

    /// Change the call-to-action link or label
    Cta(CtaArgs),

    /// Change the logo or the embedded video
    Media(MediaArgs),

    /// Switch between light and dark mode
    Theme(ThemeArgs),

    /// Show or hide a page section
    Section(SectionArgs),

    /// Import a JSON document
    Import(ImportArgs),

    /// Export the document as JSON
    Export(ExportArgs),

    /// Load starter copy from a template
    Template(TemplateArgs),

    /// Save, list and restore named versions
    Version {
        #[command(subcommand)]
        command: VersionCommand,
    },

    /// Show time left on the scarcity countdown
    Countdown(CountdownArgs),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };
    let ctx = Context::new(&cwd, cli.config_dir, cli.store);

    let result = match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Show(args) => show(args, &ctx),
        Command::Get(args) => get(args, &ctx),
        Command::Set(args) => set(args, &ctx),
        Command::Example(args) => example(args, &ctx),
        Command::Cta(args) => cta(args, &ctx),
        Command::Media(args) => media(args, &ctx),
        Command::Theme(args) => theme(args, &ctx),
        Command::Section(args) => section(args, &ctx),
        Command::Import(args) => import(args, &ctx),
        Command::Export(args) => export(args, &ctx),
        Command::Template(args) => template(args, &ctx),
        Command::Version { command } => version(command, &ctx),
        Command::Countdown(args) => countdown(args, &ctx),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

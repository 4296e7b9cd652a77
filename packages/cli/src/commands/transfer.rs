use crate::config::{finish, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{ImportReport, TEMPLATES};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file to import, or - for stdin
    pub file: String,
}

pub fn import(args: ImportArgs, ctx: &Context) -> Result<()> {
    let json = if args.file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file))?
    };

    let mut session = ctx.open_session()?;
    let report = session.import_json(&json)?;
    finish(&mut session)?;

    print_report("Imported", &report);
    Ok(())
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let json = session.collect().to_json_string_pretty()?;

    match args.out {
        Some(path) => {
            fs::write(&path, json)?;
            println!("  {} Exported to {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template name (saas, agency, ecom)
    pub name: Option<String>,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

pub fn template(args: TemplateArgs, ctx: &Context) -> Result<()> {
    let name = match args.name {
        Some(name) if !args.list => name,
        _ => {
            println!("{}", "Templates".bright_blue().bold());
            for template in TEMPLATES {
                println!(
                    "  {:<8} {}",
                    template.name.bright_white(),
                    template.description.dimmed()
                );
            }
            return Ok(());
        }
    };

    let mut session = ctx.open_session()?;
    let report = session.apply_template(&name)?;
    finish(&mut session)?;

    print_report(&format!("Loaded {} template:", name), &report);
    Ok(())
}

fn print_report(action: &str, report: &ImportReport) {
    println!(
        "  {} {} {} value(s)",
        "✓".green(),
        action,
        report.applied_count()
    );
    if !report.skipped.is_empty() {
        println!(
            "  {} Skipped: {}",
            "⚠️".yellow(),
            report.skipped.join(", ").dimmed()
        );
    }
}

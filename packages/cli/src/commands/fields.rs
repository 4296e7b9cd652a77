use crate::config::{finish, Context};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Only list fields over their length limit
    #[arg(long)]
    pub over_limit: bool,
}

pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let store = session.store();

    println!("{}", "Fields".bright_blue().bold());
    for spec in &store.schema().fields {
        let status = store.length_status(&spec.id)?;
        if args.over_limit && !status.over_limit {
            continue;
        }

        let count = match status.max {
            Some(max) if status.over_limit => format!("{}/{}", status.count, max).red(),
            Some(max) => format!("{}/{}", status.count, max).dimmed(),
            None => format!("{}", status.count).dimmed(),
        };
        println!(
            "  {:<14} {} {}",
            spec.id.bright_white(),
            count,
            store.get(&spec.id)?
        );
    }

    if args.over_limit {
        return Ok(());
    }

    let settings = store.settings();
    println!();
    println!("{}", "Settings".bright_blue().bold());
    println!("  {:<14} {}", "cta.label", settings.cta.label);
    println!("  {:<14} {}", "cta.url", settings.cta.url);
    println!("  {:<14} {}", "theme", settings.theme);
    if !settings.logo.is_empty() {
        println!("  {:<14} {}", "logo", settings.logo);
    }
    println!("  {:<14} {}", "video", settings.video);

    println!();
    println!("{}", "Sections".bright_blue().bold());
    for spec in &store.schema().sections {
        let mark = if store.is_section_visible(&spec.id)? {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {} {:<12} {}", mark, spec.id, spec.name.dimmed());
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Field id, e.g. hero_headline
    pub field: String,
}

pub fn get(args: GetArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    println!("{}", session.get(&args.field)?);
    Ok(())
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Field id, e.g. hero_headline
    pub field: String,

    /// New value
    pub value: String,
}

pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    session.begin_edit(&args.field)?;
    session.apply_edit(&args.field, args.value)?;
    finish(&mut session)?;

    let status = session.length_status(&args.field)?;
    println!("  {} Updated {}", "✓".green(), args.field);
    if let (true, Some(max)) = (status.over_limit, status.max) {
        println!(
            "  {} {} characters, limit is {}",
            "⚠️".yellow(),
            status.count,
            max
        );
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct ExampleArgs {
    /// Field id, e.g. hero_headline
    pub field: String,
}

pub fn example(args: ExampleArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    session.apply_example(&args.field)?;
    finish(&mut session)?;

    println!(
        "  {} Example loaded: {}",
        "✨".bright_white(),
        session.get(&args.field)?
    );
    Ok(())
}

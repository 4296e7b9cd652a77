use crate::config::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page URL reported in exported metadata
    #[arg(long)]
    pub source_url: Option<String>,

    /// Prefix for every stored key
    #[arg(long)]
    pub key_prefix: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = ctx.config_dir.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = EditorConfig::default();
    if let Some(url) = args.source_url {
        config.source_url = url;
    }
    if let Some(prefix) = args.key_prefix {
        config.key_prefix = prefix;
    }

    fs::create_dir_all(&ctx.config_dir)?;
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: pagesmith template saas");
    println!("  2. Run: pagesmith show");

    Ok(())
}

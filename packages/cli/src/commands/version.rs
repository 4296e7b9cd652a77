use crate::config::{finish, Context};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Debug, Subcommand)]
pub enum VersionCommand {
    /// Save the current document as a named version
    Save {
        /// Version label (defaults to "Version N")
        label: Option<String>,
    },

    /// List saved versions, most recent first
    List,

    /// Restore a saved version by id
    Restore { id: u64 },
}

pub fn version(command: VersionCommand, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    match command {
        VersionCommand::Save { label } => {
            let saved = session.save_version(label.as_deref());
            finish(&mut session)?;
            println!(
                "  {} Saved {} ({})",
                "✓".green(),
                saved.label.bright_white(),
                saved.id
            );
        }
        VersionCommand::List => {
            if session.versions().is_empty() {
                println!("{}", "No saved versions".yellow());
                return Ok(());
            }
            for v in session.versions() {
                println!(
                    "  {:>13}  {}  {}",
                    v.id,
                    v.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    v.label
                );
            }
        }
        VersionCommand::Restore { id } => {
            session.restore_version(id)?;
            finish(&mut session)?;
            println!("  {} Restored version {}", "✓".green(), id);
        }
    }

    Ok(())
}

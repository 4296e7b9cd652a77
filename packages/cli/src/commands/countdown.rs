use crate::config::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct CountdownArgs {
    /// Start a fresh countdown from now
    #[arg(long)]
    pub reset: bool,
}

pub fn countdown(args: CountdownArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    if args.reset {
        session.reset_countdown();
    }
    let remaining = session.countdown_remaining();

    if remaining.is_expired() {
        println!("{} {}", "⏰".yellow(), "Countdown has ended".yellow());
    } else {
        println!(
            "{} {}",
            "⏳".bright_blue(),
            remaining.to_string().bright_white().bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_editor::JsonFileStore;

    #[test]
    fn test_countdown_deadline_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), None, None);

        countdown(CountdownArgs { reset: false }, &ctx).unwrap();

        let store = JsonFileStore::open(&ctx.store_path).unwrap();
        let stored = store.entries().get("ap_countdown_deadline").cloned();
        assert!(stored.is_some());

        countdown(CountdownArgs { reset: false }, &ctx).unwrap();
        let store = JsonFileStore::open(&ctx.store_path).unwrap();
        assert_eq!(store.entries().get("ap_countdown_deadline").cloned(), stored);
    }
}

use crate::config::{finish, Context};
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagesmith_editor::Theme;

#[derive(Debug, Args)]
pub struct CtaArgs {
    /// Link for the hero and final call-to-action buttons
    #[arg(long)]
    pub url: Option<String>,

    /// Button label
    #[arg(long)]
    pub label: Option<String>,
}

pub fn cta(args: CtaArgs, ctx: &Context) -> Result<()> {
    if args.url.is_none() && args.label.is_none() {
        bail!("Nothing to change, pass --url and/or --label");
    }

    let mut session = ctx.open_session()?;
    session.checkpoint();

    if let Some(url) = &args.url {
        if !session.set_cta_url(url)? {
            println!("  {} Ignoring empty CTA URL", "⚠️".yellow());
        }
    }
    if let Some(label) = &args.label {
        session.set_cta_label(label)?;
    }
    finish(&mut session)?;

    let cta = &session.store().settings().cta;
    println!("  {} CTA: {} → {}", "✓".green(), cta.label, cta.url);
    Ok(())
}

#[derive(Debug, Args)]
pub struct MediaArgs {
    /// Logo image URI or path to an image file
    #[arg(long)]
    pub logo: Option<String>,

    /// Embedded sales video URL
    #[arg(long)]
    pub video: Option<String>,
}

pub fn media(args: MediaArgs, ctx: &Context) -> Result<()> {
    if args.logo.is_none() && args.video.is_none() {
        bail!("Nothing to change, pass --logo and/or --video");
    }

    let mut session = ctx.open_session()?;
    session.checkpoint();

    if let Some(logo) = &args.logo {
        session.set_logo(logo)?;
    }
    if let Some(video) = &args.video {
        if !session.set_video(video)? {
            println!("  {} Ignoring empty video URL", "⚠️".yellow());
        }
    }
    finish(&mut session)?;

    let settings = session.store().settings();
    let logo = if settings.logo.is_empty() {
        "(text logo)"
    } else {
        settings.logo.as_str()
    };
    println!("  {} Logo: {}", "✓".green(), logo);
    println!("  {} Video: {}", "✓".green(), settings.video);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[arg(value_enum, default_value = "toggle")]
    pub mode: ThemeChoice,
}

pub fn theme(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.checkpoint();

    let theme = match args.mode {
        ThemeChoice::Light => {
            session.set_theme(Theme::Light)?;
            Theme::Light
        }
        ThemeChoice::Dark => {
            session.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        ThemeChoice::Toggle => session.toggle_theme()?,
    };
    finish(&mut session)?;

    println!("  {} Theme: {}", "✓".green(), theme);
    Ok(())
}

#[derive(Debug, Args)]
pub struct SectionArgs {
    /// Section id, e.g. roi
    pub section: String,

    /// Make the section visible
    #[arg(long, conflicts_with = "hide")]
    pub show: bool,

    /// Hide the section
    #[arg(long)]
    pub hide: bool,
}

pub fn section(args: SectionArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.checkpoint();

    let visible = if args.show || args.hide {
        session.set_section_visible(&args.section, args.show)?;
        args.show
    } else {
        session.toggle_section(&args.section)?
    };
    finish(&mut session)?;

    let state = if visible { "visible".green() } else { "hidden".red() };
    println!("  {} Section {} is {}", "✓".green(), args.section, state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_and_section_persist() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), None, None);

        theme(
            ThemeArgs {
                mode: ThemeChoice::Toggle,
            },
            &ctx,
        )
        .unwrap();
        section(
            SectionArgs {
                section: "roi".to_string(),
                show: false,
                hide: true,
            },
            &ctx,
        )
        .unwrap();

        let session = ctx.open_session().unwrap();
        assert_eq!(session.store().settings().theme, Theme::Light);
        assert!(!session.store().is_section_visible("roi").unwrap());
    }

    #[test]
    fn test_media_persists() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), None, None);

        media(
            MediaArgs {
                logo: Some("https://example.com/logo.png".to_string()),
                video: Some("https://example.com/embed/5".to_string()),
            },
            &ctx,
        )
        .unwrap();

        let session = ctx.open_session().unwrap();
        let settings = session.store().settings();
        assert_eq!(settings.logo, "https://example.com/logo.png");
        assert_eq!(settings.video, "https://example.com/embed/5");
    }

    #[test]
    fn test_cta_requires_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), None, None);

        assert!(cta(
            CtaArgs {
                url: None,
                label: None
            },
            &ctx
        )
        .is_err());
    }

    #[test]
    fn test_cta_url_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), None, None);

        cta(
            CtaArgs {
                url: Some("  https://example.com/call ".to_string()),
                label: None,
            },
            &ctx,
        )
        .unwrap();

        let session = ctx.open_session().unwrap();
        assert_eq!(session.store().settings().cta.url, "https://example.com/call");
    }
}

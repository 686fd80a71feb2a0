use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use pagecraft_catalog::TemplateCatalog;
use pagecraft_editor::EditSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedFormat {
    /// Widget tree as JSON
    Json,
    /// Rendered page
    Html,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Template to seed from
    pub template: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: SeedFormat,
}

pub fn seed(args: SeedArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = seeded_session(&args.template, &config)?;
    println!("{}", render(&session, args.format)?);
    Ok(())
}

/// Start a session on a freshly seeded page
pub(crate) fn seeded_session(template_id: &str, config: &Config) -> Result<EditSession> {
    let catalog = TemplateCatalog::builtin()?;
    let template = catalog.get(template_id)?;
    Ok(EditSession::from_template(
        template_id,
        template,
        config.editor.clone(),
    )?)
}

pub(crate) fn render(session: &EditSession, format: SeedFormat) -> Result<String> {
    Ok(match format {
        SeedFormat::Json => serde_json::to_string_pretty(session.widgets())?,
        SeedFormat::Html => session
            .document()
            .render(session.title(), session.config().markup.clone())?,
    })
}

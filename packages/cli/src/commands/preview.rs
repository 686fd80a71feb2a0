use crate::config::Config;
use anyhow::Result;
use clap::Args;
use pagecraft_catalog::TemplateCatalog;
use pagecraft_compiler_html::compile_template_preview;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Template to preview
    pub template: String,
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let catalog = TemplateCatalog::builtin()?;
    let template = catalog.get(&args.template)?;

    println!("{}", compile_template_preview(template, config.editor.markup)?);
    Ok(())
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_catalog::{Template, TemplateCatalog, TemplateCategory};

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Only list templates in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only list premium templates
    #[arg(long)]
    pub premium: bool,
}

pub fn templates(args: TemplatesArgs) -> Result<()> {
    let catalog = TemplateCatalog::builtin()?;
    let listed = select(&catalog, &args)?;

    if listed.is_empty() {
        println!("{}", "⚠️  No matching templates".yellow());
        return Ok(());
    }

    for template in &listed {
        let price = if template.is_premium {
            format!("${:.2}", template.price).yellow()
        } else {
            "free".green()
        };
        println!(
            "{} {} ({}) {}",
            template.id.bright_white().bold(),
            template.name,
            template.category,
            price
        );
        println!("    {}", template.description.dimmed());
        let sections: Vec<&str> = template.section_names().collect();
        println!("    sections: {}", sections.join(", "));
    }
    println!();
    println!("{} templates", listed.len());

    Ok(())
}

fn select<'a>(catalog: &'a TemplateCatalog, args: &TemplatesArgs) -> Result<Vec<&'a Template>> {
    let category = args
        .category
        .as_deref()
        .map(str::parse::<TemplateCategory>)
        .transpose()?;

    Ok(catalog
        .iter()
        .filter(|template| category.map_or(true, |c| template.category == c))
        .filter(|template| !args.premium || template.is_premium)
        .collect())
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_catalog::{widget_types_in, WidgetCategory, WidgetType, WIDGET_TYPES};

#[derive(Debug, Args)]
pub struct WidgetsArgs {
    /// Only list widgets in this category
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn widgets(args: WidgetsArgs) -> Result<()> {
    let categories = match args.category.as_deref() {
        Some(name) => vec![name.parse::<WidgetCategory>()?],
        None => WidgetCategory::ALL.to_vec(),
    };

    for category in categories {
        let types: Vec<&WidgetType> = widget_types_in(category).collect();
        if types.is_empty() {
            continue;
        }

        println!("{}", category.as_str().bright_blue().bold());
        for widget_type in types {
            println!(
                "  {:<16} {}",
                widget_type.id.bright_white(),
                widget_type.description.dimmed()
            );
        }
    }
    println!();
    println!("{} widget types", WIDGET_TYPES.len());

    Ok(())
}

use super::seed::{render, seeded_session, SeedFormat};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_canvas::{default_text_field, Canvas, VElement, VirtualSurface, FIELD_ATTRIBUTE};
use pagecraft_catalog::WidgetData;
use pagecraft_compiler_html::WIDGET_ID_ATTRIBUTE;
use pagecraft_editor::{EditSession, JsonFileSink, Mutation};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Template to seed the page from
    pub template: String,

    /// JSON file with the list of edits to replay
    #[arg(short, long)]
    pub script: PathBuf,

    /// Where to write the saved page (defaults to <template>.page.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Publish instead of saving a draft
    #[arg(long)]
    pub publish: bool,

    /// Also print the resulting page
    #[arg(short, long, value_enum)]
    pub print: Option<SeedFormat>,
}

/// One step of an edit script
///
/// Steps go through the same paths as the editor UI: store operations pick
/// their own ids, and `style`/`text` edits run through the canvas bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditStep {
    Add {
        #[serde(rename = "type")]
        widget_type: String,
    },
    Update {
        widget_id: String,
        data: WidgetData,
    },
    Delete {
        widget_id: String,
    },
    Duplicate {
        widget_id: String,
    },
    Reorder {
        from: usize,
        to: usize,
    },
    Select {
        widget_id: String,
    },
    Deselect,
    /// Panel style edit on the widget's root element
    Style {
        widget_id: String,
        property: String,
        value: String,
    },
    /// Inline text edit; `field` defaults to the widget type's main text key
    Text {
        widget_id: String,
        #[serde(default)]
        field: Option<String>,
        value: String,
    },
    Undo,
    Redo,
}

/// Script entries are either editor steps or raw recorded mutations
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    Step(EditStep),
    Mutation(Mutation),
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let script = load_script(&args.script)?;

    println!(
        "{} {} ({} steps)",
        "✏️  Editing".bright_blue().bold(),
        args.template,
        script.len()
    );

    let mut runner = ScriptRunner::new(seeded_session(&args.template, &config)?, &config)?;
    for (index, entry) in script.iter().enumerate() {
        match runner.run(entry) {
            Ok(summary) => println!("  {} {}", "✓".green(), summary),
            Err(err) => {
                println!("  {} step {}: {}", "✗".red(), index + 1, err);
                return Err(err.context(format!("Edit script stopped at step {}", index + 1)));
            }
        }
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(cwd).join(format!("{}.page.json", args.template)));
    let mut sink = JsonFileSink::new(&out);
    let mut session = runner.into_session();

    if args.publish {
        session.publish(&mut sink)?;
        println!("{} {}", "✅ Published".green().bold(), out.display());
    } else {
        session.save(&mut sink)?;
        println!("{} {}", "✅ Saved".green().bold(), out.display());
    }

    if let Some(format) = args.print {
        println!("{}", render(&session, format)?);
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScriptEntry>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read edit script {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Invalid edit script {}", path.display()))
}

/// Replays script entries against a session and its canvas
pub struct ScriptRunner {
    session: EditSession,
    canvas: Canvas<VirtualSurface>,
}

impl ScriptRunner {
    pub fn new(session: EditSession, config: &Config) -> Result<Self> {
        let mut canvas = Canvas::new(
            VirtualSurface::ready(),
            config.loader.clone(),
            config.editor.markup.clone(),
        );
        canvas.request_load(session.widgets())?;
        Ok(Self { session, canvas })
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn into_session(self) -> EditSession {
        self.session
    }

    /// Run one entry and describe what it did
    pub fn run(&mut self, entry: &ScriptEntry) -> Result<String> {
        match entry {
            ScriptEntry::Mutation(mutation) => {
                let result = self.session.apply(mutation)?;
                Ok(format!("{} (version {})", mutation.name(), result.version))
            }
            ScriptEntry::Step(step) => self.run_step(step),
        }
    }

    fn run_step(&mut self, step: &EditStep) -> Result<String> {
        let session = &mut self.session;
        let summary = match step {
            EditStep::Add { widget_type } => {
                let widget = session.add_widget(widget_type)?;
                format!("added {}", widget.id)
            }
            EditStep::Update { widget_id, data } => {
                session.update_widget(widget_id, data.clone())?;
                format!("updated {}", widget_id)
            }
            EditStep::Delete { widget_id } => {
                session.delete_widget(widget_id)?;
                format!("deleted {}", widget_id)
            }
            EditStep::Duplicate { widget_id } => {
                let clone = session.duplicate_widget(widget_id)?;
                format!("duplicated {} as {}", widget_id, clone.id)
            }
            EditStep::Reorder { from, to } => {
                session.reorder(*from, *to)?;
                format!("moved {} to {}", from, to)
            }
            EditStep::Select { widget_id } => {
                session.select(widget_id)?;
                format!("selected {}", widget_id)
            }
            EditStep::Deselect => {
                session.deselect();
                "deselected".to_string()
            }
            EditStep::Undo => undo_redo("undo", session.undo()?),
            EditStep::Redo => undo_redo("redo", session.redo()?),
            EditStep::Style {
                widget_id,
                property,
                value,
            } => {
                self.edit_live(widget_id, None, property, value)?;
                format!("{} {} = {}", widget_id, property, value)
            }
            EditStep::Text {
                widget_id,
                field,
                value,
            } => {
                self.edit_live(widget_id, Some(field.as_deref()), "text", value)?;
                format!("{} text = {:?}", widget_id, value)
            }
        };
        Ok(summary)
    }

    /// Edit a freshly mounted element of the widget through the bridge
    ///
    /// `text_field` is `Some` for text edits; the element then carries the
    /// data field it shows.
    fn edit_live(
        &mut self,
        widget_id: &str,
        text_field: Option<Option<&str>>,
        property: &str,
        value: &str,
    ) -> Result<()> {
        let widget = self.session.select(widget_id)?.clone();
        self.canvas.refresh(self.session.widgets())?;

        let mut element = VElement::new("section").with_attr(WIDGET_ID_ATTRIBUTE, widget_id);
        if let Some(Value::Object(styles)) = widget.field("styles") {
            for (name, style) in styles {
                if let Some(style) = style.as_str() {
                    element = element.with_style(name.as_str(), style);
                }
            }
        }
        if let Some(field) = text_field {
            let field = field.unwrap_or_else(|| default_text_field(&widget.widget_type));
            let current = widget.text_field(field).unwrap_or_default();
            element = VElement::new("p")
                .with_attr(WIDGET_ID_ATTRIBUTE, widget_id)
                .with_attr(FIELD_ATTRIBUTE, field)
                .with_text(current);
        }

        let element = self.canvas.surface_mut().mount(widget_id, element);
        self.canvas.select(element)?;
        self.canvas.edit(property, value)?;
        let committed = self.canvas.commit(&mut self.session)?;
        self.canvas.deselect();

        if committed.is_none() {
            return Err(anyhow!("{} on {} did not change anything", property, widget_id));
        }
        info!(widget_id, property, "Replayed live edit");
        Ok(())
    }
}

fn undo_redo(action: &str, applied: bool) -> String {
    if applied {
        action.to_string()
    } else {
        format!("{} (nothing to {})", action, action)
    }
}

use pagecraft_catalog::{
    default_data, is_known_widget_type, CatalogError, Template, WidgetData, WidgetInstance,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Attribute linking a rendered element back to its widget
pub const WIDGET_ID_ATTRIBUTE: &str = "data-widget-id";

/// Attribute naming the widget data key an element's text comes from
pub const FIELD_ATTRIBUTE: &str = "data-field";

/// Data key holding inline CSS recorded by the customization panel
const STYLES_KEY: &str = "styles";

/// Sections rendered first in a template preview, in this order
const PREVIEW_ORDER: &[&str] = &[
    "hero",
    "about",
    "features",
    "services",
    "menu",
    "products",
    "portfolio",
    "posts",
    "pricing",
    "testimonials",
];

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Emit `style` attributes from widget `styles` data
    pub inline_styles: bool,
    /// Emit `data-widget-id` on widget root elements
    pub widget_ids: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            widget_ids: true,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

type Attributes = Vec<(&'static str, String)>;

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn open(&mut self, tag: &str, attributes: &[(&'static str, String)]) {
        self.add_line(&format!("<{}{}>", tag, format_attributes(attributes)));
        self.indent();
    }

    fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    fn leaf(&mut self, tag: &str, attributes: &[(&'static str, String)], text: &str) {
        self.add_line(&format!(
            "<{tag}{}>{}</{tag}>",
            format_attributes(attributes),
            escape_html(text)
        ));
    }

    fn void(&mut self, tag: &str, attributes: &[(&'static str, String)]) {
        self.add_line(&format!("<{}{} />", tag, format_attributes(attributes)));
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a full HTML document for a page
pub fn compile_page(
    title: &str,
    widgets: &[WidgetInstance],
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();
    compile_head(title, &mut ctx);

    ctx.open("body", &[]);
    for widget in widgets {
        compile_widget_into(widget, &mut ctx)?;
    }
    ctx.close("body");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(widgets = widgets.len(), "Compiled page");
    Ok(ctx.get_output())
}

/// Compile the widgets of a page as a body fragment
pub fn compile_widgets(
    widgets: &[WidgetInstance],
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    for widget in widgets {
        compile_widget_into(widget, &mut ctx)?;
    }
    Ok(ctx.get_output())
}

/// Compile a single widget
pub fn compile_widget(widget: &WidgetInstance, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    compile_widget_into(widget, &mut ctx)?;
    Ok(ctx.get_output())
}

/// Compile the static preview of a template
///
/// Unlike seeding, the preview shows every section the template ships. Known
/// sections render as their widget (defaults overlaid with the section
/// content); anything else renders as a generic section.
pub fn compile_template_preview(
    template: &Template,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();
    compile_head(&template.name, &mut ctx);
    ctx.open("body", &[("class", format!("pc-preview pc-preview-{}", template.category))]);

    for section in preview_order(template) {
        let content = template.section_data(section)?.unwrap_or_default();

        if is_known_widget_type(section) {
            let mut data = default_data(section).unwrap_or_default();
            data.extend(content);
            let widget = WidgetInstance::new(format!("{}-preview", section), section, data);
            compile_widget_into(&widget, &mut ctx)?;
        } else {
            ctx.open("section", &[("class", format!("pc-section pc-{}", section))]);
            compile_fields(&content, None, &mut ctx);
            ctx.close("section");
        }
    }

    ctx.close("body");
    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

fn preview_order(template: &Template) -> Vec<&str> {
    let mut ordered: Vec<&str> = PREVIEW_ORDER
        .iter()
        .copied()
        .filter(|section| template.has_section(section))
        .collect();

    for section in template.section_names() {
        if !ordered.contains(&section) {
            ordered.push(section);
        }
    }

    ordered
}

fn compile_head(title: &str, ctx: &mut Context) {
    ctx.open("head", &[]);
    ctx.void("meta", &[("charset", "UTF-8".to_string())]);
    ctx.void(
        "meta",
        &[
            ("name", "viewport".to_string()),
            ("content", "width=device-width, initial-scale=1.0".to_string()),
        ],
    );
    ctx.leaf("title", &[], title);
    ctx.close("head");
}

fn compile_widget_into(widget: &WidgetInstance, ctx: &mut Context) -> Result<(), CompileError> {
    if !is_known_widget_type(&widget.widget_type) {
        return Err(CompileError::UnknownWidgetType(widget.widget_type.clone()));
    }

    let data = &widget.data;
    let mut class = format!("pc-widget pc-{}", widget.widget_type);
    if widget.widget_type == "button" {
        let style = field_text(data, "style").unwrap_or_else(|| "primary".to_string());
        class.push_str(&format!(" pc-button-{}", style));
    }
    let mut attributes = root_attributes(widget, class, ctx);

    match widget.widget_type.as_str() {
        "hero" => {
            if let Some(image) = field_text(data, "backgroundImage").filter(|s| !s.is_empty()) {
                attributes.push(("data-background", image));
            }
            ctx.open("section", &attributes);
            if let Some(title) = field_text(data, "title") {
                let attributes = field_attributes(&widget.id, "title", ctx);
                ctx.leaf("h1", &attributes, &title);
            }
            if let Some(subtitle) = field_text(data, "subtitle") {
                let mut attributes = vec![("class", "pc-subtitle".to_string())];
                attributes.extend(field_attributes(&widget.id, "subtitle", ctx));
                ctx.leaf("p", &attributes, &subtitle);
            }
            if let Some(text) = field_text(data, "buttonText") {
                let href = field_text(data, "buttonLink").unwrap_or_else(|| "#".to_string());
                let mut attributes = vec![("class", "pc-button".to_string()), ("href", href)];
                attributes.extend(field_attributes(&widget.id, "buttonText", ctx));
                ctx.leaf("a", &attributes, &text);
            }
            ctx.close("section");
        }

        "heading" => {
            let level = data
                .get("level")
                .and_then(Value::as_u64)
                .unwrap_or(2)
                .clamp(1, 6);
            let text = field_text(data, "text").unwrap_or_default();
            attributes.extend(root_field(ctx, "text"));
            ctx.leaf(&format!("h{}", level), &attributes, &text);
        }

        "text" => {
            let text = field_text(data, "content").unwrap_or_default();
            attributes.extend(root_field(ctx, "content"));
            ctx.leaf("p", &attributes, &text);
        }

        "button" => {
            attributes.push(("href", field_text(data, "link").unwrap_or_else(|| "#".to_string())));
            let text = field_text(data, "text").unwrap_or_default();
            attributes.extend(root_field(ctx, "text"));
            ctx.leaf("a", &attributes, &text);
        }

        "image" => {
            ctx.open("figure", &attributes);
            ctx.void(
                "img",
                &[
                    ("src", field_text(data, "src").unwrap_or_default()),
                    ("alt", field_text(data, "alt").unwrap_or_default()),
                ],
            );
            if let Some(caption) = field_text(data, "caption").filter(|s| !s.is_empty()) {
                let attributes = field_attributes(&widget.id, "caption", ctx);
                ctx.leaf("figcaption", &attributes, &caption);
            }
            ctx.close("figure");
        }

        "video" => {
            attributes.push(("src", field_text(data, "url").unwrap_or_default()));
            if data.get("controls").and_then(Value::as_bool).unwrap_or(true) {
                attributes.push(("controls", "controls".to_string()));
            }
            ctx.leaf("video", &attributes, "");
        }

        "spacer" => {
            let height = field_text(data, "height").unwrap_or_else(|| "48px".to_string());
            attributes.push(("data-height", height));
            ctx.leaf("div", &attributes, "");
        }

        "divider" => {
            ctx.void("hr", &attributes);
        }

        "contact-form" | "newsletter" => {
            ctx.open("form", &attributes);
            if let Some(title) = field_text(data, "title") {
                let attributes = field_attributes(&widget.id, "title", ctx);
                ctx.leaf("h2", &attributes, &title);
            }
            if let Some(Value::Array(fields)) = data.get("fields") {
                for field in fields.iter().filter_map(Value::as_str) {
                    ctx.void("input", &[("name", field.to_string()), ("placeholder", field.to_string())]);
                }
            } else {
                let placeholder = field_text(data, "placeholder").unwrap_or_default();
                ctx.void("input", &[("type", "email".to_string()), ("placeholder", placeholder)]);
            }
            let submit = field_text(data, "submitText")
                .or_else(|| field_text(data, "buttonText"))
                .unwrap_or_else(|| "Submit".to_string());
            ctx.leaf("button", &[("type", "submit".to_string())], &submit);
            ctx.close("form");
        }

        _ => {
            ctx.open("section", &attributes);
            compile_fields(data, Some(&widget.id), ctx);
            ctx.close("section");
        }
    }

    Ok(())
}

fn root_attributes(widget: &WidgetInstance, class: String, ctx: &Context) -> Attributes {
    let mut attributes = vec![("class", class)];

    if ctx.options.widget_ids {
        attributes.push((WIDGET_ID_ATTRIBUTE, widget.id.clone()));
    }

    if ctx.options.inline_styles {
        if let Some(style) = inline_style(&widget.data) {
            attributes.push(("style", style));
        }
    }

    attributes
}

/// Marks an editable text element with its widget and data key
fn field_attributes(widget_id: &str, field: &str, ctx: &Context) -> Attributes {
    if !ctx.options.widget_ids {
        return Vec::new();
    }
    vec![
        (WIDGET_ID_ATTRIBUTE, widget_id.to_string()),
        (FIELD_ATTRIBUTE, field.to_string()),
    ]
}

/// Data key for widgets whose root element is the text itself
fn root_field(ctx: &Context, field: &str) -> Option<(&'static str, String)> {
    ctx.options
        .widget_ids
        .then(|| (FIELD_ATTRIBUTE, field.to_string()))
}

fn inline_style(data: &WidgetData) -> Option<String> {
    let styles = data.get(STYLES_KEY)?.as_object()?;
    let declarations: Vec<String> = styles
        .iter()
        .filter_map(|(property, value)| scalar_text(value).map(|v| format!("{}: {};", property, v)))
        .collect();

    if declarations.is_empty() {
        None
    } else {
        Some(declarations.join(" "))
    }
}

/// Generic rendering: title as a heading, scalars as paragraphs, lists as items
///
/// With an `owner`, the top-level title and paragraphs are marked as
/// editable fields of that widget.
fn compile_fields(data: &WidgetData, owner: Option<&str>, ctx: &mut Context) {
    let editable = |key: &str, ctx: &Context| match owner {
        Some(widget_id) => field_attributes(widget_id, key, ctx),
        None => Vec::new(),
    };

    if let Some(title) = field_text(data, "title") {
        let attributes = editable("title", &*ctx);
        ctx.leaf("h2", &attributes, &title);
    }

    for (key, value) in data {
        if key == "title" || key == STYLES_KEY {
            continue;
        }

        match value {
            Value::Array(items) => {
                ctx.open("ul", &[("class", format!("pc-{}", key))]);
                for item in items {
                    compile_item(item, ctx);
                }
                ctx.close("ul");
            }
            Value::Object(fields) => {
                ctx.open("div", &[("class", format!("pc-{}", key))]);
                compile_fields(fields, None, ctx);
                ctx.close("div");
            }
            other => {
                if let Some(text) = scalar_text(other).filter(|s| !s.is_empty()) {
                    let mut attributes = vec![("class", format!("pc-field-{}", key))];
                    attributes.extend(editable(key.as_str(), &*ctx));
                    ctx.leaf("p", &attributes, &text);
                }
            }
        }
    }
}

fn compile_item(item: &Value, ctx: &mut Context) {
    match item {
        Value::Object(fields) => {
            ctx.open("li", &[]);
            for (key, value) in fields {
                match value {
                    Value::Array(values) => {
                        let joined: Vec<String> = values.iter().filter_map(scalar_text).collect();
                        ctx.leaf("span", &[("class", format!("pc-field-{}", key))], &joined.join(", "));
                    }
                    other => {
                        if let Some(text) = scalar_text(other) {
                            ctx.leaf("span", &[("class", format!("pc-field-{}", key))], &text);
                        }
                    }
                }
            }
            ctx.close("li");
        }
        other => {
            if let Some(text) = scalar_text(other) {
                ctx.leaf("li", &[], &text);
            }
        }
    }
}

fn field_text(data: &WidgetData, key: &str) -> Option<String> {
    data.get(key).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn format_attributes(attributes: &[(&'static str, String)]) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

use crate::{
    compile_page, compile_template_preview, compile_widget, compile_widgets, CompileError,
    CompileOptions, FIELD_ATTRIBUTE,
};
use pagecraft_catalog::{default_data, TemplateCatalog, WidgetInstance};
use serde_json::json;

fn widget(id: &str, widget_type: &str) -> WidgetInstance {
    WidgetInstance::new(id, widget_type, default_data(widget_type).unwrap())
}

#[test]
fn test_compile_simple_page() {
    let widgets = vec![widget("hero-1", "hero"), widget("button-1", "button")];
    let html = compile_page("My Site", &widgets, CompileOptions::default()).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>My Site</title>"));
    assert!(html.contains(">Welcome to Our Website</h1>"));
    assert!(html.contains("Click Me"));
    assert!(html.find("hero-1").unwrap() < html.find("button-1").unwrap());
}

#[test]
fn test_compile_widget_ids() {
    let html = compile_widget(&widget("text-42", "text"), CompileOptions::default()).unwrap();
    assert!(html.contains("data-widget-id=\"text-42\""));

    let options = CompileOptions {
        widget_ids: false,
        ..Default::default()
    };
    let html = compile_widget(&widget("text-42", "text"), options).unwrap();
    assert!(!html.contains("data-widget-id"));
    assert!(!html.contains(FIELD_ATTRIBUTE));
}

#[test]
fn test_editable_text_is_marked_with_its_field() {
    let html = compile_widget(&widget("hero-1", "hero"), CompileOptions::default()).unwrap();

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(
        "<h1 data-widget-id=\"hero-1\" data-field=\"title\">Welcome to Our Website</h1>"
    ));
    assert!(html.contains("data-field=\"subtitle\""));
    assert!(html.contains("data-field=\"buttonText\""));

    let html = compile_widget(&widget("button-1", "button"), CompileOptions::default()).unwrap();
    assert!(html.contains("data-field=\"text\""));

    let mut about = WidgetInstance::new("about-1", "about", Default::default());
    about.data.insert("title".to_string(), json!("About Me"));
    about.data.insert("content".to_string(), json!("I write."));
    let html = compile_widget(&about, CompileOptions::default()).unwrap();
    assert!(html.contains("<h2 data-widget-id=\"about-1\" data-field=\"title\">About Me</h2>"));
    assert!(html.contains("data-field=\"content\">I write.</p>"));
}

#[test]
fn test_compile_with_inline_styles() {
    let mut button = widget("button-1", "button");
    button.data.insert(
        "styles".to_string(),
        json!({ "background-color": "#3b82f6", "color": "#ffffff" }),
    );

    let html = compile_widget(&button, CompileOptions::default()).unwrap();

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("style=\""));
    assert!(html.contains("background-color: #3b82f6;"));
    assert!(html.contains("color: #ffffff;"));
    assert!(html.contains("pc-button-primary"));

    let options = CompileOptions {
        inline_styles: false,
        ..Default::default()
    };
    let html = compile_widget(&button, options).unwrap();
    assert!(!html.contains("style=\""));
}

#[test]
fn test_compile_heading_level_is_clamped() {
    let mut heading = widget("heading-1", "heading");
    heading.data.insert("level".to_string(), json!(9));

    let html = compile_widget(&heading, CompileOptions::default()).unwrap();
    assert!(html.contains("<h6"));
    assert!(html.contains("</h6>"));
}

#[test]
fn test_compile_list_sections() {
    let html = compile_widget(&widget("features-1", "features"), CompileOptions::default()).unwrap();

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(">Our Features</h2>"));
    assert!(html.contains("<ul class=\"pc-items\">"));
    assert!(html.contains("Pages load in the blink of an eye"));
}

#[test]
fn test_compile_self_closing_tags() {
    let html = compile_widget(&widget("image-1", "image"), CompileOptions::default()).unwrap();
    assert!(html.contains("<img"));
    assert!(html.contains("src=\"https://via.placeholder.com/800x400\""));
    assert!(html.contains("/>"));
}

#[test]
fn test_unknown_widget_type_is_an_error() {
    let bogus = WidgetInstance::new("x-1", "hologram", Default::default());
    let result = compile_widgets(&[bogus], CompileOptions::default());
    assert!(matches!(result, Err(CompileError::UnknownWidgetType(t)) if t == "hologram"));
}

#[test]
fn test_compile_without_pretty_print() {
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    let html = compile_widgets(&[widget("hero-1", "hero")], options).unwrap();

    // Should be compact, no extra newlines
    assert!(!html.contains('\n'));
}

#[test]
fn test_escape_html_entities() {
    let mut text = widget("text-1", "text");
    text.data.insert("content".to_string(), json!("Hello <world> & \"friends\""));

    let html = compile_widget(&text, CompileOptions::default()).unwrap();

    assert!(html.contains("&lt;world&gt;"));
    assert!(html.contains("&amp;"));
    assert!(html.contains("&quot;friends&quot;"));
}

#[test]
fn test_template_preview_renders_every_section() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let blog = catalog.get("personal-blog").unwrap();

    let html = compile_template_preview(blog, CompileOptions::default()).unwrap();

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("<title>Personal Blog</title>"));
    assert!(html.contains("Thoughts, Stories &amp; Ideas"));
    assert!(html.contains("About Me"));
    assert!(html.contains("Three Weeks in Lisbon"));

    // hero, then about, then posts
    let hero = html.find("pc-hero").unwrap();
    let about = html.find("pc-about").unwrap();
    let posts = html.find("pc-posts").unwrap();
    assert!(hero < about && about < posts);
}

#[test]
fn test_template_preview_generic_sections() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let portfolio = catalog.get("creative-portfolio").unwrap();

    let html = compile_template_preview(portfolio, CompileOptions::default()).unwrap();

    assert!(html.contains("pc-section pc-contact"));
    assert!(html.contains("hello@example.com"));
}

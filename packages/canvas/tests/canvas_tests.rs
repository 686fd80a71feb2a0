//! Loader, bridge and editor working together on a virtual surface

use pagecraft_canvas::{
    Canvas, ContentState, LoadError, LoadState, LoaderConfig, RenderSurface, VElement, VirtualSurface,
    FIELD_ATTRIBUTE,
};
use pagecraft_catalog::TemplateCatalog;
use pagecraft_compiler_html::{CompileOptions, WIDGET_ID_ATTRIBUTE};
use pagecraft_editor::{EditSession, EditorConfig, TemplateLoad};
use serde_json::json;

fn blog_session() -> anyhow::Result<EditSession> {
    let catalog = TemplateCatalog::builtin()?;
    let blog = catalog.get("personal-blog")?;
    Ok(EditSession::from_template("canvas", blog, EditorConfig::default())?)
}

fn quick_loader() -> LoaderConfig {
    LoaderConfig {
        timeout_ms: 20,
        poll_interval_ms: 1,
        max_attempts: 1,
    }
}

#[test]
fn test_load_injects_every_widget_region() -> anyhow::Result<()> {
    let session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());

    canvas.request_load(session.widgets())?;

    assert!(canvas.loader().is_ready());
    let hero = canvas.surface().region_markup("hero-1").unwrap_or_default();
    assert!(hero.contains("Thoughts, Stories &amp; Ideas"));
    assert!(hero.contains("data-widget-id=\"hero-1\""));
    assert_eq!(canvas.surface().render_count("posts-1"), 1);
    Ok(())
}

#[test]
fn test_load_before_ready_then_reload() -> anyhow::Result<()> {
    let session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::new(), quick_loader(), CompileOptions::default());

    assert_eq!(canvas.request_load(session.widgets()), Err(LoadError::NotReady));
    assert!(matches!(canvas.loader().state(), LoadState::Failed(LoadError::NotReady)));
    assert_eq!(canvas.surface().regions().count(), 0);

    canvas.surface_mut().set_ready(true);
    assert!(canvas.reload()?);
    assert!(canvas.loader().is_ready());
    assert_eq!(canvas.surface().render_count("hero-1"), 1);

    // A late duplicate ready signal changes nothing
    assert!(!canvas.on_ready()?);
    assert_eq!(canvas.surface().render_count("hero-1"), 1);
    Ok(())
}

#[test]
fn test_text_edit_survives_reseed() -> anyhow::Result<()> {
    let mut session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());
    canvas.request_load(session.widgets())?;

    // The host mounts the hero title once the markup is live
    let title = canvas.surface_mut().mount(
        "hero-1",
        VElement::new("h1")
            .with_attr(WIDGET_ID_ATTRIBUTE, "hero-1")
            .with_attr(FIELD_ATTRIBUTE, "title")
            .with_text("Thoughts, Stories & Ideas"),
    );

    canvas.select(title)?;
    canvas.edit("text", "Notes From the Road")?;
    canvas.edit("color", "#1f2937")?;
    canvas.commit(&mut session)?;

    assert_eq!(
        canvas.bridge().ledger().state("hero-1"),
        Some(ContentState::UserEdited)
    );
    let hero = session.widget("hero-1").unwrap();
    assert_eq!(hero.text_field("title"), Some("Notes From the Road"));
    assert_eq!(hero.field("styles"), Some(&json!({ "color": "#1f2937" })));

    // Template-driven re-render leaves the edited region alone
    let report = canvas.refresh(session.widgets())?;
    assert_eq!(report.skipped, vec!["hero-1".to_string()]);
    assert_eq!(report.rendered, vec!["posts-1".to_string()]);
    assert_eq!(canvas.surface().text(title)?, "Notes From the Road");
    assert_eq!(canvas.surface().render_count("hero-1"), 1);
    Ok(())
}

#[test]
fn test_style_only_edit_keeps_region_seeded() -> anyhow::Result<()> {
    let mut session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());
    canvas.request_load(session.widgets())?;

    let posts = canvas.surface_mut().mount(
        "posts-1",
        VElement::new("section").with_attr(WIDGET_ID_ATTRIBUTE, "posts-1"),
    );
    canvas.select(posts)?;
    canvas.edit("padding", "48px 24px")?;
    canvas.commit(&mut session)?;

    assert_eq!(canvas.bridge().ledger().state("posts-1"), Some(ContentState::Seeded));

    // The committed style flows into the next render
    let report = canvas.refresh(session.widgets())?;
    assert!(report.rendered.contains(&"posts-1".to_string()));
    let markup = canvas.surface().region_markup("posts-1").unwrap_or_default();
    assert!(markup.contains("padding: 48px 24px;"));
    assert!(session.is_dirty());
    Ok(())
}

#[tokio::test]
async fn test_async_load_times_out_on_dead_surface() -> anyhow::Result<()> {
    let session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::new(), quick_loader(), CompileOptions::default());

    let result = canvas.load(session.widgets()).await;

    assert!(matches!(result, Err(LoadError::Timeout { attempts: 1, .. })));
    assert_eq!(canvas.surface().regions().count(), 0);
    Ok(())
}

#[test]
fn test_template_switch_replaces_the_page() -> anyhow::Result<()> {
    let catalog = TemplateCatalog::builtin()?;
    let mut session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());
    canvas.request_load(session.widgets())?;

    let title = canvas.surface_mut().mount("hero-1", VElement::new("h1").with_text("Thoughts, Stories & Ideas"));
    canvas.select(title)?;
    canvas.edit("text", "Blog edit")?;
    canvas.commit(&mut session)?;
    assert!(canvas.bridge().ledger().is_user_edited("hero-1"));

    let outcome = canvas.load_template(&mut session, catalog.get("saas-landing")?)?;

    assert_eq!(outcome, TemplateLoad::Reseeded);
    assert!(canvas.bridge().selected().is_none());
    assert_eq!(canvas.bridge().ledger().state("hero-1"), Some(ContentState::Seeded));
    assert_eq!(canvas.surface().render_count("hero-1"), 2);
    let hero = canvas.surface().region_markup("hero-1").unwrap_or_default();
    assert!(hero.contains("Ship Faster With Less Effort"));
    assert!(!hero.contains("Thoughts"));
    assert!(!canvas.surface().is_attached(title));
    assert_eq!(canvas.surface().regions().collect::<Vec<_>>(), ["features-1", "hero-1"]);

    // Same template again leaves the page alone
    let outcome = canvas.load_template(&mut session, catalog.get("saas-landing")?)?;
    assert_eq!(outcome, TemplateLoad::Unchanged);
    assert_eq!(canvas.surface().render_count("hero-1"), 2);
    Ok(())
}

#[test]
fn test_refresh_removes_deleted_widget_regions() -> anyhow::Result<()> {
    let mut session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());
    canvas.request_load(session.widgets())?;
    let post = canvas.surface_mut().mount("posts-1", VElement::new("article"));

    session.delete_widget("posts-1")?;
    let report = canvas.refresh(session.widgets())?;

    assert_eq!(report.removed, vec!["posts-1".to_string()]);
    assert_eq!(report.rendered, vec!["hero-1".to_string()]);
    assert_eq!(canvas.surface().regions().collect::<Vec<_>>(), ["hero-1"]);
    assert_eq!(canvas.bridge().ledger().state("posts-1"), None);
    assert!(!canvas.surface().is_attached(post));
    Ok(())
}

#[test]
fn test_edit_on_compiled_markup_survives_refresh() -> anyhow::Result<()> {
    let mut session = blog_session()?;
    let mut canvas = Canvas::new(VirtualSurface::ready(), quick_loader(), CompileOptions::default());
    canvas.request_load(session.widgets())?;

    // The compiled hero marks its subtitle as an editable field
    let hero = canvas.surface().region_markup("hero-1").unwrap_or_default().to_string();
    assert!(hero.contains("data-widget-id=\"hero-1\" data-field=\"subtitle\""));
    let subtitle = canvas.surface_mut().mount(
        "hero-1",
        VElement::new("p")
            .with_attr("class", "pc-subtitle")
            .with_attr(WIDGET_ID_ATTRIBUTE, "hero-1")
            .with_attr(FIELD_ATTRIBUTE, "subtitle")
            .with_text("Old subtitle"),
    );
    canvas.select(subtitle)?;
    canvas.edit("text", "Letters from the road")?;
    assert!(canvas.commit(&mut session)?.is_some());

    // A bare heading inside the region resolves to the region's widget
    let heading = canvas.surface_mut().mount("hero-1", VElement::new("h1").with_text("Thoughts, Stories & Ideas"));
    canvas.select(heading)?;
    canvas.edit("text", "Mine")?;
    assert!(canvas.commit(&mut session)?.is_some());

    let widget = session.widget("hero-1").unwrap();
    assert_eq!(widget.text_field("subtitle"), Some("Letters from the road"));
    assert_eq!(widget.text_field("title"), Some("Mine"));

    let report = canvas.refresh(session.widgets())?;
    assert_eq!(report.skipped, vec!["hero-1".to_string()]);
    assert_eq!(canvas.surface().text(heading)?, "Mine");
    assert_eq!(canvas.surface().text(subtitle)?, "Letters from the road");
    Ok(())
}

//! Canvas: a surface plus the loader and bridge that drive it
//!
//! The loader and bridge share one [`ContentLedger`](crate::ContentLedger),
//! so regions the user has typed into are never overwritten by a later load
//! or refresh. Switching templates is the exception: the page is replaced,
//! so the ledger and every old region go with it.

use crate::{
    BridgeError, ElementRef, LoadError, LoaderConfig, PageContent, RenderOutcome, RenderSurface,
    SelectedElement, StyleBridge, TemplateLoader,
};
use pagecraft_catalog::{Template, WidgetInstance};
use pagecraft_compiler_html::CompileOptions;
use pagecraft_editor::{EditSession, MutationResult, TemplateLoad};
use tracing::{debug, info};

/// Regions touched by a refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub rendered: Vec<String>,
    pub skipped: Vec<String>,
    /// Regions whose widget left the page
    pub removed: Vec<String>,
}

#[derive(Debug)]
pub struct Canvas<S: RenderSurface> {
    surface: S,
    bridge: StyleBridge,
    loader: TemplateLoader,
    markup: CompileOptions,
}

impl<S: RenderSurface> Canvas<S> {
    pub fn new(surface: S, loader: LoaderConfig, markup: CompileOptions) -> Self {
        Self {
            surface,
            bridge: StyleBridge::new(),
            loader: TemplateLoader::new(loader),
            markup,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn bridge(&self) -> &StyleBridge {
        &self.bridge
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    fn content(&self, widgets: &[WidgetInstance]) -> Result<PageContent, LoadError> {
        Ok(PageContent::from_widgets(widgets, &self.markup)?)
    }

    /// Load a page into a surface that must be ready now
    pub fn request_load(&mut self, widgets: &[WidgetInstance]) -> Result<(), LoadError> {
        let content = self.content(widgets)?;
        self.loader
            .request_load(&mut self.surface, self.bridge.ledger_mut(), content)
    }

    /// Load a page, waiting for the surface to become ready
    pub async fn load(&mut self, widgets: &[WidgetInstance]) -> Result<(), LoadError> {
        let content = self.content(widgets)?;
        self.loader
            .load(&mut self.surface, self.bridge.ledger_mut(), content)
            .await
    }

    /// Forward a readiness signal from the host
    pub fn on_ready(&mut self) -> Result<bool, LoadError> {
        self.loader.on_ready(&mut self.surface, self.bridge.ledger_mut())
    }

    /// Retry a failed load and inject if the surface is ready
    pub fn reload(&mut self) -> Result<bool, LoadError> {
        if !self.loader.reload() {
            return Ok(false);
        }
        if self.surface.is_ready() {
            return self.on_ready();
        }
        Ok(false)
    }

    /// Replace the whole page with freshly seeded widgets
    ///
    /// Clears the selection and the ledger, removes regions of widgets that
    /// are not on the new page, then loads the new content.
    pub fn reseed(&mut self, widgets: &[WidgetInstance]) -> Result<(), LoadError> {
        self.bridge.deselect();

        let stale = self.stale_regions(widgets);
        for region in &stale {
            self.surface.remove_region(region)?;
        }
        self.bridge.ledger_mut().clear();

        info!(widgets = widgets.len(), removed = stale.len(), "Reseeding canvas");
        self.request_load(widgets)
    }

    /// Switch the session to `template`, reseeding the canvas if the page changed
    pub fn load_template(
        &mut self,
        session: &mut EditSession,
        template: &Template,
    ) -> Result<TemplateLoad, BridgeError> {
        let outcome = session.load_template(template)?;
        if outcome == TemplateLoad::Reseeded {
            self.reseed(session.widgets())?;
        }
        Ok(outcome)
    }

    /// Re-render every widget region from the tree
    ///
    /// Regions holding user text edits are skipped. Regions of widgets that
    /// are gone are removed.
    pub fn refresh(&mut self, widgets: &[WidgetInstance]) -> Result<RefreshReport, LoadError> {
        let content = self.content(widgets)?;
        let mut report = RefreshReport::default();

        for region in self.stale_regions(widgets) {
            self.surface.remove_region(&region)?;
            self.bridge.ledger_mut().forget(&region);
            report.removed.push(region);
        }

        for (region, markup) in content.regions() {
            match self.bridge.ledger_mut().render_region(&mut self.surface, region, markup)? {
                RenderOutcome::Rendered => report.rendered.push(region.to_string()),
                RenderOutcome::Skipped => report.skipped.push(region.to_string()),
            }
        }

        debug!(
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            removed = report.removed.len(),
            "Refreshed canvas"
        );
        Ok(report)
    }

    fn stale_regions(&self, widgets: &[WidgetInstance]) -> Vec<String> {
        self.bridge
            .ledger()
            .regions()
            .filter(|region| !widgets.iter().any(|widget| widget.id == *region))
            .map(str::to_string)
            .collect()
    }

    pub fn select(&mut self, element: ElementRef) -> Result<&SelectedElement, BridgeError> {
        self.bridge.select(&self.surface, element)
    }

    pub fn deselect(&mut self) {
        self.bridge.deselect();
    }

    pub fn edit(&mut self, field: &str, value: &str) -> Result<(), BridgeError> {
        self.bridge.apply_edit(&mut self.surface, field, value)
    }

    pub fn commit(&mut self, session: &mut EditSession) -> Result<Option<MutationResult>, BridgeError> {
        self.bridge.commit(session)
    }
}

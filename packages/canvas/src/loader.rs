//! # Template Loader
//!
//! Injects a page's rendered widgets into a surface once it is ready.
//!
//! ## States
//!
//! ```text
//!          begin            ready signal
//! Idle ───────────→ Initializing ───────────→ Ready
//!                     │    ↑ retry (attempt < max)
//!                     │    └──────┐
//!                     └─ timeout ─┴──→ Failed ──reload──→ Initializing
//! ```
//!
//! - A second `begin` while `Initializing` is a no-op
//! - Ready signals may fire repeatedly; only the first one injects
//! - Each attempt waits at most `timeout`; the last failed attempt surfaces
//!   `LoadError::Timeout`
//! - A surface that is not ready for an immediate load fails with
//!   `LoadError::NotReady` and is left untouched

use crate::{ContentLedger, RenderSurface, SurfaceError};
use pagecraft_catalog::WidgetInstance;
use pagecraft_compiler_html::{compile_widget, CompileError, CompileOptions};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// How long one attempt waits for the surface
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
}

impl LoaderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            poll_interval_ms: 50,
            max_attempts: 3,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Surface is not ready")]
    NotReady,

    #[error("Surface not ready after {attempts} attempt(s) of {timeout:?}")]
    Timeout { attempts: u32, timeout: Duration },

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

impl From<CompileError> for LoadError {
    fn from(e: CompileError) -> Self {
        LoadError::Markup(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Initializing { attempt: u32, started: Instant },
    Ready,
    Failed(LoadError),
}

/// Rendered markup per region (one region per widget)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    regions: Vec<(String, String)>,
}

impl PageContent {
    pub fn from_widgets(widgets: &[WidgetInstance], options: &CompileOptions) -> Result<Self, CompileError> {
        let regions = widgets
            .iter()
            .map(|widget| Ok((widget.id.clone(), compile_widget(widget, options.clone())?)))
            .collect::<Result<Vec<_>, CompileError>>()?;
        Ok(Self { regions })
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions
            .iter()
            .map(|(region, markup)| (region.as_str(), markup.as_str()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug)]
pub struct TemplateLoader {
    config: LoaderConfig,
    state: LoadState,
    content: Option<PageContent>,
}

impl TemplateLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            state: LoadState::Idle,
            content: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self.state, LoadState::Initializing { .. })
    }

    /// Start waiting for the surface
    ///
    /// Returns `false` (and keeps the in-flight content) when a load is
    /// already initializing.
    pub fn begin(&mut self, content: PageContent) -> bool {
        if self.is_initializing() {
            debug!("Load already in flight, ignoring");
            return false;
        }

        info!(regions = content.len(), "Loading page content");
        self.content = Some(content);
        self.state = LoadState::Initializing {
            attempt: 1,
            started: Instant::now(),
        };
        true
    }

    /// Load right away into a surface that must already be ready
    pub fn request_load(
        &mut self,
        surface: &mut dyn RenderSurface,
        ledger: &mut ContentLedger,
        content: PageContent,
    ) -> Result<(), LoadError> {
        if self.is_initializing() {
            debug!("Load already in flight, ignoring");
            return Ok(());
        }

        if !surface.is_ready() {
            self.content = Some(content);
            self.fail(LoadError::NotReady);
            return Err(LoadError::NotReady);
        }

        self.begin(content);
        self.on_ready(surface, ledger).map(|_| ())
    }

    /// Ready signal from the surface
    ///
    /// Injects the pending content on the first signal of an attempt.
    /// Returns `Ok(false)` for signals that arrive when nothing is loading.
    pub fn on_ready(&mut self, surface: &mut dyn RenderSurface, ledger: &mut ContentLedger) -> Result<bool, LoadError> {
        if !self.is_initializing() {
            debug!(state = ?self.state, "Ignoring ready signal");
            return Ok(false);
        }

        let Some(content) = self.content.as_ref() else {
            self.state = LoadState::Idle;
            return Ok(false);
        };

        let regions = content.len();
        let injected = content
            .regions()
            .try_for_each(|(region, markup)| ledger.render_region(surface, region, markup).map(|_| ()));

        if let Err(e) = injected {
            let error = LoadError::from(e);
            self.fail(error.clone());
            return Err(error);
        }

        info!(regions, "Page content injected");
        self.state = LoadState::Ready;
        Ok(true)
    }

    /// Check on an initializing load
    ///
    /// `Ok(true)` once ready, `Ok(false)` while waiting.
    pub fn poll(
        &mut self,
        surface: &mut dyn RenderSurface,
        ledger: &mut ContentLedger,
        now: Instant,
    ) -> Result<bool, LoadError> {
        match self.state.clone() {
            LoadState::Ready => Ok(true),
            LoadState::Failed(error) => Err(error),
            LoadState::Idle => Ok(false),
            LoadState::Initializing { attempt, started } => {
                if surface.is_ready() {
                    return self.on_ready(surface, ledger).map(|_| true);
                }

                if now.saturating_duration_since(started) < self.config.timeout() {
                    return Ok(false);
                }

                if attempt < self.config.max_attempts {
                    warn!(attempt, "Surface not ready, retrying");
                    self.state = LoadState::Initializing {
                        attempt: attempt + 1,
                        started: now,
                    };
                    return Ok(false);
                }

                let error = LoadError::Timeout {
                    attempts: attempt,
                    timeout: self.config.timeout(),
                };
                self.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Poll until ready or failed
    pub async fn wait(&mut self, surface: &mut dyn RenderSurface, ledger: &mut ContentLedger) -> Result<(), LoadError> {
        loop {
            if self.state == LoadState::Idle {
                return Ok(());
            }
            if self.poll(surface, ledger, Instant::now())? {
                return Ok(());
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Begin a load and wait for it to finish
    pub async fn load(
        &mut self,
        surface: &mut dyn RenderSurface,
        ledger: &mut ContentLedger,
        content: PageContent,
    ) -> Result<(), LoadError> {
        if !self.begin(content) {
            return Ok(());
        }
        self.wait(surface, ledger).await
    }

    /// Retry a failed load with the same content
    pub fn reload(&mut self) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) || self.content.is_none() {
            return false;
        }

        info!("Reloading page content");
        self.state = LoadState::Initializing {
            attempt: 1,
            started: Instant::now(),
        };
        true
    }

    fn fail(&mut self, error: LoadError) {
        warn!(error = %error, "Page load failed");
        self.state = LoadState::Failed(error);
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementInfo, ElementRef, VirtualSurface};
    use pagecraft_catalog::default_data;
    use std::cell::Cell;

    fn content() -> PageContent {
        let widgets = vec![
            WidgetInstance::new("hero-1", "hero", default_data("hero").unwrap()),
            WidgetInstance::new("posts-1", "posts", default_data("posts").unwrap()),
        ];
        PageContent::from_widgets(&widgets, &CompileOptions::default()).unwrap()
    }

    fn fast() -> LoaderConfig {
        LoaderConfig {
            timeout_ms: 20,
            poll_interval_ms: 1,
            max_attempts: 2,
        }
    }

    /// Surface that reports ready after a number of readiness checks
    struct ReadyAfter {
        inner: VirtualSurface,
        checks: Cell<u32>,
        ready_after: u32,
    }

    impl ReadyAfter {
        fn new(ready_after: u32) -> Self {
            Self {
                inner: VirtualSurface::ready(),
                checks: Cell::new(0),
                ready_after,
            }
        }
    }

    impl RenderSurface for ReadyAfter {
        fn is_ready(&self) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.checks.get() > self.ready_after
        }
        fn inspect(&self, element: ElementRef) -> Result<ElementInfo, SurfaceError> {
            self.inner.inspect(element)
        }
        fn computed_style(&self, element: ElementRef, property: &str) -> Result<String, SurfaceError> {
            self.inner.computed_style(element, property)
        }
        fn set_style(&mut self, element: ElementRef, property: &str, value: &str) -> Result<(), SurfaceError> {
            self.inner.set_style(element, property, value)
        }
        fn text(&self, element: ElementRef) -> Result<String, SurfaceError> {
            self.inner.text(element)
        }
        fn set_text(&mut self, element: ElementRef, text: &str) -> Result<(), SurfaceError> {
            self.inner.set_text(element, text)
        }
        fn attribute(&self, element: ElementRef, name: &str) -> Result<Option<String>, SurfaceError> {
            self.inner.attribute(element, name)
        }
        fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) -> Result<(), SurfaceError> {
            self.inner.set_attribute(element, name, value)
        }
        fn region_of(&self, element: ElementRef) -> Result<Option<String>, SurfaceError> {
            self.inner.region_of(element)
        }
        fn render_region(&mut self, region: &str, markup: &str) -> Result<(), SurfaceError> {
            self.inner.render_region(region, markup)
        }
        fn remove_region(&mut self, region: &str) -> Result<(), SurfaceError> {
            self.inner.remove_region(region)
        }
    }

    #[test]
    fn test_request_load_on_ready_surface() {
        let mut surface = VirtualSurface::ready();
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(fast());

        loader.request_load(&mut surface, &mut ledger, content()).unwrap();

        assert!(loader.is_ready());
        assert!(surface.region_markup("hero-1").unwrap().contains("Welcome to Our Website"));
        assert_eq!(surface.render_count("posts-1"), 1);
    }

    #[test]
    fn test_not_ready_surface_fails_without_mutation() {
        let mut surface = VirtualSurface::new();
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(fast());

        let result = loader.request_load(&mut surface, &mut ledger, content());

        assert_eq!(result, Err(LoadError::NotReady));
        assert_eq!(loader.state(), &LoadState::Failed(LoadError::NotReady));
        assert_eq!(surface.regions().count(), 0);

        // Reload once the surface comes up
        surface.set_ready(true);
        assert!(loader.reload());
        assert!(loader.poll(&mut surface, &mut ledger, Instant::now()).unwrap());
        assert_eq!(surface.render_count("hero-1"), 1);
    }

    #[test]
    fn test_repeated_ready_signal_injects_once() {
        let mut surface = VirtualSurface::ready();
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(fast());

        assert!(loader.begin(content()));
        assert!(loader.on_ready(&mut surface, &mut ledger).unwrap());
        assert!(!loader.on_ready(&mut surface, &mut ledger).unwrap());
        assert_eq!(surface.render_count("hero-1"), 1);
    }

    #[test]
    fn test_second_begin_is_noop() {
        let mut loader = TemplateLoader::new(fast());
        assert!(loader.begin(content()));
        assert!(!loader.begin(PageContent::default()));
        assert!(loader.is_initializing());
    }

    #[test]
    fn test_poll_times_out_after_max_attempts() {
        let mut surface = VirtualSurface::new();
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(fast());
        loader.begin(content());

        let start = Instant::now();
        assert!(!loader.poll(&mut surface, &mut ledger, start).unwrap());

        // First attempt expires, second begins
        let later = start + Duration::from_millis(100);
        assert!(!loader.poll(&mut surface, &mut ledger, later).unwrap());
        assert!(matches!(loader.state(), LoadState::Initializing { attempt: 2, .. }));

        let result = loader.poll(&mut surface, &mut ledger, later + Duration::from_millis(100));
        assert_eq!(
            result,
            Err(LoadError::Timeout {
                attempts: 2,
                timeout: Duration::from_millis(20)
            })
        );
        assert!(loader.reload());
        assert!(loader.is_initializing());
    }

    #[test]
    fn test_reload_requires_failure() {
        let mut loader = TemplateLoader::new(fast());
        assert!(!loader.reload());
        loader.begin(content());
        assert!(!loader.reload());
    }

    #[tokio::test]
    async fn test_async_load_waits_for_ready() {
        let mut surface = ReadyAfter::new(3);
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(LoaderConfig {
            timeout_ms: 1000,
            ..fast()
        });

        loader.load(&mut surface, &mut ledger, content()).await.unwrap();

        assert!(loader.is_ready());
        assert_eq!(surface.inner.render_count("hero-1"), 1);
    }

    #[tokio::test]
    async fn test_async_load_times_out() {
        let mut surface = VirtualSurface::new();
        let mut ledger = ContentLedger::new();
        let mut loader = TemplateLoader::new(fast());

        let result = loader.load(&mut surface, &mut ledger, content()).await;

        assert!(matches!(result, Err(LoadError::Timeout { attempts: 2, .. })));
        assert_eq!(surface.regions().count(), 0);
    }

    #[test]
    fn test_config_from_json() {
        let config: LoaderConfig = serde_json::from_str(r#"{ "timeoutMs": 250 }"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.max_attempts, 3);
    }
}

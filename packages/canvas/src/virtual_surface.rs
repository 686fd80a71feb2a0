//! In-memory [`RenderSurface`]
//!
//! Regions hold rendered markup plus any elements mounted into them.
//! Rendering a region detaches its elements, the way replacing `innerHTML`
//! orphans the old nodes.

use crate::{ElementInfo, ElementRef, RenderSurface, SurfaceError};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Computed values for properties with no inline value
const DEFAULT_COMPUTED: &[(&str, &str)] = &[
    ("background-color", "rgba(0, 0, 0, 0)"),
    ("color", "rgb(0, 0, 0)"),
    ("border-color", "rgb(0, 0, 0)"),
    ("font-family", "serif"),
    ("font-size", "16px"),
    ("font-weight", "400"),
    ("line-height", "normal"),
    ("letter-spacing", "normal"),
    ("text-align", "start"),
    ("padding", "0px"),
    ("margin", "0px"),
    ("width", "auto"),
    ("height", "auto"),
    ("border-radius", "0px"),
    ("opacity", "1"),
];

/// Element description used to mount content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VElement {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
}

impl VElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Default)]
struct Region {
    markup: String,
    renders: usize,
    elements: Vec<ElementRef>,
}

#[derive(Debug, Default)]
pub struct VirtualSurface {
    ready: bool,
    next_id: u64,
    elements: HashMap<ElementRef, VElement>,
    regions: BTreeMap<String, Region>,
}

impl VirtualSurface {
    /// Surface that has not signalled readiness yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Add an element to a region
    pub fn mount(&mut self, region: &str, element: VElement) -> ElementRef {
        self.next_id += 1;
        let handle = ElementRef(self.next_id);
        self.elements.insert(handle, element);
        self.regions.entry(region.to_string()).or_default().elements.push(handle);
        handle
    }

    pub fn region_markup(&self, region: &str) -> Option<&str> {
        self.regions.get(region).map(|r| r.markup.as_str())
    }

    /// How many times a region has been rendered
    pub fn render_count(&self, region: &str) -> usize {
        self.regions.get(region).map_or(0, |r| r.renders)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn is_attached(&self, element: ElementRef) -> bool {
        self.elements.contains_key(&element)
    }

    fn element(&self, element: ElementRef) -> Result<&VElement, SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotReady);
        }
        self.elements.get(&element).ok_or(SurfaceError::Detached(element))
    }

    fn element_mut(&mut self, element: ElementRef) -> Result<&mut VElement, SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotReady);
        }
        self.elements.get_mut(&element).ok_or(SurfaceError::Detached(element))
    }
}

impl RenderSurface for VirtualSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn inspect(&self, element: ElementRef) -> Result<ElementInfo, SurfaceError> {
        let el = self.element(element)?;
        let attr = |name: &str| el.attributes.get(name).cloned().unwrap_or_default();
        Ok(ElementInfo {
            tag_name: el.tag.to_ascii_uppercase(),
            text_content: el.text.clone(),
            class_name: attr("class"),
            id: attr("id"),
            style: el.styles.clone(),
        })
    }

    fn computed_style(&self, element: ElementRef, property: &str) -> Result<String, SurfaceError> {
        let el = self.element(element)?;
        if let Some(value) = el.styles.get(property) {
            return Ok(value.clone());
        }
        DEFAULT_COMPUTED
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.to_string())
            .ok_or_else(|| SurfaceError::UnsupportedProperty(property.to_string()))
    }

    fn set_style(&mut self, element: ElementRef, property: &str, value: &str) -> Result<(), SurfaceError> {
        let el = self.element_mut(element)?;
        if value.is_empty() {
            el.styles.remove(property);
        } else {
            el.styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn text(&self, element: ElementRef) -> Result<String, SurfaceError> {
        Ok(self.element(element)?.text.clone())
    }

    fn set_text(&mut self, element: ElementRef, text: &str) -> Result<(), SurfaceError> {
        self.element_mut(element)?.text = text.to_string();
        Ok(())
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Result<Option<String>, SurfaceError> {
        Ok(self.element(element)?.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.element_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn region_of(&self, element: ElementRef) -> Result<Option<String>, SurfaceError> {
        self.element(element)?;
        Ok(self
            .regions
            .iter()
            .find(|(_, r)| r.elements.contains(&element))
            .map(|(name, _)| name.clone()))
    }

    fn render_region(&mut self, region: &str, markup: &str) -> Result<(), SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotReady);
        }

        let entry = self.regions.entry(region.to_string()).or_default();
        for handle in entry.elements.drain(..) {
            self.elements.remove(&handle);
        }
        entry.markup = markup.to_string();
        entry.renders += 1;

        debug!(region, bytes = markup.len(), "Rendered region");
        Ok(())
    }

    fn remove_region(&mut self, region: &str) -> Result<(), SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotReady);
        }

        if let Some(removed) = self.regions.remove(region) {
            for handle in removed.elements {
                self.elements.remove(&handle);
            }
            debug!(region, "Removed region");
        }
        Ok(())
    }
}

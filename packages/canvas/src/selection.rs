use crate::{CustomizationPanel, ElementRef, RenderSurface, SurfaceError};
use pagecraft_compiler_html::{FIELD_ATTRIBUTE, WIDGET_ID_ATTRIBUTE};
use std::collections::BTreeMap;

/// The element currently open in the customization panel
///
/// Metadata is captured at selection time; the live element is only reached
/// through `element`, which the surface may have detached since.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    pub element: ElementRef,
    pub tag_name: String,
    pub text_content: String,
    pub class_name: String,
    pub id: String,
    pub style: BTreeMap<String, String>,
    /// Widget the element renders, if it carries a widget id
    pub widget_id: Option<String>,
    /// Widget data key holding the element's text
    pub field: Option<String>,
}

impl SelectedElement {
    /// Snapshot an element for the panel
    ///
    /// The widget comes from the element's `data-widget-id`, or failing that
    /// from the region it was rendered into (regions are named by widget id).
    pub fn capture(surface: &dyn RenderSurface, element: ElementRef) -> Result<Self, SurfaceError> {
        let info = surface.inspect(element)?;
        let widget_id = match surface.attribute(element, WIDGET_ID_ATTRIBUTE)? {
            Some(id) => Some(id),
            None => surface.region_of(element)?,
        };
        Ok(Self {
            element,
            tag_name: info.tag_name,
            text_content: info.text_content,
            class_name: info.class_name,
            id: info.id,
            style: info.style,
            widget_id,
            field: surface.attribute(element, FIELD_ATTRIBUTE)?,
        })
    }

    pub fn panel(&self) -> CustomizationPanel {
        CustomizationPanel::for_tag(&self.tag_name)
    }

    /// Region whose content ownership text edits affect
    pub fn region(&self) -> Option<&str> {
        self.widget_id.as_deref()
    }
}

/// Widget data key that holds the visible text of `widget_type`
pub fn default_text_field(widget_type: &str) -> &'static str {
    match widget_type {
        "button" | "heading" => "text",
        "text" | "about" => "content",
        "image" => "caption",
        _ => "title",
    }
}

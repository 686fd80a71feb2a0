//! # Style Bridge
//!
//! Pushes customization-panel edits onto the selected live element and,
//! on commit, into the widget tree.
//!
//! ## Edit flow
//!
//! ```text
//! panel field ──parse──→ PanelField ──apply──→ surface (inline style / text / src)
//!                                        │
//!                                        ├──→ recorded edit (keeps inputs controlled)
//!                                        └──→ ledger: text edits mark the region UserEdited
//!
//! commit ──→ EditSession::update_widget(widget_id, { styles, text field, ... })
//! ```
//!
//! Only values that differ from the element's original value are recorded,
//! so setting a field back to what it was drops the edit.

use crate::color::rgb_to_hex;
use crate::selection::default_text_field;
use crate::{
    ContentLedger, CustomizationPanel, ElementRef, LoadError, PanelField, RenderSurface, SelectedElement,
    StyleProperty, SurfaceError,
};
use pagecraft_catalog::WidgetData;
use pagecraft_editor::{EditSession, EditorError, MutationResult};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

const STYLES_KEY: &str = "styles";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("No element selected")]
    NoSelection,

    #[error("Unknown panel field: {0}")]
    UnknownField(String),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

#[derive(Debug, Default)]
pub struct StyleBridge {
    selection: Option<SelectedElement>,
    /// Value each edited field had before its first edit
    baseline: BTreeMap<PanelField, String>,
    edits: BTreeMap<PanelField, String>,
    ledger: ContentLedger,
}

impl StyleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: ContentLedger) -> Self {
        Self {
            ledger,
            ..Default::default()
        }
    }

    pub fn ledger(&self) -> &ContentLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ContentLedger {
        &mut self.ledger
    }

    /// Select an element, dropping uncommitted edits of the previous one
    pub fn select(&mut self, surface: &dyn RenderSurface, element: ElementRef) -> Result<&SelectedElement, BridgeError> {
        let selected = SelectedElement::capture(surface, element)?;
        if !self.edits.is_empty() {
            debug!(edits = self.edits.len(), "Discarding uncommitted edits");
        }
        self.clear_edits();

        debug!(element = %element, widget_id = ?selected.widget_id, "Element selected");
        Ok(self.selection.insert(selected))
    }

    pub fn deselect(&mut self) {
        self.selection = None;
        self.clear_edits();
    }

    pub fn selected(&self) -> Option<&SelectedElement> {
        self.selection.as_ref()
    }

    pub fn active_panel(&self) -> Option<CustomizationPanel> {
        self.selection.as_ref().map(SelectedElement::panel)
    }

    /// Recorded edits, keyed by field
    pub fn edits(&self) -> &BTreeMap<PanelField, String> {
        &self.edits
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Current value of a field as the panel shows it
    ///
    /// Recorded edits win; otherwise the live value is read, with colors
    /// normalized to hex.
    pub fn panel_value(&self, surface: &dyn RenderSurface, field: PanelField) -> Result<String, BridgeError> {
        if let Some(value) = self.edits.get(&field) {
            return Ok(value.clone());
        }
        let selected = self.selection.as_ref().ok_or(BridgeError::NoSelection)?;
        Ok(display_value(field, read_field(surface, selected.element, field)?))
    }

    /// Every field of the active panel with its current value
    pub fn panel_values(&self, surface: &dyn RenderSurface) -> Result<Vec<(PanelField, String)>, BridgeError> {
        let panel = self.active_panel().ok_or(BridgeError::NoSelection)?;

        let mut fields: Vec<PanelField> = match panel {
            CustomizationPanel::Content => vec![PanelField::Text],
            CustomizationPanel::Media => vec![PanelField::Source],
            _ => Vec::new(),
        };
        fields.extend(panel.properties().map(PanelField::Style));

        fields
            .into_iter()
            .map(|field| Ok((field, self.panel_value(surface, field)?)))
            .collect()
    }

    /// Apply one panel edit to the live element
    pub fn apply_edit(&mut self, surface: &mut dyn RenderSurface, field: &str, value: &str) -> Result<(), BridgeError> {
        let field: PanelField = field.parse().map_err(BridgeError::UnknownField)?;
        let element = self.selection.as_ref().ok_or(BridgeError::NoSelection)?.element;

        if !surface.is_ready() {
            return Err(SurfaceError::NotReady.into());
        }

        let applied = self.write_field(surface, element, field, value);
        if let Err(BridgeError::Surface(SurfaceError::Detached(_))) = &applied {
            debug!(element = %element, "Selected element detached, clearing selection");
            self.deselect();
        }
        applied?;

        debug!(field = field.name(), value, "Applied panel edit");
        Ok(())
    }

    fn write_field(
        &mut self,
        surface: &mut dyn RenderSurface,
        element: ElementRef,
        field: PanelField,
        value: &str,
    ) -> Result<(), BridgeError> {
        if !self.baseline.contains_key(&field) {
            let original = read_field(surface, element, field)?;
            self.baseline.insert(field, original);
        }

        match field {
            PanelField::Style(property) => surface.set_style(element, property.css_name(), value)?,
            PanelField::Text => surface.set_text(element, value)?,
            PanelField::Source => surface.set_attribute(element, "src", value)?,
            PanelField::Link => surface.set_attribute(element, "href", value)?,
        }

        let unchanged = self
            .baseline
            .get(&field)
            .is_some_and(|original| same_value(field, original, value));

        if unchanged {
            self.edits.remove(&field);
            return Ok(());
        }

        if field == PanelField::Text {
            if let Some(region) = self.selection.as_ref().and_then(SelectedElement::region) {
                self.ledger.mark_user_edited(region);
            }
        }
        self.edits.insert(field, value.to_string());
        Ok(())
    }

    /// Push recorded edits into the widget tree
    ///
    /// Returns `Ok(None)` when there is nothing to commit or the element
    /// does not belong to a widget. Style edits merge into the widget's
    /// `styles` map; text and media edits set the matching data keys.
    pub fn commit(&mut self, session: &mut EditSession) -> Result<Option<MutationResult>, BridgeError> {
        let selected = self.selection.as_ref().ok_or(BridgeError::NoSelection)?;
        if self.edits.is_empty() {
            return Ok(None);
        }
        let Some(widget_id) = selected.widget_id.clone() else {
            return Ok(None);
        };

        let Some(widget) = session.widget(&widget_id) else {
            self.deselect();
            if session.selected_id() == Some(widget_id.as_str()) {
                session.deselect();
            }
            return Err(EditorError::StaleSelection(widget_id).into());
        };

        let mut patch = WidgetData::new();
        let mut styles = match widget.field(STYLES_KEY) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => WidgetData::new(),
        };
        let mut styles_touched = false;

        for (field, value) in &self.edits {
            match field {
                PanelField::Style(property) => {
                    styles_touched = true;
                    if value.is_empty() {
                        styles.remove(property.css_name());
                    } else {
                        styles.insert(property.css_name().to_string(), Value::String(value.clone()));
                    }
                }
                PanelField::Text => {
                    let key = selected
                        .field
                        .clone()
                        .unwrap_or_else(|| default_text_field(&widget.widget_type).to_string());
                    patch.insert(key, Value::String(value.clone()));
                }
                PanelField::Source => {
                    patch.insert("src".to_string(), Value::String(value.clone()));
                }
                PanelField::Link => {
                    patch.insert("link".to_string(), Value::String(value.clone()));
                }
            }
        }

        if styles_touched {
            // updateWidget merges shallowly, so the whole map goes in
            patch.insert(STYLES_KEY.to_string(), Value::Object(styles));
        }

        let result = session.update_widget(&widget_id, patch)?;
        info!(widget_id = %widget_id, edits = self.edits.len(), "Committed panel edits");
        self.clear_edits();
        Ok(Some(result))
    }

    fn clear_edits(&mut self) {
        self.edits.clear();
        self.baseline.clear();
    }
}

fn read_field(surface: &dyn RenderSurface, element: ElementRef, field: PanelField) -> Result<String, SurfaceError> {
    match field {
        PanelField::Style(property) => surface.computed_style(element, property.css_name()),
        PanelField::Text => surface.text(element),
        PanelField::Source => Ok(surface.attribute(element, "src")?.unwrap_or_default()),
        PanelField::Link => Ok(surface.attribute(element, "href")?.unwrap_or_default()),
    }
}

fn display_value(field: PanelField, value: String) -> String {
    match field {
        PanelField::Style(property) if property.is_color() => rgb_to_hex(&value).unwrap_or(value),
        _ => value,
    }
}

fn same_value(field: PanelField, a: &str, b: &str) -> bool {
    match field {
        PanelField::Style(property) if property.is_color() => match (rgb_to_hex(a), rgb_to_hex(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a.trim() == b.trim(),
        },
        PanelField::Style(StyleProperty::FontFamily) => a.trim().eq_ignore_ascii_case(b.trim()),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VElement, VirtualSurface, FIELD_ATTRIBUTE};
    use pagecraft_compiler_html::WIDGET_ID_ATTRIBUTE;
    use pagecraft_editor::{EditorConfig, WidgetIdGenerator};
    use serde_json::json;

    fn frozen() -> i64 {
        7
    }

    fn setup() -> (EditSession, VirtualSurface, ElementRef, String) {
        let mut session = EditSession::new("bridge", EditorConfig::default())
            .with_id_generator(WidgetIdGenerator::with_clock(frozen));
        let button = session.add_widget("button").unwrap();

        let mut surface = VirtualSurface::ready();
        let element = surface.mount(
            &button.id,
            VElement::new("button")
                .with_attr(WIDGET_ID_ATTRIBUTE, button.id.as_str())
                .with_attr(FIELD_ATTRIBUTE, "text")
                .with_text("Click Me"),
        );
        (session, surface, element, button.id)
    }

    #[test]
    fn test_edit_without_selection() {
        let mut surface = VirtualSurface::ready();
        let mut bridge = StyleBridge::new();
        assert!(matches!(
            bridge.apply_edit(&mut surface, "color", "#ff0000"),
            Err(BridgeError::NoSelection)
        ));
    }

    #[test]
    fn test_unknown_field() {
        let (_, mut surface, element, _) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        assert!(matches!(
            bridge.apply_edit(&mut surface, "sparkle", "yes"),
            Err(BridgeError::UnknownField(f)) if f == "sparkle"
        ));
    }

    #[test]
    fn test_style_edit_applies_and_records() {
        let (_, mut surface, element, _) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        bridge.apply_edit(&mut surface, "backgroundColor", "#3b82f6").unwrap();

        assert_eq!(surface.computed_style(element, "background-color").unwrap(), "#3b82f6");
        assert_eq!(
            bridge.edits().get(&PanelField::Style(StyleProperty::BackgroundColor)).map(String::as_str),
            Some("#3b82f6")
        );
    }

    #[test]
    fn test_edit_matching_computed_style_is_not_recorded() {
        let (_, mut surface, element, _) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        // Computed color is rgb(0, 0, 0)
        bridge.apply_edit(&mut surface, "color", "#000000").unwrap();
        assert!(!bridge.has_pending_edits());

        bridge.apply_edit(&mut surface, "color", "#ff0000").unwrap();
        assert!(bridge.has_pending_edits());

        // Back to the original drops the edit
        bridge.apply_edit(&mut surface, "color", "rgb(0, 0, 0)").unwrap();
        assert!(!bridge.has_pending_edits());
    }

    #[test]
    fn test_panel_values_are_hex() {
        let (_, surface, element, _) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        assert_eq!(
            bridge
                .panel_value(&surface, PanelField::Style(StyleProperty::BackgroundColor))
                .unwrap(),
            "#ffffff"
        );
        assert_eq!(bridge.panel_value(&surface, PanelField::Text).unwrap(), "Click Me");

        let values = bridge.panel_values(&surface).unwrap();
        assert_eq!(values[0], (PanelField::Text, "Click Me".to_string()));
        assert!(values.iter().any(|(field, _)| *field == PanelField::Style(StyleProperty::FontSize)));
    }

    #[test]
    fn test_text_edit_marks_region_user_edited() {
        let (_, mut surface, element, widget_id) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        bridge.apply_edit(&mut surface, "text", "Buy Now").unwrap();

        assert_eq!(surface.text(element).unwrap(), "Buy Now");
        assert!(bridge.ledger().is_user_edited(&widget_id));
    }

    #[test]
    fn test_unchanged_text_leaves_region_seeded() {
        let (_, mut surface, element, widget_id) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        bridge.apply_edit(&mut surface, "text", "Click Me").unwrap();

        assert!(!bridge.has_pending_edits());
        assert!(!bridge.ledger().is_user_edited(&widget_id));
    }

    #[test]
    fn test_commit_updates_widget() {
        let (mut session, mut surface, element, widget_id) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        bridge.apply_edit(&mut surface, "text", "Buy Now").unwrap();
        bridge.apply_edit(&mut surface, "backgroundColor", "#3b82f6").unwrap();
        let result = bridge.commit(&mut session).unwrap();

        assert!(result.is_some());
        assert!(!bridge.has_pending_edits());

        let widget = session.widget(&widget_id).unwrap();
        assert_eq!(widget.text_field("text"), Some("Buy Now"));
        assert_eq!(widget.text_field("link"), Some("#"));
        assert_eq!(widget.field("styles"), Some(&json!({ "background-color": "#3b82f6" })));
    }

    #[test]
    fn test_commit_merges_existing_styles() {
        let (mut session, mut surface, element, widget_id) = setup();
        session
            .update_widget(
                &widget_id,
                json!({ "styles": { "color": "#ffffff" } }).as_object().unwrap().clone(),
            )
            .unwrap();

        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();
        bridge.apply_edit(&mut surface, "padding", "12px").unwrap();
        bridge.commit(&mut session).unwrap();

        assert_eq!(
            session.widget(&widget_id).unwrap().field("styles"),
            Some(&json!({ "color": "#ffffff", "padding": "12px" }))
        );
    }

    #[test]
    fn test_commit_for_deleted_widget_is_stale() {
        let (mut session, mut surface, element, widget_id) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();
        bridge.apply_edit(&mut surface, "color", "#ff0000").unwrap();

        session.delete_widget(&widget_id).unwrap();

        let result = bridge.commit(&mut session);
        assert!(matches!(
            result,
            Err(BridgeError::Editor(EditorError::StaleSelection(id))) if id == widget_id
        ));
        assert!(bridge.selected().is_none());
    }

    #[test]
    fn test_detached_element_clears_selection() {
        let (_, mut surface, element, widget_id) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        surface.render_region(&widget_id, "<button>Fresh</button>").unwrap();

        let result = bridge.apply_edit(&mut surface, "color", "#ff0000");
        assert!(matches!(result, Err(BridgeError::Surface(SurfaceError::Detached(_)))));
        assert!(bridge.selected().is_none());
    }

    #[test]
    fn test_not_ready_surface_rejects_edits() {
        let (_, mut surface, element, _) = setup();
        let mut bridge = StyleBridge::new();
        bridge.select(&surface, element).unwrap();

        surface.set_ready(false);
        let result = bridge.apply_edit(&mut surface, "color", "#ff0000");
        assert!(matches!(result, Err(BridgeError::Surface(SurfaceError::NotReady))));
        assert!(bridge.selected().is_some());
    }

    #[test]
    fn test_selecting_another_element_discards_edits() {
        let (_, mut surface, element, _) = setup();
        let other = surface.mount("other", VElement::new("img").with_attr("src", "a.png"));
        let mut bridge = StyleBridge::new();

        bridge.select(&surface, element).unwrap();
        bridge.apply_edit(&mut surface, "color", "#ff0000").unwrap();
        bridge.select(&surface, other).unwrap();

        assert!(!bridge.has_pending_edits());
        assert_eq!(bridge.active_panel(), Some(CustomizationPanel::Media));
        assert_eq!(bridge.panel_value(&surface, PanelField::Source).unwrap(), "a.png");
    }
}

//! Panel field ↔ CSS property mapping
//!
//! Every customization panel reads and writes styles through [`StyleProperty`],
//! so the logical field name (`backgroundColor`) and the CSS property
//! (`background-color`) are defined in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! style_properties {
    ($($variant:ident => $field:literal, $css:literal, $panel:ident;)*) => {
        /// Style property editable from a customization panel
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum StyleProperty {
            $($variant,)*
        }

        impl StyleProperty {
            pub const ALL: &'static [StyleProperty] = &[$(StyleProperty::$variant,)*];

            /// Logical (camelCase) field name used by the panel
            pub fn field(&self) -> &'static str {
                match self {
                    $(StyleProperty::$variant => $field,)*
                }
            }

            /// CSS property name
            pub fn css_name(&self) -> &'static str {
                match self {
                    $(StyleProperty::$variant => $css,)*
                }
            }

            pub fn panel(&self) -> CustomizationPanel {
                match self {
                    $(StyleProperty::$variant => CustomizationPanel::$panel,)*
                }
            }
        }
    };
}

style_properties! {
    BackgroundColor => "backgroundColor", "background-color", Colors;
    Color => "color", "color", Colors;
    BorderColor => "borderColor", "border-color", Colors;
    FontFamily => "fontFamily", "font-family", Typography;
    FontSize => "fontSize", "font-size", Typography;
    FontWeight => "fontWeight", "font-weight", Typography;
    LineHeight => "lineHeight", "line-height", Typography;
    LetterSpacing => "letterSpacing", "letter-spacing", Typography;
    TextAlign => "textAlign", "text-align", Typography;
    Padding => "padding", "padding", Layout;
    Margin => "margin", "margin", Layout;
    Width => "width", "width", Layout;
    Height => "height", "height", Layout;
    BorderRadius => "borderRadius", "border-radius", Layout;
    Opacity => "opacity", "opacity", Layout;
}

impl StyleProperty {
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|property| property.field() == field)
    }

    pub fn from_css(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|property| property.css_name() == name)
    }

    /// Values are colors and get normalized to hex
    pub fn is_color(&self) -> bool {
        self.panel() == CustomizationPanel::Colors
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Customization sub-panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomizationPanel {
    Colors,
    Typography,
    Content,
    Media,
    Layout,
}

impl CustomizationPanel {
    /// Panel opened when an element with `tag_name` is selected
    pub fn for_tag(tag_name: &str) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "img" | "video" | "picture" | "iframe" | "figure" => CustomizationPanel::Media,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "span" | "a" | "button" | "label" | "li"
            | "blockquote" | "strong" | "em" => CustomizationPanel::Content,
            "section" | "div" | "header" | "footer" | "main" | "nav" | "article" | "aside" => {
                CustomizationPanel::Layout
            }
            _ => CustomizationPanel::Colors,
        }
    }

    /// Style properties shown on this panel
    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        let panel = *self;
        StyleProperty::ALL
            .iter()
            .copied()
            .filter(move |property| match panel {
                // Content edits text first, with its typography alongside
                CustomizationPanel::Content => property.panel() == CustomizationPanel::Typography,
                CustomizationPanel::Media => matches!(
                    property,
                    StyleProperty::Width | StyleProperty::Height | StyleProperty::BorderRadius
                ),
                other => property.panel() == other,
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomizationPanel::Colors => "colors",
            CustomizationPanel::Typography => "typography",
            CustomizationPanel::Content => "content",
            CustomizationPanel::Media => "media",
            CustomizationPanel::Layout => "layout",
        }
    }
}

/// What a panel edit targets on the live element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelField {
    Style(StyleProperty),
    /// Text content
    Text,
    /// Image/video `src`
    Source,
    /// Link `href`
    Link,
}

impl PanelField {
    pub fn name(&self) -> &'static str {
        match self {
            PanelField::Style(property) => property.field(),
            PanelField::Text => "text",
            PanelField::Source => "src",
            PanelField::Link => "href",
        }
    }
}

impl FromStr for PanelField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "textContent" => Ok(PanelField::Text),
            "src" | "imageUrl" => Ok(PanelField::Source),
            "href" | "link" => Ok(PanelField::Link),
            other => StyleProperty::from_field(other)
                .or_else(|| StyleProperty::from_css(other))
                .map(PanelField::Style)
                .ok_or_else(|| other.to_string()),
        }
    }
}

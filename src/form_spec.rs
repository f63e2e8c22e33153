//! JSON form descriptions.
//!
//! A description names the form's metadata and lists its elements in render
//! order. Every attribute except the element type is optional and falls
//! back to the defaults a freshly added element gets.
//!
//! ```json
//! {
//!   "title": "Pizza order",
//!   "theme": "blue",
//!   "font": "times-roman",
//!   "elements": [
//!     { "type": "text", "label": "Name", "required": true },
//!     { "type": "checkbox", "label": "Toppings", "options": ["Ham", "Olives"] },
//!     { "type": "freetext", "content": "Thank you!" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::{ElementKind, ElementStore, ElementUpdate};
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::theme::ThemeId;

/// Top-level form description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSpec {
    /// Form title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description; line breaks start new lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Theme identifier, e.g. `"dark"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Font identifier, e.g. `"courier-bold"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Elements in render order
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// One element of a [`FormSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    /// Element type name (`text`, `checkbox`, `radio`, `dropdown`,
    /// `textarea`, `freetext`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Label drawn above the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the field must be filled in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Label size, clamped to 8..=24
    #[serde(default, rename = "fontSize", alias = "font_size", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Choices of a checkbox, radio or dropdown element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Text of a free-text element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ElementSpec {
    fn update(&self) -> ElementUpdate {
        let mut update = ElementUpdate::new();
        if let Some(label) = &self.label {
            update = update.label(label.clone());
        }
        if let Some(required) = self.required {
            update = update.required(required);
        }
        if let Some(size) = self.font_size {
            update = update.font_size(size);
        }
        if let Some(options) = &self.options {
            update = update.options(options.iter().map(|o| o.trim()).filter(|o| !o.is_empty()));
        }
        if let Some(content) = &self.content {
            update = update.content(content.clone());
        }
        update
    }
}

impl FormSpec {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded form description {}", path.display());
        Self::from_json(&json)
    }

    /// Serialize back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build an element store holding this form.
    ///
    /// Unknown theme, font or element type names are rejected; nothing is
    /// partially built in that case.
    pub fn into_store(self) -> Result<ElementStore> {
        let theme = self.theme.as_deref().map(str::parse::<ThemeId>).transpose()?;
        let font = self
            .font
            .as_deref()
            .map(str::parse::<StandardFont>)
            .transpose()?;
        let kinds = self
            .elements
            .iter()
            .map(|element| element.kind.parse::<ElementKind>())
            .collect::<Result<Vec<_>>>()?;

        let mut store = ElementStore::new();
        if let Some(title) = self.title {
            store.set_title(title);
        }
        if let Some(description) = self.description {
            store.set_description(description);
        }
        if let Some(theme) = theme {
            store.set_theme(theme);
        }
        if let Some(font) = font {
            store.set_font(font);
        }

        for (element, kind) in self.elements.iter().zip(kinds) {
            let id = store.add(kind);
            store.update(id, element.update());
        }
        log::info!("Built form with {} elements", store.len());
        Ok(store)
    }
}

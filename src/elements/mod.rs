//! Form element model.
//!
//! A form is an ordered list of [`FormElement`]s. Each element has one of six
//! kinds, and the kind-specific data (choice options, static text) lives in
//! the [`ElementBody`] variant so an element can never carry options it does
//! not use.
//!
//! ## Example
//!
//! ```
//! use form_oxide::elements::{ElementKind, ElementStore, ElementUpdate};
//!
//! let mut store = ElementStore::new();
//! let id = store.add(ElementKind::Checkbox);
//! store.update(id, ElementUpdate::new().label("Toppings").options_csv("Ham, Olives"));
//!
//! let element = store.get(id).unwrap();
//! assert_eq!(element.label, "Toppings");
//! assert_eq!(element.options().unwrap(), ["Ham", "Olives"]);
//! ```

mod store;

pub use store::{ElementStore, FormDocument, DEFAULT_DESCRIPTION, DEFAULT_TITLE};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder text of a new static-text element.
pub const DEFAULT_FREE_TEXT: &str = "Enter your text here";

/// Number of placeholder options given to a new choice element.
const DEFAULT_OPTION_COUNT: usize = 3;

/// Stable identity of an element within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw id value, e.g. to look an element up.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

/// The six element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Single-line text field
    Text,
    /// Group of independent checkboxes
    Checkbox,
    /// Group of mutually exclusive radio buttons
    Radio,
    /// Drop-down list
    Dropdown,
    /// Multi-line text field
    #[serde(rename = "textarea")]
    TextArea,
    /// Static text, not fillable
    #[serde(rename = "freetext")]
    FreeText,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Text,
        ElementKind::Checkbox,
        ElementKind::Radio,
        ElementKind::Dropdown,
        ElementKind::TextArea,
        ElementKind::FreeText,
    ];

    /// Type name used in form descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Radio => "radio",
            ElementKind::Dropdown => "dropdown",
            ElementKind::TextArea => "textarea",
            ElementKind::FreeText => "freetext",
        }
    }

    /// Type name with its first letter capitalised, as used in default labels.
    pub fn title(&self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Checkbox => "Checkbox",
            ElementKind::Radio => "Radio",
            ElementKind::Dropdown => "Dropdown",
            ElementKind::TextArea => "Textarea",
            ElementKind::FreeText => "Freetext",
        }
    }

    /// Whether elements of this kind carry an option list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            ElementKind::Checkbox | ElementKind::Radio | ElementKind::Dropdown
        )
    }

    /// Whether elements of this kind become fillable fields.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ElementKind::FreeText)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidElementKind(s.to_string()))
    }
}

/// Label and field font size, kept within 8..=24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u8);

impl FontSize {
    /// Smallest allowed size.
    pub const MIN: u8 = 8;
    /// Largest allowed size.
    pub const MAX: u8 = 24;

    /// Create a font size, clamping out-of-range values.
    pub fn new(size: u32) -> Self {
        Self(size.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    /// Size in points.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Size in points as a float, for text operations.
    pub fn as_f32(&self) -> f32 {
        self.0 as f32
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(12)
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementBody {
    /// Single-line text field
    Text,
    /// Checkbox group
    Checkbox {
        /// One checkbox per option, top to bottom
        options: Vec<String>,
    },
    /// Radio group
    Radio {
        /// One radio button per option, top to bottom
        options: Vec<String>,
    },
    /// Drop-down list
    Dropdown {
        /// Choices, in display order
        options: Vec<String>,
    },
    /// Multi-line text field
    TextArea,
    /// Static text
    FreeText {
        /// Text drawn on the page
        content: String,
    },
}

impl ElementBody {
    /// Body of a freshly added element of `kind`.
    pub fn default_for(kind: ElementKind) -> Self {
        let options = || {
            (1..=DEFAULT_OPTION_COUNT)
                .map(|i| format!("Option {}", i))
                .collect::<Vec<_>>()
        };

        match kind {
            ElementKind::Text => ElementBody::Text,
            ElementKind::Checkbox => ElementBody::Checkbox { options: options() },
            ElementKind::Radio => ElementBody::Radio { options: options() },
            ElementKind::Dropdown => ElementBody::Dropdown { options: options() },
            ElementKind::TextArea => ElementBody::TextArea,
            ElementKind::FreeText => ElementBody::FreeText {
                content: DEFAULT_FREE_TEXT.to_string(),
            },
        }
    }

    /// The kind this body belongs to.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Text => ElementKind::Text,
            ElementBody::Checkbox { .. } => ElementKind::Checkbox,
            ElementBody::Radio { .. } => ElementKind::Radio,
            ElementBody::Dropdown { .. } => ElementKind::Dropdown,
            ElementBody::TextArea => ElementKind::TextArea,
            ElementBody::FreeText { .. } => ElementKind::FreeText,
        }
    }

    /// Option list of a choice body.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            ElementBody::Checkbox { options }
            | ElementBody::Radio { options }
            | ElementBody::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            ElementBody::Checkbox { options }
            | ElementBody::Radio { options }
            | ElementBody::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    /// Text of a static-text body.
    pub fn content(&self) -> Option<&str> {
        match self {
            ElementBody::FreeText { content } => Some(content),
            _ => None,
        }
    }
}

/// One visual or interactive unit of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormElement {
    /// Identity assigned by the store
    pub id: ElementId,
    /// Label drawn above the field
    pub label: String,
    /// Whether the field must be filled in
    pub required: bool,
    /// Size of the label and static text
    pub font_size: FontSize,
    /// Kind-specific data
    pub body: ElementBody,
}

impl FormElement {
    /// A new element of `kind` with default label, size and body.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            label: format!("{} {}", kind.title(), id.value()),
            required: false,
            font_size: FontSize::default(),
            body: ElementBody::default_for(kind),
        }
    }

    /// Element kind. Fixed at creation.
    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    /// Option list, for choice elements.
    pub fn options(&self) -> Option<&[String]> {
        self.body.options()
    }

    /// Static text, for free-text elements.
    pub fn content(&self) -> Option<&str> {
        self.body.content()
    }

    /// Name of the interactive field created for this element.
    pub fn field_name(&self) -> String {
        format!("field-{}", self.id)
    }
}

/// Partial update of an element's attributes.
///
/// Only the attributes that were set are changed; everything else is left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    label: Option<String>,
    required: Option<bool>,
    font_size: Option<u32>,
    options: Option<Vec<String>>,
    content: Option<String>,
}

impl ElementUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the required flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the font size. Out-of-range sizes are clamped to 8..=24.
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Replace the option list of a choice element.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the option list from a comma-separated string.
    ///
    /// Entries are trimmed and blank entries dropped, so `"A, B,,C "`
    /// yields `["A", "B", "C"]`.
    pub fn options_csv(self, csv: &str) -> Self {
        self.options(
            csv.split(',')
                .map(str::trim)
                .filter(|option| !option.is_empty()),
        )
    }

    /// Set the text of a static-text element.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set attributes into `element`.
    ///
    /// Attributes that do not apply to the element's kind, and empty option
    /// lists, are ignored.
    pub(crate) fn apply_to(self, element: &mut FormElement) {
        if let Some(label) = self.label {
            element.label = label;
        }
        if let Some(required) = self.required {
            element.required = required;
        }
        if let Some(size) = self.font_size {
            element.font_size = FontSize::new(size);
        }

        if let Some(options) = self.options {
            match element.body.options_mut() {
                Some(_) if options.is_empty() => {
                    log::warn!("Ignoring empty option list for {}", element.id);
                },
                Some(current) => *current = options,
                None => {
                    log::debug!("{} has no options, ignoring option update", element.id);
                },
            }
        }

        if let Some(content) = self.content {
            match &mut element.body {
                ElementBody::FreeText { content: current } => *current = content,
                _ => log::debug!("{} has no static text, ignoring content update", element.id),
            }
        }
    }
}

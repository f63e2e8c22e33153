//! Text field widget.
//!
//! Implements text input fields per ISO 32000-1:2008 Section 12.7.4.3.

use super::{insert_flags, widget_base, FormFieldWidget, TextFieldFlags, WidgetStyle};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// Font size 0 tells the viewer to fit entered text to the field.
const AUTO_FONT_SIZE: f32 = 0.0;

/// A single-line or multi-line text input.
#[derive(Debug, Clone)]
pub struct TextFieldWidget {
    name: String,
    rect: Rect,
    flags: TextFieldFlags,
    font_resource: String,
    font_size: f32,
    style: WidgetStyle,
}

impl TextFieldWidget {
    /// Create an empty single-line text field.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            flags: TextFieldFlags::empty(),
            font_resource: "Helv".to_string(),
            font_size: AUTO_FONT_SIZE,
            style: WidgetStyle::default(),
        }
    }

    /// Allow multiple lines of text.
    pub fn multiline(mut self) -> Self {
        self.flags |= TextFieldFlags::MULTILINE;
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.flags |= TextFieldFlags::REQUIRED;
        self
    }

    /// Font resource (from the AcroForm `/DR`) and size for entered text.
    pub fn with_font(mut self, resource: impl Into<String>, size: f32) -> Self {
        self.font_resource = resource.into();
        self.font_size = size;
        self
    }

    /// Border and background style.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the multiline flag is set.
    pub fn is_multiline(&self) -> bool {
        self.flags.contains(TextFieldFlags::MULTILINE)
    }
}

impl FormFieldWidget for TextFieldWidget {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn field_type(&self) -> &'static str {
        "Tx"
    }

    fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn style(&self) -> &WidgetStyle {
        &self.style
    }

    fn build_field_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("FT".to_string(), Object::Name("Tx".to_string()));
        dict.insert("T".to_string(), Object::text(&self.name));
        dict.insert("V".to_string(), Object::text(""));
        dict.insert(
            "DA".to_string(),
            self.style.default_appearance(&self.font_resource, self.font_size),
        );
        insert_flags(&mut dict, self.flags.bits());
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dictionary {
        let mut dict = widget_base(self.rect, page_ref);
        self.style.insert_into(&mut dict, None);
        dict
    }
}

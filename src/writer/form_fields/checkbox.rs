//! Checkbox widget.
//!
//! Implements checkbox fields per ISO 32000-1:2008 Section 12.7.4.2.3.
//! A checkbox starts unchecked; its `/AP` carries an on state named after
//! the export value and an `/Off` state.

use super::{insert_flags, widget_base, ButtonFieldFlags, FormFieldWidget, WidgetStyle};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// ZapfDingbats check mark, used by viewers that rebuild the appearance.
const CHECK_GLYPH: &str = "4";

/// An independent on/off button.
#[derive(Debug, Clone)]
pub struct CheckboxWidget {
    name: String,
    rect: Rect,
    export_value: String,
    flags: ButtonFieldFlags,
    style: WidgetStyle,
}

impl CheckboxWidget {
    /// Create an unchecked checkbox.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            export_value: "Yes".to_string(),
            flags: ButtonFieldFlags::empty(),
            style: WidgetStyle::default(),
        }
    }

    /// Name of the on state (the value submitted when checked).
    pub fn with_export_value(mut self, value: impl Into<String>) -> Self {
        self.export_value = value.into();
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.flags |= ButtonFieldFlags::REQUIRED;
        self
    }

    /// Border and background style.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Name of the on state.
    pub fn export_value(&self) -> &str {
        &self.export_value
    }
}

impl FormFieldWidget for CheckboxWidget {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn field_type(&self) -> &'static str {
        "Btn"
    }

    fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn style(&self) -> &WidgetStyle {
        &self.style
    }

    fn build_field_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("FT".to_string(), Object::Name("Btn".to_string()));
        dict.insert("T".to_string(), Object::text(&self.name));
        dict.insert("V".to_string(), Object::Name("Off".to_string()));
        insert_flags(&mut dict, self.flags.bits());
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dictionary {
        let mut dict = widget_base(self.rect, page_ref);
        dict.insert("AS".to_string(), Object::Name("Off".to_string()));
        self.style.insert_into(&mut dict, Some(CHECK_GLYPH));
        dict
    }
}

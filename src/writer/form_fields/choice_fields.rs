//! Drop-down choice field.
//!
//! Implements combo boxes per ISO 32000-1:2008 Section 12.7.4.4.

use super::{insert_flags, widget_base, ChoiceFieldFlags, FormFieldWidget, WidgetStyle};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// A drop-down list of fixed options.
#[derive(Debug, Clone)]
pub struct ComboBoxWidget {
    name: String,
    rect: Rect,
    options: Vec<String>,
    flags: ChoiceFieldFlags,
    font_resource: String,
    font_size: f32,
    style: WidgetStyle,
}

impl ComboBoxWidget {
    /// Create a combo box without options and without a selection.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            options: Vec::new(),
            flags: ChoiceFieldFlags::COMBO,
            font_resource: "Helv".to_string(),
            font_size: 0.0,
            style: WidgetStyle::default(),
        }
    }

    /// Set the option list, in display order.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.flags |= ChoiceFieldFlags::REQUIRED;
        self
    }

    /// Font resource and size of the displayed choice.
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

    /// The options.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl FormFieldWidget for ComboBoxWidget {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn field_type(&self) -> &'static str {
        "Ch"
    }

    fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn style(&self) -> &WidgetStyle {
        &self.style
    }

    fn build_field_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("FT".to_string(), Object::Name("Ch".to_string()));
        dict.insert("T".to_string(), Object::text(&self.name));
        dict.insert(
            "Opt".to_string(),
            Object::Array(self.options.iter().map(|o| Object::text(o)).collect()),
        );
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

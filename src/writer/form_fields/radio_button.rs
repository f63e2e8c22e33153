//! Radio button groups.
//!
//! Implements radio button fields per ISO 32000-1:2008 Section 12.7.4.2.4.
//! The group is a parent field holding the value; each option is a kid
//! widget whose on-state name is its index in the group. The option texts
//! travel in the parent's `/Opt` array, so repeated texts or a text of
//! `Off` still give every option its own state.

use super::{widget_base, ButtonFieldFlags, WidgetStyle};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// Bullet glyph, used by viewers that rebuild the appearance.
const BULLET_GLYPH: &str = "l";

/// A group of mutually exclusive buttons.
#[derive(Debug, Clone)]
pub struct RadioButtonGroup {
    name: String,
    buttons: Vec<RadioButtonWidget>,
    flags: ButtonFieldFlags,
}

/// One option of a radio group.
#[derive(Debug, Clone)]
pub struct RadioButtonWidget {
    export_value: String,
    rect: Rect,
    style: WidgetStyle,
}

impl RadioButtonGroup {
    /// Create an empty group with nothing selected.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: Vec::new(),
            flags: ButtonFieldFlags::RADIO | ButtonFieldFlags::NO_TOGGLE_TO_OFF,
        }
    }

    /// Add an option; returns the on-state name it was given.
    pub fn push_button(&mut self, widget: RadioButtonWidget) -> String {
        let state = on_state_name(self.buttons.len());
        self.buttons.push(widget);
        state
    }

    /// On-state name the next added option will get.
    pub fn next_on_state(&self) -> String {
        on_state_name(self.buttons.len())
    }

    /// Set or clear the required flag.
    pub fn set_required(&mut self, required: bool) {
        self.flags.set(ButtonFieldFlags::REQUIRED, required);
    }

    /// Group field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options, in the order they were added.
    pub fn buttons(&self) -> &[RadioButtonWidget] {
        &self.buttons
    }

    /// Field flags value.
    pub fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    /// Parent field dictionary; `kids` are the option widgets.
    pub fn build_parent_dict(&self, kids: &[ObjectRef]) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("FT".to_string(), Object::Name("Btn".to_string()));
        dict.insert("T".to_string(), Object::text(&self.name));
        dict.insert("V".to_string(), Object::Name("Off".to_string()));
        dict.insert("Ff".to_string(), Object::Integer(self.flags.bits() as i64));
        dict.insert(
            "Opt".to_string(),
            Object::Array(self.buttons.iter().map(|b| Object::text(&b.export_value)).collect()),
        );
        dict.insert(
            "Kids".to_string(),
            Object::Array(kids.iter().map(|r| Object::Reference(*r)).collect()),
        );
        dict
    }
}

fn on_state_name(index: usize) -> String {
    index.to_string()
}

impl RadioButtonWidget {
    /// Create an option with the given export value.
    pub fn new(export_value: impl Into<String>, rect: Rect) -> Self {
        Self {
            export_value: export_value.into(),
            rect,
            style: WidgetStyle::default(),
        }
    }

    /// Border and background style.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Value submitted when this option is selected.
    pub fn export_value(&self) -> &str {
        &self.export_value
    }

    /// Widget rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Style used for the appearance streams.
    pub fn style(&self) -> &WidgetStyle {
        &self.style
    }

    /// Kid widget dictionary.
    pub fn build_widget_dict(&self, page_ref: ObjectRef, parent_ref: ObjectRef) -> Dictionary {
        let mut dict = widget_base(self.rect, page_ref);
        dict.insert("Parent".to_string(), Object::Reference(parent_ref));
        dict.insert("AS".to_string(), Object::Name("Off".to_string()));
        self.style.insert_into(&mut dict, Some(BULLET_GLYPH));
        dict
    }
}

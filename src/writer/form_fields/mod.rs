//! Interactive form field widgets.
//!
//! Builders for the field and widget-annotation dictionaries of
//! ISO 32000-1:2008 Section 12.7 (Interactive Forms):
//!
//! - **Text fields** ([`TextFieldWidget`]): single-line and multi-line input
//! - **Checkboxes** ([`CheckboxWidget`]): independent on/off buttons
//! - **Radio groups** ([`RadioButtonGroup`]): one parent field with a kid
//!   widget per option
//! - **Combo boxes** ([`ComboBoxWidget`]): drop-down lists
//!
//! Every widget is drawn with a [`WidgetStyle`]: border width and colour,
//! background fill and text colour.

mod checkbox;
mod choice_fields;
mod field_flags;
mod form_appearance;
mod radio_button;
mod text_field;

pub use checkbox::CheckboxWidget;
pub use choice_fields::ComboBoxWidget;
pub use field_flags::{ButtonFieldFlags, ChoiceFieldFlags, TextFieldFlags};
pub use form_appearance::FormAppearanceGenerator;
pub use radio_button::{RadioButtonGroup, RadioButtonWidget};
pub use text_field::TextFieldWidget;

use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};
use crate::theme::Color;

use super::object_serializer::{format_real, ObjectSerializer};

/// Annotation flag bit 3: print the widget.
const ANNOT_PRINT: i64 = 4;

/// Visual style shared by all widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetStyle {
    /// Border width in points; 0 for none
    pub border_width: f32,
    /// Border colour
    pub border_color: Color,
    /// Background fill
    pub background: Color,
    /// Colour of entered text and check marks
    pub text_color: Color,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self {
            border_width: 1.0,
            border_color: Color::BLACK,
            background: Color::WHITE,
            text_color: Color::BLACK,
        }
    }
}

impl WidgetStyle {
    /// Add `/BS` (border style) and `/MK` (appearance characteristics).
    ///
    /// `caption` is the `/CA` glyph shown by viewers that rebuild button
    /// appearances themselves.
    fn insert_into(&self, dict: &mut Dictionary, caption: Option<&str>) {
        if self.border_width > 0.0 {
            dict.insert(
                "BS".to_string(),
                ObjectSerializer::dict(vec![
                    ("W", Object::Real(self.border_width as f64)),
                    ("S", ObjectSerializer::name("S")),
                ]),
            );
        }

        let (br, bg, bb) = self.border_color.components();
        let (fr, fg, fb) = self.background.components();
        let mut mk = ObjectSerializer::dict_map(vec![
            ("BC", Object::rgb(br, bg, bb)),
            ("BG", Object::rgb(fr, fg, fb)),
        ]);
        if let Some(ca) = caption {
            mk.insert("CA".to_string(), Object::text(ca));
        }
        dict.insert("MK".to_string(), Object::Dictionary(mk));
    }

    /// Default appearance string `/<font> <size> Tf <r> <g> <b> rg`.
    fn default_appearance(&self, font_resource: &str, font_size: f32) -> Object {
        let (r, g, b) = self.text_color.components();
        Object::String(
            format!(
                "/{} {} Tf {} {} {} rg",
                font_resource,
                format_real(font_size),
                format_real(r),
                format_real(g),
                format_real(b)
            )
            .into_bytes(),
        )
    }

    /// Appearance generator drawing this style.
    pub fn appearance(&self) -> FormAppearanceGenerator {
        FormAppearanceGenerator::new(*self)
    }
}

/// Entries shared by every widget annotation.
fn widget_base(rect: Rect, page_ref: ObjectRef) -> Dictionary {
    ObjectSerializer::dict_map(vec![
        ("Type", ObjectSerializer::name("Annot")),
        ("Subtype", ObjectSerializer::name("Widget")),
        ("Rect", ObjectSerializer::rect(rect)),
        ("P", Object::Reference(page_ref)),
        ("F", Object::Integer(ANNOT_PRINT)),
    ])
}

/// A field whose field dictionary and single widget annotation are merged
/// into one object.
pub trait FormFieldWidget {
    /// Fully qualified field name (`/T`).
    fn field_name(&self) -> &str;

    /// Widget rectangle.
    fn rect(&self) -> Rect;

    /// Field type name (Tx, Btn, Ch).
    fn field_type(&self) -> &'static str;

    /// Field flags value (`/Ff`).
    fn field_flags(&self) -> u32;

    /// Border and background style.
    fn style(&self) -> &WidgetStyle;

    /// Field dictionary entries.
    fn build_field_dict(&self) -> Dictionary;

    /// Widget annotation entries.
    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dictionary;

    /// Field and widget entries in one dictionary.
    fn build_merged_dict(&self, page_ref: ObjectRef) -> Dictionary {
        let mut dict = self.build_field_dict();
        dict.extend(self.build_widget_dict(page_ref));
        dict
    }
}

/// Insert `/Ff` when any flag is set.
fn insert_flags(dict: &mut Dictionary, bits: u32) {
    if bits != 0 {
        dict.insert("Ff".to_string(), Object::Integer(bits as i64));
    }
}

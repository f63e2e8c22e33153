//! PDF writing module for generating fillable forms.
//!
//! ## Architecture
//!
//! ```text
//! page drawing + form widgets
//!     ↓
//! [ContentStreamBuilder] (graphics/text operators → content stream bytes)
//! [form_fields] (widget dictionaries + appearance streams)
//!     ↓
//! [PdfWriter] (resources, AcroForm, complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use form_oxide::writer::{PdfWriter, TextFieldWidget};
//! use form_oxide::fonts::StandardFont;
//! use form_oxide::geometry::{Point, Rect};
//! use form_oxide::theme::Color;
//!
//! let mut writer = PdfWriter::new();
//! let font = writer.embed_font(StandardFont::Helvetica);
//! let mut page = writer.add_page(595.0, 842.0);
//! page.draw_text("Name", Point::new(50.0, 760.0), &font, 12.0, Color::BLACK)?;
//! page.add_text_field(TextFieldWidget::new("name", Rect::new(50.0, 730.0, 495.0, 25.0)))?;
//! let bytes = writer.finish()?;
//! ```

mod acroform;
mod content_stream;
pub mod form_fields;
mod image_handler;
mod object_serializer;
mod pdf_writer;

pub use acroform::AcroFormBuilder;
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use form_fields::{
    ButtonFieldFlags, CheckboxWidget, ChoiceFieldFlags, ComboBoxWidget, FormAppearanceGenerator,
    FormFieldWidget, RadioButtonGroup, RadioButtonWidget, TextFieldFlags, TextFieldWidget,
    WidgetStyle,
};
pub use image_handler::{ColorSpace, ImageData, ImageEncoding, ImageError};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{FontResource, ImageResource, PageBuilder, PdfWriter, PdfWriterConfig};

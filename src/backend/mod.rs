//! Document-generation capability.
//!
//! The assembler never touches PDF objects directly; it drives a
//! [`DocumentBackend`] with page, drawing and form-field calls. Two
//! implementations ship with the crate:
//!
//! - [`PdfBackend`](pdf::PdfBackend): produces a real PDF through
//!   [`crate::writer`]
//! - [`RecordingBackend`](recording::RecordingBackend): records every call,
//!   for tests and for printing a render plan
//!
//! Embedding and saving are asynchronous; drawing is synchronous because
//! it only appends to the page being built.

pub mod pdf;
pub mod recording;

pub use pdf::PdfBackend;
pub use recording::{BackendCall, CallLog, RecordingBackend};

use async_trait::async_trait;

use crate::error::Result;
use crate::fonts::StandardFont;
use crate::geometry::{Point, Rect, Size};
use crate::layout::TextMeasure;
use crate::theme::{Color, Theme};

/// A page added to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(pub usize);

/// An embedded standard font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontHandle {
    /// Which font
    pub font: StandardFont,
    /// Backend-specific resource name
    pub resource: String,
}

impl FontHandle {
    /// Create a handle.
    pub fn new(font: StandardFont, resource: impl Into<String>) -> Self {
        Self {
            font,
            resource: resource.into(),
        }
    }
}

/// An embedded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    /// Backend-specific resource name
    pub resource: String,
    natural: Size,
}

impl ImageHandle {
    /// Create a handle for an image of `natural` pixel size.
    pub fn new(resource: impl Into<String>, natural: Size) -> Self {
        Self {
            resource: resource.into(),
            natural,
        }
    }

    /// Natural width.
    pub fn width(&self) -> f32 {
        self.natural.width
    }

    /// Natural height.
    pub fn height(&self) -> f32 {
        self.natural.height
    }

    /// Natural size.
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Natural size multiplied by `factor`.
    pub fn scale(&self, factor: f32) -> Size {
        self.natural.scale(factor)
    }
}

/// Border and fill of a form field widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    /// Border width in points
    pub border_width: f32,
    /// Border colour
    pub border_color: Color,
    /// Fill colour
    pub background: Color,
    /// Colour of entered text
    pub text_color: Color,
}

impl FieldStyle {
    /// Fields drawn in `theme`: a 1pt border in the text colour over the
    /// field colour.
    pub fn themed(theme: &Theme) -> Self {
        Self {
            border_width: 1.0,
            border_color: theme.text,
            background: theme.field,
            text_color: theme.text,
        }
    }
}

/// What kind of interactive field to create.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Multi-line text input with a fixed font size
    MultilineText {
        /// Font size of entered text
        font_size: f32,
    },
    /// On/off checkbox
    Checkbox,
    /// One option of the radio group named by the request
    RadioOption {
        /// Export value of this option
        value: String,
    },
    /// Drop-down with a fixed option list
    Dropdown {
        /// Choices, in order
        options: Vec<String>,
    },
}

impl FieldKind {
    /// Short name used in logs and plans.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text field",
            FieldKind::MultilineText { .. } => "multi-line text field",
            FieldKind::Checkbox => "checkbox",
            FieldKind::RadioOption { .. } => "radio option",
            FieldKind::Dropdown { .. } => "dropdown",
        }
    }
}

/// A request to place an interactive field on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest {
    /// Field name; the group name for radio options
    pub name: String,
    /// Widget rectangle
    pub rect: Rect,
    /// Whether a value is required
    pub required: bool,
    /// Border and fill
    pub style: FieldStyle,
    /// Field kind
    pub kind: FieldKind,
}

impl FieldRequest {
    /// Create a request with an optional-value field.
    pub fn new(name: impl Into<String>, rect: Rect, style: FieldStyle, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            rect,
            required: false,
            style,
            kind,
        }
    }

    /// Set the required flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// The document-generation capability consumed by the assembler.
#[async_trait]
pub trait DocumentBackend: Send {
    /// Add a page of the given size.
    async fn add_page(&mut self, width: f32, height: f32) -> Result<PageHandle>;

    /// Embed one of the standard fonts.
    async fn embed_font(&mut self, font: StandardFont) -> Result<FontHandle>;

    /// Width of `text` set in `font` at `size` points.
    fn width_of_text_at_size(&self, font: &FontHandle, text: &str, size: f32) -> f32;

    /// Embed a PNG or JPEG image.
    async fn embed_image(&mut self, data: &[u8]) -> Result<ImageHandle>;

    /// Fill a rectangle.
    fn draw_rectangle(&mut self, page: PageHandle, rect: Rect, color: Color) -> Result<()>;

    /// Draw one line of text with its baseline origin at `origin`.
    fn draw_text(
        &mut self,
        page: PageHandle,
        text: &str,
        origin: Point,
        size: f32,
        font: &FontHandle,
        color: Color,
    ) -> Result<()>;

    /// Draw an image scaled into `rect`.
    fn draw_image(&mut self, page: PageHandle, image: &ImageHandle, rect: Rect) -> Result<()>;

    /// Create an interactive field and attach its widget to `page`.
    fn add_field(&mut self, page: PageHandle, field: FieldRequest) -> Result<()>;

    /// Serialize the document.
    async fn save(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Measures text through a backend font handle.
pub struct BackendMeasure<'a, B: DocumentBackend + ?Sized> {
    backend: &'a B,
    font: &'a FontHandle,
}

impl<'a, B: DocumentBackend + ?Sized> BackendMeasure<'a, B> {
    /// Measure with `font` as embedded in `backend`.
    pub fn new(backend: &'a B, font: &'a FontHandle) -> Self {
        Self { backend, font }
    }
}

impl<B: DocumentBackend + ?Sized> TextMeasure for BackendMeasure<'_, B> {
    fn width_of_text_at_size(&self, text: &str, size: f32) -> f32 {
        self.backend.width_of_text_at_size(self.font, text, size)
    }
}

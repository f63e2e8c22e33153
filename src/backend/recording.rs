//! [`DocumentBackend`] that records calls instead of producing a document.
//!
//! The call log is shared: keep a [`CallLog`] from
//! [`RecordingBackend::log`] before handing the backend to the assembler
//! and inspect it after the render, whatever its outcome.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{DocumentBackend, FieldRequest, FontHandle, ImageHandle, PageHandle};
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use crate::geometry::{Point, Rect, Size};
use crate::progress::RenderReporter;
use crate::theme::Color;

/// Natural size reported for embedded images unless configured otherwise.
const DEFAULT_IMAGE_SIZE: Size = Size {
    width: 100.0,
    height: 100.0,
};

/// One recorded capability call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `add_page`
    AddPage {
        /// Page width
        width: f32,
        /// Page height
        height: f32,
    },
    /// `embed_font`
    EmbedFont(StandardFont),
    /// `embed_image` with the size of the data
    EmbedImage {
        /// Byte length
        len: usize,
    },
    /// `draw_rectangle`
    DrawRectangle {
        /// Target page
        page: PageHandle,
        /// Filled area
        rect: Rect,
        /// Fill colour
        color: Color,
    },
    /// `draw_text`
    DrawText {
        /// Target page
        page: PageHandle,
        /// Text drawn
        text: String,
        /// Baseline origin
        origin: Point,
        /// Font size
        size: f32,
        /// Font used
        font: StandardFont,
        /// Fill colour
        color: Color,
    },
    /// `draw_image`
    DrawImage {
        /// Target page
        page: PageHandle,
        /// Image resource
        resource: String,
        /// Placement
        rect: Rect,
    },
    /// `add_field`
    AddField {
        /// Target page
        page: PageHandle,
        /// Field description
        field: FieldRequest,
    },
    /// `save`
    Save,
}

impl BackendCall {
    /// Operation name, as used in capability failures.
    pub fn operation(&self) -> &'static str {
        match self {
            BackendCall::AddPage { .. } => "add_page",
            BackendCall::EmbedFont(_) => "embed_font",
            BackendCall::EmbedImage { .. } => "embed_image",
            BackendCall::DrawRectangle { .. } => "draw_rectangle",
            BackendCall::DrawText { .. } => "draw_text",
            BackendCall::DrawImage { .. } => "draw_image",
            BackendCall::AddField { .. } => "add_field",
            BackendCall::Save => "save",
        }
    }
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendCall::AddPage { width, height } => write!(f, "add page {}x{}", width, height),
            BackendCall::EmbedFont(font) => write!(f, "embed font {}", font.base_font_name()),
            BackendCall::EmbedImage { len } => write!(f, "embed image ({} bytes)", len),
            BackendCall::DrawRectangle { rect, .. } => write!(
                f,
                "rectangle at ({:.1}, {:.1}) size {:.1}x{:.1}",
                rect.x, rect.y, rect.width, rect.height
            ),
            BackendCall::DrawText {
                text, origin, size, ..
            } => write!(f, "text {:?} at ({:.1}, {:.1}) size {}", text, origin.x, origin.y, size),
            BackendCall::DrawImage { resource, rect, .. } => write!(
                f,
                "image {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
                resource, rect.x, rect.y, rect.width, rect.height
            ),
            BackendCall::AddField { field, .. } => {
                write!(
                    f,
                    "{} {:?} at ({:.1}, {:.1}) size {:.1}x{:.1}",
                    field.kind.as_str(),
                    field.name,
                    field.rect.x,
                    field.rect.y,
                    field.rect.width,
                    field.rect.height
                )?;
                if field.required {
                    write!(f, " required")?;
                }
                Ok(())
            },
            BackendCall::Save => write!(f, "save"),
        }
    }
}

#[derive(Debug, Default)]
struct LogInner {
    calls: Vec<BackendCall>,
    progress: Vec<f32>,
}

/// Shared handle to the calls recorded by a [`RecordingBackend`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<LogInner>>,
}

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, LogInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: BackendCall, progress: Option<f32>) {
        let mut inner = self.lock();
        inner.calls.push(call);
        if let Some(p) = progress {
            inner.progress.push(p);
        }
    }

    /// All calls, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Progress reported at the moment of each call, when a reporter is
    /// observed.
    pub fn progress_trace(&self) -> Vec<f32> {
        self.lock().progress.clone()
    }

    /// Field requests, in order.
    pub fn fields(&self) -> Vec<FieldRequest> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::AddField { field, .. } => Some(field.clone()),
                _ => None,
            })
            .collect()
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.lock().calls.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().calls.is_empty()
    }
}

/// Backend that records calls and returns a textual plan from `save`.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: CallLog,
    pages: usize,
    images: usize,
    char_width: Option<f32>,
    image_size: Option<Size>,
    fail_on: Option<&'static str>,
    reporter: Option<RenderReporter>,
}

impl RecordingBackend {
    /// Backend measuring text with the real font metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure every character as `width` points at size 1.
    pub fn with_char_width(mut self, width: f32) -> Self {
        self.char_width = Some(width);
        self
    }

    /// Natural size reported for embedded images.
    pub fn with_image_size(mut self, size: Size) -> Self {
        self.image_size = Some(size);
        self
    }

    /// Fail the named operation with a capability failure.
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Snapshot the reporter's progress at every call.
    pub fn observe(mut self, reporter: &RenderReporter) -> Self {
        self.reporter = Some(reporter.clone());
        self
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        if self.fail_on == Some(call.operation()) {
            return Err(Error::capability(
                call.operation(),
                format!("{} rejected by recording backend", call.operation()),
            ));
        }
        let progress = self.reporter.as_ref().map(RenderReporter::progress);
        self.log.push(call, progress);
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for RecordingBackend {
    async fn add_page(&mut self, width: f32, height: f32) -> Result<PageHandle> {
        self.record(BackendCall::AddPage { width, height })?;
        self.pages += 1;
        Ok(PageHandle(self.pages - 1))
    }

    async fn embed_font(&mut self, font: StandardFont) -> Result<FontHandle> {
        self.record(BackendCall::EmbedFont(font))?;
        Ok(FontHandle::new(font, font.as_str()))
    }

    fn width_of_text_at_size(&self, font: &FontHandle, text: &str, size: f32) -> f32 {
        match self.char_width {
            Some(width) => text.chars().count() as f32 * width * size,
            None => font.font.width_of_text_at_size(text, size),
        }
    }

    async fn embed_image(&mut self, data: &[u8]) -> Result<ImageHandle> {
        self.record(BackendCall::EmbedImage { len: data.len() })?;
        if data.is_empty() {
            return Err(Error::capability("embed_image", "image data is empty"));
        }
        self.images += 1;
        Ok(ImageHandle::new(
            format!("image-{}", self.images),
            self.image_size.unwrap_or(DEFAULT_IMAGE_SIZE),
        ))
    }

    fn draw_rectangle(&mut self, page: PageHandle, rect: Rect, color: Color) -> Result<()> {
        self.record(BackendCall::DrawRectangle { page, rect, color })
    }

    fn draw_text(
        &mut self,
        page: PageHandle,
        text: &str,
        origin: Point,
        size: f32,
        font: &FontHandle,
        color: Color,
    ) -> Result<()> {
        self.record(BackendCall::DrawText {
            page,
            text: text.to_string(),
            origin,
            size,
            font: font.font,
            color,
        })
    }

    fn draw_image(&mut self, page: PageHandle, image: &ImageHandle, rect: Rect) -> Result<()> {
        self.record(BackendCall::DrawImage {
            page,
            resource: image.resource.clone(),
            rect,
        })
    }

    fn add_field(&mut self, page: PageHandle, field: FieldRequest) -> Result<()> {
        self.record(BackendCall::AddField { page, field })
    }

    /// The "document" is the plan: one line per recorded call.
    async fn save(self) -> Result<Vec<u8>> {
        self.record(BackendCall::Save)?;
        let mut plan = String::new();
        for call in self.log.calls() {
            plan.push_str(&call.to_string());
            plan.push('\n');
        }
        Ok(plan.into_bytes())
    }
}

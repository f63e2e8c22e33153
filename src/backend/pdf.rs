//! [`DocumentBackend`] producing PDF through [`PdfWriter`].
//!
//! Image decoding and final serialization run on the blocking thread pool,
//! so a render must be driven from inside a tokio runtime.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{
    DocumentBackend, FieldKind, FieldRequest, FieldStyle, FontHandle, ImageHandle, PageHandle,
};
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use crate::geometry::{Point, Rect};
use crate::theme::Color;
use crate::writer::{
    CheckboxWidget, ComboBoxWidget, ImageData, ImageResource, PageBuilder, PdfWriter,
    PdfWriterConfig, RadioButtonWidget, TextFieldWidget, WidgetStyle,
};

/// Backend writing a PDF with an interactive form.
pub struct PdfBackend {
    writer: PdfWriter,
    images: HashMap<String, ImageResource>,
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend {
    /// Backend with the default writer configuration.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Backend with a custom writer configuration.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            writer: PdfWriter::with_config(config),
            images: HashMap::new(),
        }
    }

    fn page(&mut self, page: PageHandle, operation: &'static str) -> Result<PageBuilder<'_>> {
        self.writer
            .page(page.0)
            .ok_or_else(|| Error::capability(operation, format!("page {} does not exist", page.0)))
    }
}

impl From<FieldStyle> for WidgetStyle {
    fn from(style: FieldStyle) -> Self {
        WidgetStyle {
            border_width: style.border_width,
            border_color: style.border_color,
            background: style.background,
            text_color: style.text_color,
        }
    }
}

#[async_trait]
impl DocumentBackend for PdfBackend {
    async fn add_page(&mut self, width: f32, height: f32) -> Result<PageHandle> {
        Ok(PageHandle(self.writer.add_page(width, height).index()))
    }

    async fn embed_font(&mut self, font: StandardFont) -> Result<FontHandle> {
        let resource = self.writer.embed_font(font);
        Ok(FontHandle::new(font, resource.name))
    }

    fn width_of_text_at_size(&self, font: &FontHandle, text: &str, size: f32) -> f32 {
        font.font.width_of_text_at_size(text, size)
    }

    async fn embed_image(&mut self, data: &[u8]) -> Result<ImageHandle> {
        let data = data.to_vec();
        let image = tokio::task::spawn_blocking(move || ImageData::from_bytes(&data))
            .await
            .map_err(|e| Error::capability("embed_image", e))??;

        let resource = self.writer.register_image(&image);
        let handle = ImageHandle::new(resource.name.clone(), resource.natural_size);
        self.images.insert(resource.name.clone(), resource);
        Ok(handle)
    }

    fn draw_rectangle(&mut self, page: PageHandle, rect: Rect, color: Color) -> Result<()> {
        self.page(page, "draw_rectangle")?.fill_rect(rect, color);
        Ok(())
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
        let resource = self.writer.embed_font(font.font);
        self.page(page, "draw_text")?
            .draw_text(text, origin, &resource, size, color)?;
        Ok(())
    }

    fn draw_image(&mut self, page: PageHandle, image: &ImageHandle, rect: Rect) -> Result<()> {
        let resource = self
            .images
            .get(&image.resource)
            .cloned()
            .ok_or_else(|| Error::capability("draw_image", format!("unknown image {}", image.resource)))?;
        self.page(page, "draw_image")?.draw_image(&resource, rect);
        Ok(())
    }

    fn add_field(&mut self, page: PageHandle, field: FieldRequest) -> Result<()> {
        let font = self.writer.form_font();
        let style = WidgetStyle::from(field.style);
        let mut builder = self.page(page, "add_field")?;

        match field.kind {
            FieldKind::Text => {
                let mut widget = TextFieldWidget::new(field.name, field.rect)
                    .with_font(font.name, 0.0)
                    .with_style(style);
                if field.required {
                    widget = widget.required();
                }
                builder.add_text_field(widget)?;
            },
            FieldKind::MultilineText { font_size } => {
                let mut widget = TextFieldWidget::new(field.name, field.rect)
                    .multiline()
                    .with_font(font.name, font_size)
                    .with_style(style);
                if field.required {
                    widget = widget.required();
                }
                builder.add_text_field(widget)?;
            },
            FieldKind::Checkbox => {
                let mut widget = CheckboxWidget::new(field.name, field.rect).with_style(style);
                if field.required {
                    widget = widget.required();
                }
                builder.add_checkbox(widget)?;
            },
            FieldKind::RadioOption { value } => {
                let widget = RadioButtonWidget::new(value, field.rect).with_style(style);
                builder.add_radio_button(&field.name, widget, field.required)?;
            },
            FieldKind::Dropdown { options } => {
                let mut widget = ComboBoxWidget::new(field.name, field.rect)
                    .with_options(options)
                    .with_font(font.name, 0.0)
                    .with_style(style);
                if field.required {
                    widget = widget.required();
                }
                builder.add_combo_box(widget)?;
            },
        }
        Ok(())
    }

    async fn save(self) -> Result<Vec<u8>> {
        let writer = self.writer;
        tokio::task::spawn_blocking(move || writer.finish())
            .await
            .map_err(|e| Error::capability("save", e))?
            .map_err(|e| match e {
                Error::Io(io) => Error::capability("save", io),
                other => other,
            })
    }
}

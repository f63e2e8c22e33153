//! Render a [`FormDocument`] through a [`DocumentBackend`].
//!
//! The assembler owns the order of operations: page, font, background,
//! logo, header, then every element (label first, then its body), then
//! serialization. Progress is published after each element.

use crate::backend::{
    BackendMeasure, DocumentBackend, FieldKind, FieldRequest, FieldStyle, FontHandle, PageHandle,
};
use crate::config::LayoutConfig;
use crate::elements::FormDocument;
use crate::error::{generation_failure_message, Error, Result};
use crate::geometry::Rect;
use crate::layout::{BodyLayout, ElementLayout, LayoutEngine, TextPlacement};
use crate::progress::RenderReporter;
use crate::theme::{Color, Theme};

/// MIME type of the rendered artifact.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A serialized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    /// Document bytes
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`
    pub content_type: &'static str,
}

impl RenderedForm {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: PDF_CONTENT_TYPE,
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Drawing state shared by every element of one render.
struct Canvas<'a> {
    page: PageHandle,
    font: &'a FontHandle,
    text_color: Color,
    field_style: FieldStyle,
}

/// Turns form documents into backend calls.
#[derive(Debug, Clone, Default)]
pub struct FormAssembler {
    engine: LayoutEngine,
}

impl FormAssembler {
    /// Assembler for the given page geometry.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            engine: LayoutEngine::new(config),
        }
    }

    /// Layout engine in use.
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Render `document` with `backend`, publishing progress to `reporter`.
    ///
    /// A form without elements is rejected with [`Error::EmptyDocument`]
    /// before the backend is touched; its message is published like any
    /// other failure. On failure the backend and everything it
    /// built are dropped, the failure message is published, and the error
    /// is returned. Progress is back at zero when this returns.
    pub async fn render<B: DocumentBackend>(
        &self,
        document: &FormDocument,
        backend: B,
        reporter: &RenderReporter,
    ) -> Result<RenderedForm> {
        if document.is_empty() {
            let err = Error::EmptyDocument;
            let message = generation_failure_message(&err);
            log::warn!("{}", message);
            reporter.fail(message);
            return Err(err);
        }

        let _guard = reporter.begin();
        log::info!(
            "Rendering \"{}\" with {} elements",
            document.title(),
            document.elements().len()
        );

        match self.assemble(document, backend, reporter).await {
            Ok(bytes) => {
                log::info!("Rendered {} bytes", bytes.len());
                Ok(RenderedForm::new(bytes))
            },
            Err(err) => {
                let message = generation_failure_message(&err);
                log::error!("{}", message);
                reporter.fail(message);
                Err(err)
            },
        }
    }

    async fn assemble<B: DocumentBackend>(
        &self,
        document: &FormDocument,
        mut backend: B,
        reporter: &RenderReporter,
    ) -> Result<Vec<u8>> {
        let config = self.engine.config();
        let theme = Theme::resolve(document.theme());

        let page = backend.add_page(config.page_width, config.page_height).await?;
        let font = backend.embed_font(document.font()).await?;

        backend.draw_rectangle(
            page,
            Rect::page(config.page_width, config.page_height),
            theme.background,
        )?;

        if let Some(logo) = document.logo() {
            let image = backend.embed_image(logo).await?;
            let scaled = image.scale(self.engine.logo_scale_factor(image.natural_size()));
            backend.draw_image(page, &image, self.engine.logo_rect(scaled))?;
        }

        let layout = self
            .engine
            .layout(document, &BackendMeasure::new(&backend, &font));

        let canvas = Canvas {
            page,
            font: &font,
            text_color: theme.text,
            field_style: FieldStyle::themed(&theme),
        };

        draw_placement(&mut backend, &canvas, &layout.title)?;
        for line in &layout.description {
            draw_placement(&mut backend, &canvas, line)?;
        }

        let total = layout.elements.len();
        for (index, element) in layout.elements.iter().enumerate() {
            emit_element(&mut backend, &canvas, element)?;
            reporter.report(index + 1, total);
        }

        backend.save().await
    }
}

fn draw_placement<B: DocumentBackend>(
    backend: &mut B,
    canvas: &Canvas<'_>,
    text: &TextPlacement,
) -> Result<()> {
    backend.draw_text(
        canvas.page,
        &text.text,
        text.origin,
        text.size,
        canvas.font,
        canvas.text_color,
    )
}

/// Label, then the body's field or text calls.
fn emit_element<B: DocumentBackend>(
    backend: &mut B,
    canvas: &Canvas<'_>,
    element: &ElementLayout,
) -> Result<()> {
    draw_placement(backend, canvas, &element.label)?;

    let field = |name: String, rect: Rect, kind: FieldKind| {
        FieldRequest::new(name, rect, canvas.field_style, kind).required(element.required)
    };

    match &element.body {
        BodyLayout::TextField { rect } => {
            backend.add_field(canvas.page, field(element.field_name.clone(), *rect, FieldKind::Text))?;
        },
        BodyLayout::TextArea { rect, font_size } => {
            backend.add_field(
                canvas.page,
                field(
                    element.field_name.clone(),
                    *rect,
                    FieldKind::MultilineText {
                        font_size: *font_size,
                    },
                ),
            )?;
        },
        BodyLayout::Dropdown { rect, options } => {
            backend.add_field(
                canvas.page,
                field(
                    element.field_name.clone(),
                    *rect,
                    FieldKind::Dropdown {
                        options: options.clone(),
                    },
                ),
            )?;
        },
        BodyLayout::Checkboxes { options } => {
            for (i, option) in options.iter().enumerate() {
                backend.add_field(
                    canvas.page,
                    field(element.option_field_name(i), option.control, FieldKind::Checkbox),
                )?;
                draw_placement(backend, canvas, &option.caption)?;
            }
        },
        BodyLayout::RadioGroup { options } => {
            for option in options {
                backend.add_field(
                    canvas.page,
                    field(
                        element.field_name.clone(),
                        option.control,
                        FieldKind::RadioOption {
                            value: option.value.clone(),
                        },
                    ),
                )?;
                draw_placement(backend, canvas, &option.caption)?;
            }
        },
        BodyLayout::StaticText { text } => {
            draw_placement(backend, canvas, text)?;
        },
    }
    Ok(())
}

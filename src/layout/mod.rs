//! Single-page form layout.
//!
//! The layout is one top-to-bottom pass over the elements with a single
//! descending cursor. The title and description lines are centered at the
//! top of the page. Each element then gets a label row at the cursor,
//! followed by a body whose geometry depends on the element kind.
//!
//! ```text
//!   H - M          title (centered)
//!   H - M - 30     description line 1 (centered)
//!   ...            one line every 15pt
//!   cursor         label
//!   cursor - G - F field body
//! ```
//!
//! Nothing here draws; the [`crate::assembler`] turns a [`FormLayout`] into
//! backend calls. Content that runs past the bottom margin is laid out
//! anyway and reported by [`FormLayout::overflows`].

use crate::config::LayoutConfig;
use crate::elements::{ElementBody, ElementId, ElementKind, FormDocument, FormElement};
use crate::fonts::StandardFont;
use crate::geometry::{Point, Rect, Size};

/// Source of text widths for centering.
pub trait TextMeasure {
    /// Advance width of `text` at `size` points.
    fn width_of_text_at_size(&self, text: &str, size: f32) -> f32;
}

impl TextMeasure for StandardFont {
    fn width_of_text_at_size(&self, text: &str, size: f32) -> f32 {
        crate::fonts::text_width(*self, text, size)
    }
}

/// A run of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    /// Text to draw
    pub text: String,
    /// Left end of the baseline
    pub origin: Point,
    /// Font size in points
    pub size: f32,
}

impl TextPlacement {
    fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            origin: Point::new(x, y),
            size,
        }
    }
}

/// One stacked checkbox or radio option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionPlacement {
    /// Option text; also the radio export value
    pub value: String,
    /// Square control
    pub control: Rect,
    /// Caption to the right of the control
    pub caption: TextPlacement,
}

/// Geometry of an element below its label.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyLayout {
    /// Full-width single-line field
    TextField {
        /// Field widget rectangle
        rect: Rect,
    },
    /// Full-width field three rows high
    TextArea {
        /// Field widget rectangle
        rect: Rect,
        /// Font size of entered text
        font_size: f32,
    },
    /// Full-width drop-down
    Dropdown {
        /// Field widget rectangle
        rect: Rect,
        /// Choices, in order
        options: Vec<String>,
    },
    /// One independent checkbox per option
    Checkboxes {
        /// Stacked options, top to bottom
        options: Vec<OptionPlacement>,
    },
    /// One radio group with a button per option
    RadioGroup {
        /// Stacked options, top to bottom
        options: Vec<OptionPlacement>,
    },
    /// Plain text, no field
    StaticText {
        /// The element's text
        text: TextPlacement,
    },
}

impl BodyLayout {
    /// Lowest y touched by the body.
    fn bottom(&self) -> f32 {
        match self {
            BodyLayout::TextField { rect }
            | BodyLayout::TextArea { rect, .. }
            | BodyLayout::Dropdown { rect, .. } => rect.bottom(),
            BodyLayout::Checkboxes { options } | BodyLayout::RadioGroup { options } => options
                .iter()
                .map(|option| option.control.bottom())
                .fold(f32::INFINITY, f32::min),
            BodyLayout::StaticText { text } => text.origin.y,
        }
    }
}

/// Placement of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLayout {
    /// Element identity
    pub id: ElementId,
    /// Element kind
    pub kind: ElementKind,
    /// Interactive field name (`field-element-<n>`)
    pub field_name: String,
    /// Required flag carried into the field
    pub required: bool,
    /// Label row, drawn at the cursor
    pub label: TextPlacement,
    /// Geometry below the label
    pub body: BodyLayout,
    /// Cursor when the element was placed
    pub cursor: f32,
    /// Cursor left for the next element
    pub next_cursor: f32,
}

impl ElementLayout {
    /// Field name of the `index`-th checkbox of a checkbox group.
    pub fn option_field_name(&self, index: usize) -> String {
        format!("{}-{}", self.field_name, index)
    }

    /// Vertical space consumed by the body, after the label drop.
    pub fn body_advance(&self, config: &LayoutConfig) -> f32 {
        self.cursor - config.label_gap - config.field_height - self.next_cursor
    }

    fn lowest_point(&self) -> f32 {
        self.label.origin.y.min(self.body.bottom())
    }
}

/// Complete placement of a form on its page.
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    /// Page size
    pub page: Size,
    /// Centered title
    pub title: TextPlacement,
    /// Centered description lines
    pub description: Vec<TextPlacement>,
    /// Elements in render order
    pub elements: Vec<ElementLayout>,
    /// Cursor where the first element is placed
    pub start_cursor: f32,
    /// Cursor after the last element
    pub final_cursor: f32,
    bottom_limit: f32,
}

impl FormLayout {
    /// Whether any element reaches below the bottom margin.
    pub fn overflows(&self) -> bool {
        self.lowest_point() < self.bottom_limit
    }

    /// Lowest y touched by any element, or the start cursor for an empty form.
    pub fn lowest_point(&self) -> f32 {
        self.elements
            .iter()
            .map(ElementLayout::lowest_point)
            .fold(self.start_cursor, f32::min)
    }
}

/// Computes [`FormLayout`]s for a fixed page geometry.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine for `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The geometry in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `document`, measuring text with `measure`.
    pub fn layout(&self, document: &FormDocument, measure: &impl TextMeasure) -> FormLayout {
        let (title, description) = self.header(document, measure);
        let mut cursor = self.start_cursor(description.len());
        let start_cursor = cursor;

        let mut elements = Vec::with_capacity(document.elements().len());
        for element in document.elements() {
            let placed = self.place_element(element, cursor);
            cursor = placed.next_cursor;
            elements.push(placed);
        }

        let layout = FormLayout {
            page: Size::new(self.config.page_width, self.config.page_height),
            title,
            description,
            elements,
            start_cursor,
            final_cursor: cursor,
            bottom_limit: self.config.bottom_limit(),
        };

        if layout.overflows() {
            log::warn!(
                "Form content reaches y={:.1}, below the bottom margin ({}); it will be clipped",
                layout.lowest_point(),
                self.config.bottom_limit()
            );
        }
        layout
    }

    /// Centered title and description lines.
    pub fn header(
        &self,
        document: &FormDocument,
        measure: &impl TextMeasure,
    ) -> (TextPlacement, Vec<TextPlacement>) {
        let c = &self.config;
        let top = c.page_height - c.margin;

        let title = self.centered(document.title(), top, c.title_font_size, measure);
        let description = document
            .description_lines()
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let y = top - c.title_gap - i as f32 * c.description_line_spacing;
                self.centered(line, y, c.description_font_size, measure)
            })
            .collect();

        (title, description)
    }

    fn centered(
        &self,
        text: &str,
        y: f32,
        size: f32,
        measure: &impl TextMeasure,
    ) -> TextPlacement {
        let width = measure.width_of_text_at_size(text, size);
        TextPlacement::new(text, (self.config.page_width - width) / 2.0, y, size)
    }

    /// Cursor of the first element when the description has `line_count` lines.
    pub fn start_cursor(&self, line_count: usize) -> f32 {
        let c = &self.config;
        let extra_lines = line_count.saturating_sub(1) as f32;
        c.page_height - c.margin - c.header_gap - extra_lines * c.description_line_spacing
    }

    /// Place one element with its label at `cursor`.
    pub fn place_element(&self, element: &FormElement, cursor: f32) -> ElementLayout {
        let c = &self.config;
        let font_size = element.font_size.as_f32();
        let label = TextPlacement::new(element.label.clone(), c.margin, cursor, font_size);

        let y = cursor - c.label_gap - c.field_height;
        let full_width = |y: f32, rows: f32| {
            Rect::new(c.margin, y, c.content_width(), c.field_height * rows)
        };

        let (body, advance) = match &element.body {
            ElementBody::Text => (
                BodyLayout::TextField {
                    rect: full_width(y, 1.0),
                },
                c.field_height + c.element_spacing,
            ),
            ElementBody::TextArea => (
                BodyLayout::TextArea {
                    rect: full_width(y - 2.0 * c.field_height, 3.0),
                    font_size: c.multiline_font_size,
                },
                3.0 * c.field_height + c.element_spacing,
            ),
            ElementBody::Dropdown { options } => (
                BodyLayout::Dropdown {
                    rect: full_width(y, 1.0),
                    options: options.clone(),
                },
                c.field_height + c.element_spacing,
            ),
            ElementBody::Checkbox { options } => (
                BodyLayout::Checkboxes {
                    options: self.stack_options(options, y, font_size),
                },
                self.options_advance(options.len()),
            ),
            ElementBody::Radio { options } => (
                BodyLayout::RadioGroup {
                    options: self.stack_options(options, y, font_size),
                },
                self.options_advance(options.len()),
            ),
            ElementBody::FreeText { content } => (
                BodyLayout::StaticText {
                    text: TextPlacement::new(content.clone(), c.margin, y, font_size),
                },
                c.field_height + c.element_spacing,
            ),
        };

        let next_cursor = y - advance;
        log::debug!(
            "Placed {} ({}) at y={:.1}, next y={:.1}",
            element.id,
            element.kind(),
            cursor,
            next_cursor
        );

        ElementLayout {
            id: element.id,
            kind: element.kind(),
            field_name: element.field_name(),
            required: element.required,
            label,
            body,
            cursor,
            next_cursor,
        }
    }

    fn stack_options(&self, options: &[String], top: f32, font_size: f32) -> Vec<OptionPlacement> {
        let c = &self.config;
        options
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let y = top - i as f32 * c.option_pitch();
                OptionPlacement {
                    value: value.clone(),
                    control: Rect::new(c.margin, y, c.field_height, c.field_height),
                    caption: TextPlacement::new(
                        value.clone(),
                        c.margin + c.field_height + c.option_spacing,
                        y + c.option_caption_offset,
                        font_size,
                    ),
                }
            })
            .collect()
    }

    /// Body advance of a checkbox or radio group with `count` options.
    pub fn options_advance(&self, count: usize) -> f32 {
        count as f32 * self.config.option_pitch() + self.config.element_spacing
    }

    /// Scale factor that fits an image of `natural` size into the logo box.
    pub fn logo_scale_factor(&self, natural: Size) -> f32 {
        let longer = natural.longer_side();
        if longer > 0.0 {
            self.config.logo_size / longer
        } else {
            1.0
        }
    }

    /// Logo rectangle for an already scaled image, hanging from the top-left
    /// logo offset.
    pub fn logo_rect(&self, scaled: Size) -> Rect {
        let c = &self.config;
        Rect::new(
            c.logo_margin,
            c.page_height - c.logo_margin - scaled.height,
            scaled.width,
            scaled.height,
        )
    }
}

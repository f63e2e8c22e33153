//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9. Used for
//! page contents and for form-field appearance streams.

use super::object_serializer::{format_real, write_escaped};
use crate::error::Result;
use crate::geometry::Rect;
use crate::theme::Color;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show an already encoded string (Tj)
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Cubic Bezier curve (c)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke path (S)
    Stroke,
    /// Fill path (f)
    Fill,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Whether nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        self.begin_text();
        if self.current_font.as_deref() != Some(font_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(font_name.to_string(), size));
            self.current_font = Some(font_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Show encoded text with its baseline origin at (x, y).
    pub fn text(&mut self, encoded: Vec<u8>, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encoded));
        self
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
    }

    /// Set stroke color.
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(color.r, color.g, color.b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point (start a new subpath).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Append a cubic Bezier segment.
    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3))
    }

    /// Append a rectangle subpath.
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(rect.x, rect.y, rect.width, rect.height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill `rect` with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> &mut Self {
        self.end_text();
        self.fill_color(color).rect(rect).fill()
    }

    /// Append a circle approximated with four Bezier segments.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32) -> &mut Self {
        // control point distance for a quarter circle
        let k = r * 0.552_284_8;
        self.move_to(cx + r, cy)
            .curve_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r)
            .curve_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy)
            .curve_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r)
            .curve_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy)
    }

    /// Draw an image XObject scaled into `rect`.
    pub fn draw_image(&mut self, resource_id: &str, rect: Rect) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::Transform(rect.width, 0.0, 0.0, rect.height, rect.x, rect.y));
        self.op(ContentStreamOp::PaintXObject(resource_id.to_string()));
        self.op(ContentStreamOp::RestoreState)
    }

    /// Serialize the operations, closing any open text object.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        if self.in_text_object {
            write_op(&mut buf, &ContentStreamOp::EndText)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

fn write_numbers<W: Write>(w: &mut W, values: &[f32], operator: &str) -> std::io::Result<()> {
    for value in values {
        write!(w, "{} ", format_real(*value))?;
    }
    write!(w, "{}", operator)
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => write_numbers(w, &[*a, *b, *c, *d, *e, *f], "cm"),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, format_real(*size)),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write_numbers(w, &[*a, *b, *c, *d, *e, *f], "Tm")
        },
        ContentStreamOp::ShowText(bytes) => {
            write!(w, "(")?;
            write_escaped(w, bytes)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorRGB(r, g, b) => write_numbers(w, &[*r, *g, *b], "rg"),
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => write_numbers(w, &[*r, *g, *b], "RG"),
        ContentStreamOp::SetLineWidth(width) => write_numbers(w, &[*width], "w"),
        ContentStreamOp::MoveTo(x, y) => write_numbers(w, &[*x, *y], "m"),
        ContentStreamOp::LineTo(x, y) => write_numbers(w, &[*x, *y], "l"),
        ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3) => {
            write_numbers(w, &[*x1, *y1, *x2, *y2, *x3, *y3], "c")
        },
        ContentStreamOp::Rectangle(x, y, width, height) => {
            write_numbers(w, &[*x, *y, *width, *height], "re")
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
    }
}

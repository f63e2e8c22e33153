//! Form field appearance stream generation.
//!
//! Produces the content of the Form XObjects referenced from a widget's
//! `/AP` dictionary. Coordinates are relative to the widget's bounding
//! box, so every stream starts at the origin.
//!
//! Viewers honouring `NeedAppearances` rebuild text-field appearances;
//! these streams are what everything else shows.

use super::WidgetStyle;
use crate::error::Result;
use crate::geometry::Rect;
use crate::writer::content_stream::ContentStreamBuilder;

/// Generator for widget appearance streams.
#[derive(Debug, Clone, Copy)]
pub struct FormAppearanceGenerator {
    style: WidgetStyle,
}

impl FormAppearanceGenerator {
    /// Create a generator for the given style.
    pub fn new(style: WidgetStyle) -> Self {
        Self { style }
    }

    /// Empty box: background plus border. Used by text fields, combo
    /// boxes and the off state of checkboxes.
    pub fn box_appearance(&self, width: f32, height: f32) -> Result<Vec<u8>> {
        let mut stream = ContentStreamBuilder::new();
        self.draw_box(&mut stream, width, height);
        stream.build()
    }

    /// Checked checkbox: box with a check mark.
    pub fn checkbox_on(&self, width: f32, height: f32) -> Result<Vec<u8>> {
        let mut stream = ContentStreamBuilder::new();
        self.draw_box(&mut stream, width, height);

        let mark_width = (width.min(height) * 0.1).max(1.0);
        stream
            .stroke_color(self.style.text_color)
            .set_line_width(mark_width)
            .move_to(width * 0.2, height * 0.5)
            .line_to(width * 0.4, height * 0.25)
            .line_to(width * 0.8, height * 0.75)
            .stroke();
        stream.build()
    }

    /// Unselected radio option: circle outline.
    pub fn radio_off(&self, width: f32, height: f32) -> Result<Vec<u8>> {
        let mut stream = ContentStreamBuilder::new();
        self.draw_circle(&mut stream, width, height);
        stream.build()
    }

    /// Selected radio option: circle outline with a filled dot.
    pub fn radio_on(&self, width: f32, height: f32) -> Result<Vec<u8>> {
        let mut stream = ContentStreamBuilder::new();
        let (cx, cy, r) = self.draw_circle(&mut stream, width, height);
        stream
            .fill_color(self.style.text_color)
            .circle(cx, cy, r * 0.5)
            .fill();
        stream.build()
    }

    fn draw_box(&self, stream: &mut ContentStreamBuilder, width: f32, height: f32) {
        stream.fill_rect(Rect::new(0.0, 0.0, width, height), self.style.background);

        let bw = self.style.border_width;
        if bw > 0.0 {
            let half = bw / 2.0;
            stream
                .stroke_color(self.style.border_color)
                .set_line_width(bw)
                .rect(Rect::new(half, half, width - bw, height - bw))
                .stroke();
        }
    }

    /// Background disc and border ring; returns centre and outer radius.
    fn draw_circle(&self, stream: &mut ContentStreamBuilder, width: f32, height: f32) -> (f32, f32, f32) {
        let cx = width / 2.0;
        let cy = height / 2.0;
        let bw = self.style.border_width;
        let r = (width.min(height) / 2.0 - bw / 2.0).max(0.0);

        stream.fill_color(self.style.background).circle(cx, cy, r).fill();
        if bw > 0.0 {
            stream
                .stroke_color(self.style.border_color)
                .set_line_width(bw)
                .circle(cx, cy, r)
                .stroke();
        }
        (cx, cy, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    fn style() -> WidgetStyle {
        WidgetStyle {
            border_width: 1.0,
            border_color: Color::new(1.0, 0.0, 0.0),
            background: Color::WHITE,
            text_color: Color::BLACK,
        }
    }

    #[test]
    fn test_box_appearance() {
        let content = FormAppearanceGenerator::new(style()).box_appearance(100.0, 25.0).unwrap();
        let text = String::from_utf8(content).unwrap();
        assert!(text.contains("1 1 1 rg"));
        assert!(text.contains("0 0 100 25 re"));
        assert!(text.contains("1 0 0 RG"));
        assert!(text.contains("0.5 0.5 99 24 re"));
    }

    #[test]
    fn test_checkbox_on_draws_mark() {
        let generator = FormAppearanceGenerator::new(style());
        let off = generator.box_appearance(25.0, 25.0).unwrap();
        let on = generator.checkbox_on(25.0, 25.0).unwrap();
        assert!(on.len() > off.len());
        assert!(String::from_utf8(on).unwrap().contains(" l"));
    }

    #[test]
    fn test_radio_states() {
        let generator = FormAppearanceGenerator::new(style());
        let off = String::from_utf8(generator.radio_off(25.0, 25.0).unwrap()).unwrap();
        let on = String::from_utf8(generator.radio_on(25.0, 25.0).unwrap()).unwrap();
        assert!(off.contains(" c"));
        let fills = |s: &str| s.lines().filter(|l| *l == "f").count();
        assert!(fills(&on) > fills(&off));
    }

    #[test]
    fn test_borderless_box() {
        let generator = FormAppearanceGenerator::new(WidgetStyle {
            border_width: 0.0,
            ..style()
        });
        let text = String::from_utf8(generator.box_appearance(10.0, 10.0).unwrap()).unwrap();
        assert!(!text.contains("RG"));
    }
}

//! Standard fonts available to generated forms.
//!
//! Forms are typeset in one of six PDF base-14 fonts. These fonts need no
//! embedding: the PDF references them by name and every conforming viewer
//! supplies the glyphs. Width metrics come from the Adobe AFM files (see
//! [`metrics`]).

pub mod metrics;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use metrics::{encode_win_ansi, text_width};

/// One of the six selectable form fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    /// Helvetica (plain sans-serif)
    #[default]
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Times-Roman (serif)
    TimesRoman,
    /// Times-Bold (serif bold)
    TimesBold,
    /// Courier (monospace)
    Courier,
    /// Courier-Bold (monospace bold)
    CourierBold,
}

impl StandardFont {
    /// Every selectable font, in presentation order.
    pub const ALL: [StandardFont; 6] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::Courier,
        StandardFont::CourierBold,
    ];

    /// Identifier used in form descriptions (`"times-bold"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "helvetica",
            StandardFont::HelveticaBold => "helvetica-bold",
            StandardFont::TimesRoman => "times-roman",
            StandardFont::TimesBold => "times-bold",
            StandardFont::Courier => "courier",
            StandardFont::CourierBold => "courier-bold",
        }
    }

    /// PostScript name written to the PDF `/BaseFont` entry.
    pub fn base_font_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Human-readable name for pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica Bold",
            StandardFont::TimesRoman => "Times Roman",
            StandardFont::TimesBold => "Times Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier Bold",
        }
    }

    /// Width of `text` in points when set at `size`.
    pub fn width_of_text_at_size(&self, text: &str, size: f32) -> f32 {
        text_width(*self, text, size)
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardFont {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StandardFont::ALL
            .iter()
            .copied()
            .find(|font| font.as_str() == s)
            .ok_or_else(|| Error::InvalidFontKind(s.to_string()))
    }
}

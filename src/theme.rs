//! Visual themes.
//!
//! A theme is a fixed triple of colours: page background, text and strokes,
//! and interactive field fill. Themes are looked up by [`ThemeId`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Create a colour. Components are expected in `[0, 1]`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// Components as a tuple.
    pub fn components(&self) -> (f32, f32, f32) {
        (self.r, self.g, self.b)
    }
}

/// Identifier of one of the built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    /// White page, black text
    #[default]
    Light,
    /// Near-black page, white text
    Dark,
    /// Pale blue
    Blue,
    /// Pale green
    Green,
    /// Pale purple
    Purple,
    /// Saturated blue with white text
    BlueGradient,
    /// Saturated green with white text
    GreenGradient,
    /// Saturated purple with white text
    PurpleGradient,
}

impl ThemeId {
    /// Every theme, in presentation order.
    pub const ALL: [ThemeId; 8] = [
        ThemeId::Light,
        ThemeId::Dark,
        ThemeId::Blue,
        ThemeId::Green,
        ThemeId::Purple,
        ThemeId::BlueGradient,
        ThemeId::GreenGradient,
        ThemeId::PurpleGradient,
    ];

    /// The identifier string (`"blue-gradient"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Light => "light",
            ThemeId::Dark => "dark",
            ThemeId::Blue => "blue",
            ThemeId::Green => "green",
            ThemeId::Purple => "purple",
            ThemeId::BlueGradient => "blue-gradient",
            ThemeId::GreenGradient => "green-gradient",
            ThemeId::PurpleGradient => "purple-gradient",
        }
    }

    /// Human-readable name for pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeId::Light => "Light",
            ThemeId::Dark => "Dark",
            ThemeId::Blue => "Blue",
            ThemeId::Green => "Green",
            ThemeId::Purple => "Purple",
            ThemeId::BlueGradient => "Blue Gradient",
            ThemeId::GreenGradient => "Green Gradient",
            ThemeId::PurpleGradient => "Purple Gradient",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ThemeId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::InvalidThemeKind(s.to_string()))
    }
}

/// Resolved colours of a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Full-page background fill
    pub background: Color,
    /// Titles, labels, option captions and field borders
    pub text: Color,
    /// Interactive field background
    pub field: Color,
}

impl Theme {
    /// Look up the colours of a theme.
    pub fn resolve(id: ThemeId) -> Theme {
        let (background, text, field) = match id {
            ThemeId::Light => (Color::WHITE, Color::BLACK, Color::new(0.98, 0.98, 0.98)),
            ThemeId::Dark => (
                Color::new(0.1, 0.1, 0.1),
                Color::WHITE,
                Color::new(0.2, 0.2, 0.2),
            ),
            ThemeId::Blue => (
                Color::new(0.9, 0.95, 1.0),
                Color::new(0.0, 0.0, 0.6),
                Color::new(0.95, 0.97, 1.0),
            ),
            ThemeId::Green => (
                Color::new(0.9, 1.0, 0.9),
                Color::new(0.0, 0.5, 0.0),
                Color::new(0.95, 1.0, 0.95),
            ),
            ThemeId::Purple => (
                Color::new(0.98, 0.9, 1.0),
                Color::new(0.5, 0.0, 0.5),
                Color::new(0.99, 0.95, 1.0),
            ),
            ThemeId::BlueGradient => (
                Color::new(0.6, 0.8, 1.0),
                Color::WHITE,
                Color::new(0.8, 0.9, 1.0),
            ),
            ThemeId::GreenGradient => (
                Color::new(0.6, 1.0, 0.6),
                Color::WHITE,
                Color::new(0.8, 1.0, 0.8),
            ),
            ThemeId::PurpleGradient => (
                Color::new(0.8, 0.6, 1.0),
                Color::WHITE,
                Color::new(0.9, 0.8, 1.0),
            ),
        };

        Theme {
            background,
            text,
            field,
        }
    }

    /// Parse a theme identifier and resolve it.
    pub fn resolve_str(id: &str) -> Result<Theme> {
        Ok(Self::resolve(id.parse()?))
    }
}

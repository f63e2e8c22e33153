//! Base-14 font metrics and WinAnsi encoding.
//!
//! Advance widths are in 1/1000 em, taken from the Adobe AFM files and
//! indexed by WinAnsi code, so every character the page can draw is
//! measured with its real glyph width.

use super::StandardFont;

/// Widths for U+0020..=U+007E, indexed by `ch - 0x20`.
type AsciiWidths = [u16; 95];

#[rustfmt::skip]
const HELVETICA: AsciiWidths = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: AsciiWidths = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: AsciiWidths = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: AsciiWidths = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

/// Widths for WinAnsi codes 0x80..=0xFF, indexed by `code - 0x80`.
/// Codes WinAnsi leaves undefined are 0.
type HighWidths = [u16; 128];

#[rustfmt::skip]
const HELVETICA_HIGH: HighWidths = [
    556,   0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000,   0, 611,   0,
      0, 222, 222, 333, 333,  350, 556, 1000, 333, 1000, 500, 333,  944,   0, 500, 667,
    278, 333, 556, 556, 556,  556, 260, 556, 333,  737, 370, 556,  584, 333, 737, 333,
    400, 584, 333, 333, 333,  556, 537, 278, 333,  333, 365, 556,  834, 834, 834, 611,
    667, 667, 667, 667, 667,  667, 1000, 722, 667, 667, 667, 667,  278, 278, 278, 278,
    722, 722, 778, 778, 778,  778, 778, 584, 778,  722, 722, 722,  722, 667, 667, 611,
    556, 556, 556, 556, 556,  556, 889, 500, 556,  556, 556, 556,  278, 278, 278, 278,
    556, 556, 556, 556, 556,  556, 556, 584, 611,  556, 556, 556,  556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH: HighWidths = [
    556,   0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000,   0, 611,   0,
      0, 278, 278, 500, 500,  350, 556, 1000, 333, 1000, 556, 333,  944,   0, 500, 667,
    278, 333, 556, 556, 556,  556, 280, 556, 333,  737, 370, 556,  584, 333, 737, 333,
    400, 584, 333, 333, 333,  611, 556, 278, 333,  333, 365, 556,  834, 834, 834, 611,
    722, 722, 722, 722, 722,  722, 1000, 722, 667, 667, 667, 667,  278, 278, 278, 278,
    722, 722, 778, 778, 778,  778, 778, 584, 778,  722, 722, 722,  722, 667, 667, 611,
    556, 556, 556, 556, 556,  556, 889, 556, 556,  556, 556, 556,  278, 278, 278, 278,
    611, 611, 611, 611, 611,  611, 611, 584, 611,  611, 611, 611,  611, 556, 611, 556,
];

#[rustfmt::skip]
const TIMES_ROMAN_HIGH: HighWidths = [
    500,   0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333,  889,   0, 611,   0,
      0, 333, 333, 444, 444,  350, 500, 1000, 333,  980, 389, 333,  722,   0, 444, 722,
    250, 333, 500, 500, 500,  500, 200, 500, 333,  760, 276, 500,  564, 333, 760, 333,
    400, 564, 300, 300, 333,  500, 453, 250, 333,  300, 310, 500,  750, 750, 750, 444,
    722, 722, 722, 722, 722,  722, 889, 667, 611,  611, 611, 611,  333, 333, 333, 333,
    722, 722, 722, 722, 722,  722, 722, 564, 722,  722, 722, 722,  722, 722, 556, 500,
    444, 444, 444, 444, 444,  444, 667, 444, 444,  444, 444, 444,  278, 278, 278, 278,
    500, 500, 500, 500, 500,  500, 500, 564, 500,  500, 500, 500,  500, 500, 500, 500,
];

#[rustfmt::skip]
const TIMES_BOLD_HIGH: HighWidths = [
    500,   0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000,   0, 667,   0,
      0, 333, 333, 500, 500,  350, 500, 1000, 333, 1000, 389, 333,  722,   0, 444, 722,
    250, 333, 500, 500, 500,  500, 220, 500, 333,  747, 300, 500,  570, 333, 747, 333,
    400, 570, 300, 300, 333,  556, 540, 250, 333,  300, 330, 500,  750, 750, 750, 500,
    722, 722, 722, 722, 722,  722, 1000, 722, 667, 667, 667, 667,  389, 389, 389, 389,
    722, 722, 778, 778, 778,  778, 778, 570, 778,  722, 722, 722,  722, 722, 611, 556,
    500, 500, 500, 500, 500,  500, 722, 444, 444,  444, 444, 444,  278, 278, 278, 278,
    500, 556, 500, 500, 500,  500, 500, 570, 500,  556, 556, 556,  556, 500, 556, 500,
];

/// Courier and Courier-Bold advance every glyph by the same amount.
const COURIER_WIDTH: u16 = 600;

/// Width used for characters WinAnsi cannot encode.
const FALLBACK_WIDTH: u16 = 500;

/// Advance width of one character in 1/1000 em.
pub fn char_width(font: StandardFont, ch: char) -> u16 {
    let (ascii, high) = match font {
        StandardFont::Helvetica => (&HELVETICA, &HELVETICA_HIGH),
        StandardFont::HelveticaBold => (&HELVETICA_BOLD, &HELVETICA_BOLD_HIGH),
        StandardFont::TimesRoman => (&TIMES_ROMAN, &TIMES_ROMAN_HIGH),
        StandardFont::TimesBold => (&TIMES_BOLD, &TIMES_BOLD_HIGH),
        StandardFont::Courier | StandardFont::CourierBold => return COURIER_WIDTH,
    };

    match win_ansi_byte(ch) {
        Some(code @ 0x20..=0x7E) => ascii[(code - 0x20) as usize],
        Some(code @ 0x80..=0xFF) => high[(code - 0x80) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `font_size`.
pub fn text_width(font: StandardFont, text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f32 * font_size / 1000.0
}

/// Encode `text` for a simple font with `/WinAnsiEncoding`.
///
/// Returns the first character that has no WinAnsi code point.
pub fn encode_win_ansi(text: &str) -> std::result::Result<Vec<u8>, char> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).ok_or(ch))
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

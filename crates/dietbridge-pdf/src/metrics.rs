//! Font metrics and measurement-based word wrap
//!
//! Widths come from the standard Helvetica AFM files, which is what the PDF
//! renderer draws with. All public measurements are in millimetres.

use serde::Serialize;

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Advance used for glyphs outside the tables
const FALLBACK_ADVANCE: u16 = 556;

/// Built-in font faces used by the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

impl FontStyle {
    /// Advance width of one glyph in 1/1000 em
    pub fn advance(self, c: char) -> u16 {
        let table = match self {
            FontStyle::Regular => &HELVETICA,
            FontStyle::Bold => &HELVETICA_BOLD,
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '\u{2022}' => 350,
            '\u{2026}' => 1000,
            '\u{00a0}' => table[0],
            _ => FALLBACK_ADVANCE,
        }
    }
}

/// Width of `text` in millimetres at `size_pt`
pub fn text_width(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(style.advance(c))).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}

/// Wrap `text` into lines no wider than `max_width` millimetres
///
/// Words are packed greedily; a word wider than the column is broken at
/// character boundaries. Explicit newlines always start a new line. Blank
/// input produces no lines.
pub fn wrap_text(text: &str, style: FontStyle, size_pt: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            for piece in split_long_word(word, style, size_pt, max_width) {
                if current.is_empty() {
                    current = piece;
                    continue;
                }

                let candidate = format!("{} {}", current, piece);
                if text_width(&candidate, style, size_pt) > max_width {
                    lines.push(std::mem::replace(&mut current, piece));
                } else {
                    current = candidate;
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Shorten `text` with a trailing "..." so it fits `max_width`
pub fn truncate_to_width(text: &str, style: FontStyle, size_pt: f32, max_width: f32) -> String {
    if text_width(text, style, size_pt) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = text_width("...", style, size_pt);
    let mut out = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let advance = text_width(c.encode_utf8(&mut [0; 4]), style, size_pt);
        if width + advance + ellipsis_width > max_width {
            break;
        }
        width += advance;
        out.push(c);
    }
    out.push_str("...");
    out
}

fn split_long_word(word: &str, style: FontStyle, size_pt: f32, max_width: f32) -> Vec<String> {
    if text_width(word, style, size_pt) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    for c in word.chars() {
        let advance = text_width(c.encode_utf8(&mut [0; 4]), style, size_pt);
        // Every piece keeps at least one glyph, even in a degenerate column.
        if !current.is_empty() && width + advance > max_width {
            pieces.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(c);
        width += advance;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
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
static HELVETICA_BOLD: [u16; 95] = [
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // 278/1000 em at 10pt
        let expected = 0.278 * 10.0 * MM_PER_PT;
        assert!((text_width(" ", FontStyle::Regular, 10.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width("Breakfast", FontStyle::Regular, 12.0);
        let bold = text_width("Breakfast", FontStyle::Bold, 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_narrow_glyphs_measure_narrower() {
        // Measurement-based, not character counting
        let narrow = text_width("iiiiiiiiii", FontStyle::Regular, 11.0);
        let wide = text_width("WWWWWWWWWW", FontStyle::Regular, 11.0);
        assert!(wide > narrow * 3.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("A short line", FontStyle::Regular, 11.0, 170.0);
        assert_eq!(lines, vec!["A short line"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Eat a balanced breakfast with whole grains, lean protein and fresh fruit. \
                    Keep lunch light and hydrate well throughout the afternoon.";
        let lines = wrap_text(text, FontStyle::Regular, 11.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontStyle::Regular, 11.0) <= 60.0, "{line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, FontStyle::Regular, 10.0, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = wrap_text("Step one\nStep two", FontStyle::Regular, 10.0, 160.0);
        assert_eq!(lines, vec!["Step one", "Step two"]);
    }

    #[test]
    fn test_wrap_blank_is_empty() {
        assert!(wrap_text("", FontStyle::Regular, 10.0, 160.0).is_empty());
        assert!(wrap_text("   \n  ", FontStyle::Regular, 10.0, 160.0).is_empty());
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Fats: 20g", FontStyle::Regular, 9.0, 70.0), "Fats: 20g");

        let long = "Calories: ".repeat(20);
        let cut = truncate_to_width(&long, FontStyle::Regular, 9.0, 40.0);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, FontStyle::Regular, 9.0) <= 40.0);
    }
}

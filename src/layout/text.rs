use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

/// Single-line label block sized with the theme font.
pub(super) fn measure_label(text: &str, theme: &Theme, fast_metrics: bool) -> TextBlock {
    let line = text.trim().to_string();
    let width = text_width(&line, theme.font_size, &theme.font_family, fast_metrics);
    TextBlock {
        lines: vec![line],
        width,
        height: theme.font_size * 1.2,
    }
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics && text.is_ascii() {
        return fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Rough advance widths (em) for a humanist sans at 16px, used when no font
/// face can be loaded.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '\'' => 0.321,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 'r' | 't' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        '0'..='9' => 0.6,
        'a'..='z' => 0.56,
        'A'..='Z' => 0.68,
        '-' | '_' => 0.4,
        '@' | '#' | '%' | '&' => 0.946,
        _ => 0.568,
    }
}

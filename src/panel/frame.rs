//! Frame helpers so every panel row lines up on display width, not byte length.

use crate::palette::PanelColors;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[must_use]
pub(crate) fn truncate_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

fn horizontal_rule(colors: &PanelColors, left: char, right: char, width: usize) -> String {
    let inner_width = width.saturating_sub(2);
    let inner: String = std::iter::repeat(colors.borders.horizontal)
        .take(inner_width)
        .collect();
    format!("{}{left}{inner}{right}{}", colors.border, colors.reset)
}

#[must_use]
pub(crate) fn frame_top(colors: &PanelColors, width: usize) -> String {
    let b = colors.borders;
    horizontal_rule(colors, b.top_left, b.top_right, width)
}

#[must_use]
pub(crate) fn frame_bottom(colors: &PanelColors, width: usize) -> String {
    let b = colors.borders;
    horizontal_rule(colors, b.bottom_left, b.bottom_right, width)
}

#[must_use]
pub(crate) fn frame_separator(colors: &PanelColors, width: usize) -> String {
    let b = colors.borders;
    horizontal_rule(colors, b.t_left, b.t_right, width)
}

/// One framed row built from `(color, text)` segments; the text is clipped to
/// the inner width and padded so the right border always lines up.
#[must_use]
pub(crate) fn framed_row(colors: &PanelColors, width: usize, segments: &[(&str, &str)]) -> String {
    let inner_width = width.saturating_sub(2);
    let mut body = String::new();
    let mut used = 0usize;
    for (color, text) in segments {
        let remaining = inner_width.saturating_sub(used);
        if remaining == 0 {
            break;
        }
        let clipped = truncate_display(text, remaining);
        used += display_width(&clipped);
        if color.is_empty() {
            body.push_str(&clipped);
        } else {
            body.push_str(color);
            body.push_str(&clipped);
            body.push_str(colors.reset);
        }
    }
    let pad = " ".repeat(inner_width.saturating_sub(used));
    format!(
        "{}{}{}{body}{pad}{}{}{}",
        colors.border,
        colors.borders.vertical,
        colors.reset,
        colors.border,
        colors.borders.vertical,
        colors.reset
    )
}

#[must_use]
pub(crate) fn centered_line(colors: &PanelColors, color: &str, text: &str, width: usize) -> String {
    let inner_width = width.saturating_sub(2);
    let clipped = truncate_display(text, inner_width);
    let padding = inner_width.saturating_sub(display_width(&clipped));
    let left_pad = " ".repeat(padding / 2);
    framed_row(colors, width, &[("", left_pad.as_str()), (color, clipped.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_display_respects_wide_characters() {
        assert_eq!(truncate_display("ab界cd", 3), "ab");
        assert_eq!(truncate_display("abc", 0), "");
        assert_eq!(truncate_display("abc", 10), "abc");
    }

    #[test]
    fn framed_rows_share_the_frame_width() {
        let colors = PanelColors::plain();
        let top = frame_top(&colors, 20);
        let row = framed_row(&colors, 20, &[("", "a label that is far too long")]);
        let short = framed_row(&colors, 20, &[("", "x")]);
        assert_eq!(display_width(&top), 20);
        assert_eq!(display_width(&row), 20);
        assert_eq!(display_width(&short), 20);
    }

    #[test]
    fn centered_line_pads_both_sides() {
        let colors = PanelColors::plain();
        let line = centered_line(&colors, "", "mid", 11);
        assert_eq!(line, "│   mid   │");
    }
}

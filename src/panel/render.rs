//! Panel rendering so menu state maps to stable terminal output.

use super::frame::{centered_line, frame_bottom, frame_separator, frame_top, framed_row};
use crate::palette::PanelColors;

const LABEL_WIDTH: usize = 22;
pub(crate) const PANEL_MAX_WIDTH: usize = 64;
/// Frame rows around the entry list: top, title, separator, separator, footer, bottom.
pub(crate) const PANEL_CHROME_ROWS: usize = 6;

pub(crate) enum RowView<'a> {
    Heading(&'a str),
    Option {
        key: char,
        label: &'a str,
        enabled: bool,
        focused: bool,
    },
}

pub(crate) struct PanelView<'a> {
    pub(crate) title: &'a str,
    pub(crate) rows: Vec<RowView<'a>>,
    pub(crate) footer: &'a str,
    pub(crate) colors: PanelColors,
}

#[must_use]
pub fn panel_width_for_terminal(cols: usize) -> usize {
    cols.min(PANEL_MAX_WIDTH)
}

pub(crate) fn format_panel(view: &PanelView<'_>, cols: usize) -> String {
    let colors = &view.colors;
    let width = panel_width_for_terminal(cols);
    let mut lines = Vec::with_capacity(view.rows.len() + PANEL_CHROME_ROWS);

    lines.push(frame_top(colors, width));
    lines.push(centered_line(colors, colors.heading, view.title, width));
    lines.push(frame_separator(colors, width));
    for row in &view.rows {
        lines.push(format_row(colors, row, width));
    }
    lines.push(frame_separator(colors, width));
    lines.push(centered_line(colors, colors.dim, view.footer, width));
    lines.push(frame_bottom(colors, width));

    lines.join("\n")
}

fn format_row(colors: &PanelColors, row: &RowView<'_>, width: usize) -> String {
    match row {
        RowView::Heading(text) => {
            let heading = format!(" {text}");
            framed_row(colors, width, &[(colors.heading, heading.as_str())])
        }
        RowView::Option {
            key,
            label,
            enabled,
            focused,
        } => {
            let marker = if *focused { "▸ " } else { "  " };
            let label_color = if *focused { colors.focus } else { "" };
            let (glyph_color, glyph) = indicator(colors, *enabled);
            let key = key.to_string();
            let label = format!("{label:<LABEL_WIDTH$}");
            framed_row(
                colors,
                width,
                &[
                    ("", marker),
                    (colors.key, key.as_str()),
                    ("", " "),
                    (label_color, label.as_str()),
                    ("", " "),
                    (glyph_color, glyph),
                ],
            )
        }
    }
}

fn indicator(colors: &PanelColors, enabled: bool) -> (&'static str, &'static str) {
    if enabled {
        (colors.on, "[ ON ]")
    } else {
        (colors.off, "[ OFF ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::panel::frame::display_width;

    fn sample_view(colors: PanelColors) -> PanelView<'static> {
        PanelView {
            title: "Options",
            rows: vec![
                RowView::Heading("Utility"),
                RowView::Option {
                    key: 'a',
                    label: "Anti-Cache",
                    enabled: true,
                    focused: true,
                },
                RowView::Option {
                    key: 'o',
                    label: "Anti-Compression",
                    enabled: false,
                    focused: false,
                },
            ],
            footer: "C:clear all",
            colors,
        }
    }

    #[test]
    fn plain_render_has_one_line_per_row_plus_chrome() {
        let rendered = format_panel(&sample_view(PanelColors::plain()), 80);
        assert_eq!(rendered.lines().count(), 3 + PANEL_CHROME_ROWS);
        for line in rendered.lines() {
            assert_eq!(display_width(line), PANEL_MAX_WIDTH);
        }
    }

    #[test]
    fn option_rows_show_key_label_and_indicator() {
        let rendered = format_panel(&sample_view(PanelColors::plain()), 80);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[3].contains(" Utility"));
        assert!(lines[4].starts_with("│▸ a Anti-Cache"));
        assert!(lines[4].contains("[ ON ]"));
        assert!(lines[5].starts_with("│  o Anti-Compression"));
        assert!(lines[5].contains("[ OFF ]"));
    }

    #[test]
    fn narrow_terminal_clips_rows_to_its_width() {
        let rendered = format_panel(&sample_view(PanelColors::plain()), 20);
        for line in rendered.lines() {
            assert_eq!(display_width(line), 20);
        }
    }

    #[test]
    fn colored_render_wraps_indicator_in_palette_escape() {
        let colors = Palette::Dark.colors();
        let rendered = format_panel(&sample_view(colors), 80);
        assert!(rendered.contains(&format!("{}[ ON ]{}", colors.on, colors.reset)));
        assert!(rendered.contains(&format!("{}[ OFF ]{}", colors.off, colors.reset)));
    }
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::picker::Picker;
use crate::theme::ThemeColors;

/// Widget rendering a [`Picker`]'s header and windowed item rows.
pub struct PickerWidget<'a, T> {
    picker: &'a Picker<T>,
    theme: &'a ThemeColors,
    title: &'a str,
    block: Option<Block<'a>>,
}

impl<'a, T: Clone> PickerWidget<'a, T> {
    pub fn new(picker: &'a Picker<T>, theme: &'a ThemeColors, title: &'a str) -> Self {
        Self {
            picker,
            theme,
            title,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn header_line(&self) -> Line<'static> {
        let total = self.picker.filtered_len();
        let position = if total == 0 { 0 } else { self.picker.cursor() + 1 };
        let count = format!("({position}/{total})");

        let header_style = Style::default()
            .bg(self.theme.header_bg)
            .fg(self.theme.header_fg)
            .add_modifier(Modifier::BOLD);

        if self.picker.is_searching() {
            return Line::from(vec![
                Span::styled(format!(" Search {count} "), header_style),
                Span::raw(format!(" {}_", self.picker.search())),
            ]);
        }

        let hint = if self.picker.search().is_empty() {
            "/ to search".to_string()
        } else {
            self.picker.search().to_string()
        };
        Line::from(vec![
            Span::styled(format!(" {} {count} ", self.title), header_style),
            Span::styled(format!(" {hint}"), Style::default().fg(self.theme.faded_fg)),
        ])
    }
}

impl<'a, T: Clone> Widget for PickerWidget<'a, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        buf.set_line(inner.x, inner.y, &self.header_line(), inner.width);

        let (relative_cursor, labels) = self.picker.window();
        let accent = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);

        let mut y = inner.y + 1;
        for (i, label) in labels.iter().enumerate() {
            if y >= inner.y + inner.height {
                return;
            }
            let line = if i == relative_cursor {
                Line::from(vec![
                    Span::styled("→ ", accent),
                    Span::styled(label.clone(), accent),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(label.clone(), Style::default().fg(self.theme.file_fg)),
                ])
            };
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }

        if labels.len() < self.picker.rows() && y < inner.y + inner.height {
            let line = Line::from(Span::styled(
                "  no more items",
                Style::default().fg(self.theme.faded_fg),
            ));
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

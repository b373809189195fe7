use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::PreviewState;
use crate::preview::NO_SELECTION;
use crate::theme::ThemeColors;

/// Widget rendering the preview pane: a path header followed by the
/// already-rendered preview text.
pub struct PreviewWidget<'a> {
    state: &'a PreviewState,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(state: &'a PreviewState, theme: &'a ThemeColors) -> Self {
        Self {
            state,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl<'a> Widget for PreviewWidget<'a> {
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

        let header = if self.state.path.is_empty() {
            Line::from(Span::styled(
                " Preview ",
                Style::default()
                    .bg(self.theme.header_bg)
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                format!(" {} ", self.state.path),
                Style::default()
                    .bg(self.theme.header_bg)
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        buf.set_line(inner.x, inner.y, &header, inner.width);

        let body_style = if self.state.content.starts_with("ERROR:") {
            Style::default().fg(self.theme.error_fg)
        } else if self.state.content == NO_SELECTION {
            Style::default().fg(self.theme.faded_fg)
        } else {
            Style::default().fg(self.theme.file_fg)
        };

        let mut y = inner.y + 1;
        for raw in self.state.content.lines() {
            if y >= inner.y + inner.height {
                break;
            }
            let line = Line::from(Span::styled(raw.to_string(), body_style));
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;
    use ratatui::widgets::Borders;

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn renders_path_header_and_content() {
        let state = PreviewState {
            path: "src/main.rs".to_string(),
            content: "fn main() {}\nline two".to_string(),
        };
        let theme = dark_theme();
        let widget = PreviewWidget::new(&state, &theme)
            .block(Block::default().borders(Borders::ALL));
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("src/main.rs"));
        assert!(content.contains("fn main() {}"));
        assert!(content.contains("line two"));
    }

    #[test]
    fn placeholder_renders_when_no_path() {
        let state = PreviewState {
            path: String::new(),
            content: NO_SELECTION.to_string(),
        };
        let theme = dark_theme();
        let widget = PreviewWidget::new(&state, &theme);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Preview"));
        assert!(content.contains(NO_SELECTION));
    }

    #[test]
    fn error_content_uses_error_style() {
        let state = PreviewState {
            path: "missing.txt".to_string(),
            content: "ERROR: no such file".to_string(),
        };
        let theme = dark_theme();
        let widget = PreviewWidget::new(&state, &theme);
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let cell = buf.cell((0, 1)).unwrap();
        assert_eq!(cell.fg, theme.error_fg);
    }

    #[test]
    fn long_content_is_clipped_to_area() {
        let state = PreviewState {
            path: "big.txt".to_string(),
            content: (0..100).map(|i| format!("line {i}\n")).collect(),
        };
        let theme = dark_theme();
        let widget = PreviewWidget::new(&state, &theme);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("line 3"));
        assert!(!content.contains("line 50"));
    }

    #[test]
    fn zero_area_no_panic() {
        let state = PreviewState::default();
        let theme = dark_theme();
        let widget = PreviewWidget::new(&state, &theme);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}

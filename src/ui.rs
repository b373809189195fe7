use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::picker::PickerWidget;
use crate::components::preview::PreviewWidget;

/// Draw the whole UI: the picker pane, and the preview pane beside it when
/// previews are enabled.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let (picker_area, preview_area) = if app.preview_enabled() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    // Row budget: pane height minus the border rows and the header line.
    app.picker
        .set_rows(picker_area.height.saturating_sub(3) as usize);

    let border_style = Style::default().fg(app.theme.border_fg);

    let picker_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Paths ");
    frame.render_widget(
        PickerWidget::new(&app.picker, &app.theme, "Paths").block(picker_block),
        picker_area,
    );

    if let Some(preview_area) = preview_area {
        let preview_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Preview ");
        frame.render_widget(
            PreviewWidget::new(&app.preview, &app.theme).block(preview_block),
            preview_area,
        );
    }
}

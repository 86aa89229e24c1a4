use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let paragraph = Paragraph::new(state.zone_text())
        .scroll((state.selection_state.zone_text_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Zone file"));

    frame.render_widget(paragraph, area);
}

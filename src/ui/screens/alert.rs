use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::Alert;
use crate::ui::Theme;

/// Rows needed to show `alert` inside its bordered box.
pub fn height(alert: &Alert) -> u16 {
    let lines = 2 + alert.message.lines().count().max(1);
    u16::try_from(lines + 2).unwrap_or(u16::MAX)
}

pub fn render(frame: &mut Frame, area: Rect, alert: &Alert, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(alert.kind.clone(), theme.error_style())),
        Line::from(""),
    ];
    lines.extend(alert.message.lines().map(|line| Line::from(line.to_string())));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error_style())
                .title(alert.heading.as_str()),
        );

    frame.render_widget(paragraph, area);
}

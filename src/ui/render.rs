use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;
use super::{Screen, Theme};

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = Theme::new();

    // Main layout: header, menu, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Length(1),  // Menu
            Constraint::Min(0),     // Main content
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    let header = Paragraph::new(format!(
        "ZONEDIT - {}                      [?] Help  [q] Quit",
        state.origin
    ))
    .style(theme.title_style());
    frame.render_widget(header, chunks[0]);

    let menu = Paragraph::new(menu_text(&state.current_screen));
    frame.render_widget(menu, chunks[1]);

    render_main_content(frame, chunks[2], state);

    render_status_bar(frame, chunks[3], state, &theme);
}

fn menu_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::ZoneTable => {
            " [a] Add record  [d] Delete  [t] Zone text  [r] Reload  [R] Reset  [x] Dismiss alert"
        }
        Screen::RecordForm => {
            " [←/→] Record type  [Tab] Next field  [Enter] Add record  [Ctrl+X] Dismiss alert  [Esc] Back"
        }
        Screen::ZoneText => " [↑/↓] Scroll  [Esc] Back",
        Screen::Help => " [Esc] Back",
    }
}

fn render_main_content(frame: &mut Frame, area: Rect, state: &AppState) {
    use super::screens;

    match &state.current_screen {
        Screen::ZoneTable => screens::zone_table::render(frame, area, state),
        Screen::RecordForm => screens::record_form::render(frame, area, state),
        Screen::ZoneText => screens::zone_text::render(frame, area, state),
        Screen::Help => screens::help::render(frame, area),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let status = match state.notifications.front() {
        Some(notification) => {
            let style = theme.notification_style(&notification.level);
            Paragraph::new(format!(
                "{} {}  [n] dismiss",
                notification.timestamp.format("%H:%M:%S"),
                notification.message
            ))
            .style(style)
        }
        None => {
            let serial = state
                .zone()
                .soa
                .as_ref()
                .map(|soa| soa.serial.to_string())
                .unwrap_or_else(|| "-".to_string());
            let saving = state
                .pending_operations
                .iter()
                .any(|op| op.is_in_progress() && op.is_mutation());
            Paragraph::new(format!(
                "{} | In flight: {} | Records: {} | Serial: {}",
                if saving { "Saving" } else { "Ready" },
                state.in_flight(),
                state.zone().len(),
                serial
            ))
        }
    };

    frame.render_widget(status, area);
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::state::{AlertSource, AppState};
use crate::ui::projection::{self, NameCell, TtlCell, ValueCell};
use crate::ui::Theme;

use super::alert;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();
    let alert = state
        .alert
        .as_ref()
        .filter(|a| a.source == AlertSource::ZoneTable);

    let mut constraints = vec![Constraint::Min(0)];
    if let Some(alert) = alert {
        constraints.push(Constraint::Length(alert::height(alert)));
    }
    if state.reset_error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_table(frame, chunks[0], state, &theme);

    let mut next = 1;
    if let Some(alert) = alert {
        alert::render(frame, chunks[next], alert, &theme);
        next += 1;
    }
    if let Some(message) = &state.reset_error {
        frame.render_widget(
            Paragraph::new(message.as_str()).style(theme.error_style()),
            chunks[next],
        );
    }
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = projection::project(state.zone());

    if rows.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Zone - No records");

        frame.render_widget(block, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Type"),
        Cell::from("Name"),
        Cell::from("Value"),
        Cell::from("TTL"),
        Cell::from(""),
    ])
    .style(theme.title_style())
    .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let name = match &row.name {
                NameCell::Apex => Cell::from(Span::styled(row.name.to_string(), theme.muted_style())),
                NameCell::Host(name) => Cell::from(name.clone()),
            };

            let value = match &row.value {
                ValueCell::Plain(value) => Cell::from(value.clone()),
                ValueCell::Preference { preference, host } => Cell::from(Line::from(vec![
                    Span::styled(format!(" {} ", preference), theme.badge_style()),
                    Span::raw(format!(" {}", host)),
                ])),
            };

            let ttl = match row.ttl {
                TtlCell::Explicit(_) => Cell::from(row.ttl.to_string()),
                _ => Cell::from(Span::styled(row.ttl.to_string(), theme.muted_style())),
            };

            let action = if row.deletable {
                Cell::from(Span::styled("Delete", theme.error_style()))
            } else {
                Cell::from(Span::styled("protected", theme.muted_style()))
            };

            Row::new(vec![
                Cell::from(row.record_type.as_str()),
                name,
                value,
                ttl,
                action,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Percentage(25),
        Constraint::Percentage(45),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Zone - {} records", rows.len())),
        )
        .row_highlight_style(theme.selected_style());

    let mut table_state = TableState::default().with_selected(Some(state.selection_state.zone_table_index));
    frame.render_stateful_widget(table, area, &mut table_state);
}

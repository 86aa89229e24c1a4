use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::qualified_name;
use crate::state::{AlertSource, AppState};
use crate::ui::Theme;
use crate::validation::{FieldId, FormField};

use super::alert;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();
    let alert = state
        .alert
        .as_ref()
        .filter(|a| a.source == AlertSource::RecordForm);

    let mut constraints = vec![Constraint::Min(0)];
    if let Some(alert) = alert {
        constraints.push(Constraint::Length(alert::height(alert)));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let record_form = &state.form;
    let form = record_form.form();

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Type:  "),
            Span::styled(
                format!("< {} >", record_form.record_type()),
                theme.title_style(),
            ),
        ]),
        Line::from(""),
    ];

    for (index, field) in form.fields().iter().enumerate() {
        lines.push(field_line(field, index == form.focus(), state, &theme));
    }

    let preview = qualified_name(form.value(FieldId::Name), &state.origin);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Owner: ", theme.muted_style()),
        Span::raw(preview),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "[ Add record ]",
        theme.submit_style(form.submit_enabled()),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Add {} record", record_form.record_type())),
    );
    frame.render_widget(paragraph, chunks[0]);

    if let Some(alert) = alert {
        alert::render(frame, chunks[1], alert, &theme);
    }
}

fn field_line<'a>(field: &'a FormField, focused: bool, state: &AppState, theme: &Theme) -> Line<'a> {
    let label_style = if focused {
        theme.selected_style()
    } else {
        theme.muted_style()
    };
    let marker = if focused { "> " } else { "  " };

    let value = if field.value.is_empty() && field.id == FieldId::Ttl {
        match state.zone().ttl {
            Some(ttl) => Span::styled(format!("{} (default)", ttl), theme.muted_style()),
            None => Span::raw(""),
        }
    } else if field.show_invalid() {
        Span::styled(field.value.as_str(), theme.error_style())
    } else {
        Span::raw(field.value.as_str())
    };

    let mut spans = vec![
        Span::styled(format!("{}{:<12}", marker, field.id.label()), label_style),
        value,
    ];
    if focused {
        spans.push(Span::styled("_", theme.muted_style()));
    }
    if field.show_invalid() {
        spans.push(Span::styled("  invalid", theme.error_style()));
    }

    Line::from(spans)
}

use ratatui::{
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: ratatui::layout::Rect) {
    let theme = Theme::new();

    let help_items = vec![
        "ZONEDIT - DNS zone editor",
        "",
        "Global Keybindings:",
        "  q / Ctrl+C    - Quit application",
        "  ?             - Show this help screen",
        "  Esc           - Go back to previous screen",
        "  n             - Dismiss the oldest notification",
        "",
        "Zone Table:",
        "  ↑ / k         - Move up",
        "  ↓ / j         - Move down",
        "  a             - Add a record",
        "  d / Delete    - Delete selected record",
        "  t             - Show the zone file text",
        "  r             - Reload the zone from the server",
        "  R             - Reset the zone to its baseline",
        "  x             - Dismiss the error box",
        "",
        "Record Form:",
        "  ← / →         - Change record type",
        "  Tab / ↓       - Next field",
        "  Shift+Tab / ↑ - Previous field",
        "  Enter         - Add the record",
        "  Ctrl+X        - Dismiss the error box",
        "  Esc           - Back to the table",
        "",
        "Zone Text:",
        "  ↑ / ↓         - Scroll",
        "  PgUp / PgDn   - Scroll by page",
        "",
        "Protected records (the primary nameserver and its address)",
        "cannot be deleted.",
        "",
        "Press Esc to return to previous screen",
    ];

    let list_items: Vec<ListItem> = help_items
        .iter()
        .map(|item| ListItem::new(*item))
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help - Keybindings")
            .style(theme.title_style()),
    );

    frame.render_widget(list, area);
}

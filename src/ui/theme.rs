use ratatui::style::{Color, Modifier, Style};

use crate::state::NotificationLevel;

pub struct Theme {
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub selected: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            selected: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Secondary text: apex markers, inherited TTLs, protected rows.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// MX preference shown in front of the exchange host.
    pub fn badge_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(self.muted)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn submit_style(&self, enabled: bool) -> Style {
        if enabled {
            self.success_style().add_modifier(Modifier::BOLD)
        } else {
            self.muted_style().add_modifier(Modifier::DIM)
        }
    }

    pub fn notification_style(&self, level: &NotificationLevel) -> Style {
        match level {
            NotificationLevel::Info => self.muted_style(),
            NotificationLevel::Success => self.success_style(),
            NotificationLevel::Warning => self.warning_style(),
            NotificationLevel::Error => self.error_style(),
        }
    }
}

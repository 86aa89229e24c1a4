use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::models::Zone;
use crate::ui::Screen;

use super::async_ops::AsyncOperation;
use super::mutation::Commit;
use super::record_form::RecordForm;
use super::selection::SelectionState;

/// Message shown when the reset endpoint fails.
pub const RESET_FAILED: &str = "Failed to reset the zone";

#[derive(Debug, Clone)]
pub struct AppState {
    // Core data
    pub origin: String,
    zone: Zone,
    zone_text: String,

    // UI state
    pub current_screen: Screen,
    pub previous_screen: Vec<Screen>,
    pub selection_state: SelectionState,
    pub form: RecordForm,
    pub alert: Option<Alert>,
    pub reset_error: Option<String>,

    // Async operations tracking
    pub pending_operations: Vec<AsyncOperation>,
    pub notifications: VecDeque<Notification>,

    // Application control
    pub should_quit: bool,
}

/// Dismissible error attached to the form that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub source: AlertSource,
    pub heading: String,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSource {
    RecordForm,
    ZoneTable,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AppState {
    pub fn new(origin: String, zone: Zone, zone_text: String) -> Self {
        Self {
            origin,
            zone,
            zone_text,
            current_screen: Screen::default(),
            previous_screen: Vec::new(),
            selection_state: SelectionState::default(),
            form: RecordForm::default(),
            alert: None,
            reset_error: None,
            pending_operations: Vec::new(),
            notifications: VecDeque::new(),
            should_quit: false,
        }
    }

    /// The committed zone.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Zone text as last accepted by (or loaded from) the server.
    pub fn zone_text(&self) -> &str {
        &self.zone_text
    }

    /// Replaces the current zone with an accepted candidate. This is the
    /// only way the zone changes after start-up.
    pub fn commit(&mut self, commit: Commit) {
        self.zone = commit.zone;
        self.zone_text = commit.zone_text;
        self.selection_state.clamp(self.zone.len());
    }

    // Navigation methods
    pub fn navigate_to(&mut self, screen: Screen) {
        if self.current_screen == screen {
            return;
        }
        self.previous_screen.push(self.current_screen.clone());
        self.current_screen = screen;
    }

    pub fn navigate_back(&mut self) {
        if let Some(previous) = self.previous_screen.pop() {
            self.current_screen = previous;
        }
    }

    // Notification methods
    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push_back(notification);

        // Keep only the last 50 notifications
        while self.notifications.len() > 50 {
            self.notifications.pop_front();
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // Async operation tracking
    pub fn track(&mut self, operation: AsyncOperation) -> Uuid {
        let id = operation.id;
        self.pending_operations.push(operation);
        id
    }

    pub fn get_operation_mut(&mut self, id: Uuid) -> Option<&mut AsyncOperation> {
        self.pending_operations.iter_mut().find(|o| o.id == id)
    }

    /// Drops finished operations from the tracking list.
    pub fn prune_operations(&mut self) {
        self.pending_operations.retain(AsyncOperation::is_in_progress);
    }

    pub fn in_flight(&self) -> usize {
        self.pending_operations
            .iter()
            .filter(|o| o.is_in_progress())
            .count()
    }
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            timestamp: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            timestamp: Utc::now(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            timestamp: Utc::now(),
        }
    }
}

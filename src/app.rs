use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::ZoneStore;
use crate::codec::ZoneCodec;
use crate::config::{Settings, ZoneditConfig};
use crate::events::{handle_event, Action};
use crate::models::Zone;
use crate::state::app_state::RESET_FAILED;
use crate::state::mutation::{change_from_form, propose};
use crate::state::{
    Alert, AlertSource, AppState, AsyncOperation, AsyncOperationResult, Change, Commit,
    MutationError, Notification, OperationError, OperationType, RecordForm,
};
use crate::ui::projection::project;
use crate::ui::render;

/// How long the input task waits for a key before handing control back.
const INPUT_POLL: Duration = Duration::from_millis(250);

pub struct App {
    pub state: AppState,
    settings: Settings,
    store: Arc<dyn ZoneStore>,
    codec: Arc<dyn ZoneCodec>,
    /// Form contents at submit time, per add still in flight.
    submitted_forms: HashMap<Uuid, RecordForm>,
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Fetches and parses the zone, then builds the initial state.
    pub async fn bootstrap(
        config: &ZoneditConfig,
        store: Arc<dyn ZoneStore>,
        codec: Arc<dyn ZoneCodec>,
    ) -> Result<Self> {
        let (zone, zone_text) = load_zone(store.as_ref(), codec.as_ref())
            .await
            .with_context(|| format!("Failed to load the zone from {}", config.server.endpoint))?;

        let origin = config.server.origin.clone();
        info!(%origin, records = zone.len(), "zone loaded");

        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state: AppState::new(origin, zone, zone_text),
            settings: config.settings.clone(),
            store,
            codec,
            submitted_forms: HashMap::new(),
            action_tx,
            action_rx,
        })
    }

    /// Main event loop following The Elm Architecture pattern
    pub async fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // One input task at a time, so no keystroke is read and then dropped.
        let mut input = tokio::task::spawn_blocking(next_event);

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            tokio::select! {
                joined = &mut input => {
                    input = tokio::task::spawn_blocking(next_event);
                    if let Ok(Ok(Some(event))) = joined {
                        let action = handle_event(event, &self.state.current_screen);
                        if !matches!(action, Action::None) {
                            self.update(action);
                        }
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    self.update(action);
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Update function (TEA Update) - processes Actions and updates state
    pub fn update(&mut self, action: Action) {
        match action {
            // Navigation
            Action::NavigateTo(screen) => {
                self.state.navigate_to(screen);
            }

            Action::NavigateBack => {
                self.state.navigate_back();
            }

            // Zone table
            Action::SelectNext => {
                let len = self.state.zone().len();
                if len > 0 {
                    self.state.selection_state.zone_table_index =
                        (self.state.selection_state.zone_table_index + 1) % len;
                }
            }

            Action::SelectPrevious => {
                let len = self.state.zone().len();
                if len > 0 {
                    self.state.selection_state.zone_table_index =
                        (self.state.selection_state.zone_table_index + len - 1) % len;
                }
            }

            Action::DeleteSelected => {
                let rows = project(self.state.zone());
                let Some(row) = rows.get(self.state.selection_state.zone_table_index) else {
                    return;
                };

                if !row.deletable {
                    self.state.add_notification(Notification::warning(format!(
                        "The {} record for {} cannot be deleted",
                        row.record_type, row.name
                    )));
                    return;
                }

                let change = Change::Remove {
                    record_type: row.record_type,
                    display_id: row.id,
                };
                self.spawn_mutation(change, OperationType::DeleteRecord(row.record_type));
            }

            Action::ScrollZoneText(delta) => {
                let lines = self.state.zone_text().lines().count();
                let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
                let scroll = &mut self.state.selection_state.zone_text_scroll;
                *scroll = scroll.saturating_add_signed(delta).min(max);
            }

            // Record form
            Action::NextRecordType => {
                let next = self.state.form.record_type().next();
                self.state.form.switch_type(next);
            }

            Action::PreviousRecordType => {
                let previous = self.state.form.record_type().previous();
                self.state.form.switch_type(previous);
            }

            Action::FormInput(c) => {
                self.state.form.form_mut().push_char(c);
            }

            Action::FormBackspace => {
                self.state.form.form_mut().pop_char();
            }

            Action::NextFormField => {
                self.state.form.form_mut().focus_next();
            }

            Action::PreviousFormField => {
                self.state.form.form_mut().focus_previous();
            }

            Action::SubmitForm => match change_from_form(&mut self.state.form) {
                Ok(change) => {
                    let record_type = self.state.form.record_type();
                    let op_id = self.spawn_mutation(change, OperationType::AddRecord(record_type));
                    self.submitted_forms.insert(op_id, self.state.form.clone());
                }
                Err(MutationError::InvalidForm) => {}
                Err(e) => {
                    self.state.alert = Some(Alert {
                        source: AlertSource::RecordForm,
                        heading: "Error adding the record:".to_string(),
                        kind: "Invalid record".to_string(),
                        message: e.to_string(),
                    });
                }
            },

            Action::DismissAlert => {
                self.state.dismiss_alert();
            }

            // Whole zone
            Action::ResetZone => {
                self.spawn_reset();
            }

            Action::ReloadZone => {
                self.spawn_reload();
            }

            // Async operation results
            Action::AsyncOperationCompleted(op_id, result) => {
                let Some(op) = self.state.get_operation_mut(op_id) else {
                    debug!(%op_id, "completion for an untracked operation");
                    return;
                };
                match &result {
                    Ok(_) => op.complete(),
                    Err(e) => op.fail(e.to_string()),
                }
                let operation_type = op.operation_type.clone();
                let submitted = self.submitted_forms.remove(&op_id);
                debug!(
                    %op_id,
                    operation = ?operation_type,
                    elapsed_ms = (Utc::now() - op.started_at).num_milliseconds(),
                    ok = result.is_ok(),
                    "operation finished"
                );

                match result {
                    Ok(async_result) => self.handle_async_result(operation_type, async_result, submitted),
                    Err(error) => self.handle_async_error(operation_type, error),
                }
                self.state.prune_operations();
            }

            // Notifications
            Action::DismissNotification => {
                self.state.dismiss_notification();
            }

            // System
            Action::Quit => {
                self.state.should_quit = true;
            }

            Action::None => {}
        }
    }

    fn handle_async_result(
        &mut self,
        operation_type: OperationType,
        result: AsyncOperationResult,
        submitted: Option<RecordForm>,
    ) {
        match result {
            AsyncOperationResult::Committed(commit) => {
                self.state.commit(commit);
                match operation_type {
                    OperationType::AddRecord(record_type) => {
                        // Input typed while the add was in flight stays.
                        if submitted.is_some_and(|form| self.state.form.same_input(&form)) {
                            self.state.form = RecordForm::new(record_type);
                        }
                        self.state
                            .add_notification(Notification::success(format!("{} record added", record_type)));
                    }
                    OperationType::DeleteRecord(record_type) => {
                        self.state
                            .add_notification(Notification::success(format!("{} record deleted", record_type)));
                    }
                    _ => {}
                }
            }

            AsyncOperationResult::ZoneReset => {
                self.state.reset_error = None;
                self.state.add_notification(Notification::success("Zone reset"));
                self.spawn_reload();
            }

            AsyncOperationResult::ZoneLoaded { zone, zone_text } => {
                self.state.commit(Commit { zone, zone_text });
                self.state.add_notification(Notification::info("Zone reloaded"));
            }
        }
    }

    fn handle_async_error(&mut self, operation_type: OperationType, error: OperationError) {
        match error {
            OperationError::Mutation(MutationError::Persist(e)) => {
                let (source, heading) = alert_placement(&operation_type);
                self.state.alert = Some(Alert {
                    source,
                    heading: heading.to_string(),
                    kind: e.kind().to_string(),
                    message: e.message().to_string(),
                });

                if e.is_network() {
                    self.schedule_reload();
                }
            }

            OperationError::Mutation(MutationError::Codec(e)) => {
                let (source, heading) = alert_placement(&operation_type);
                self.state.alert = Some(Alert {
                    source,
                    heading: heading.to_string(),
                    kind: "Invalid record".to_string(),
                    message: e.to_string(),
                });
            }

            OperationError::Mutation(e) => {
                self.state.add_notification(Notification::warning(e.to_string()));
            }

            OperationError::Reset(_) => {
                self.state.reset_error = Some(RESET_FAILED.to_string());
            }

            OperationError::Load(message) => {
                self.state
                    .add_notification(Notification::error(format!("Failed to load the zone: {}", message)));
            }
        }
    }

    // Async operation spawners
    fn spawn_mutation(&mut self, change: Change, operation_type: OperationType) -> Uuid {
        // A new attempt replaces whatever the last one reported.
        self.state.dismiss_alert();

        let op_id = self.state.track(AsyncOperation::new(operation_type));
        let current = self.state.zone().clone();
        let store = Arc::clone(&self.store);
        let codec = Arc::clone(&self.codec);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = propose(&current, &change, codec.as_ref(), store.as_ref(), Utc::now())
                .await
                .map(AsyncOperationResult::Committed)
                .map_err(OperationError::from);

            let _ = tx.send(Action::AsyncOperationCompleted(op_id, result));
        });

        op_id
    }

    fn spawn_reset(&mut self) {
        self.state.reset_error = None;

        let op_id = self.state.track(AsyncOperation::new(OperationType::ResetZone));
        let store = Arc::clone(&self.store);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = match store.reset_zone().await {
                Ok(()) => Ok(AsyncOperationResult::ZoneReset),
                Err(e) => {
                    warn!(error = %e, "zone reset failed");
                    Err(OperationError::Reset(e.to_string()))
                }
            };

            let _ = tx.send(Action::AsyncOperationCompleted(op_id, result));
        });
    }

    fn spawn_reload(&mut self) {
        let op_id = self.state.track(AsyncOperation::new(OperationType::LoadZone));
        let store = Arc::clone(&self.store);
        let codec = Arc::clone(&self.codec);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = load_zone(store.as_ref(), codec.as_ref())
                .await
                .map(|(zone, zone_text)| AsyncOperationResult::ZoneLoaded { zone, zone_text });

            let _ = tx.send(Action::AsyncOperationCompleted(op_id, result));
        });
    }

    fn schedule_reload(&self) {
        let delay = self.settings.reload_delay();
        let tx = self.action_tx.clone();
        debug!(?delay, "reload scheduled after network failure");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::ReloadZone);
        });
    }
}

/// Where an edit's failure is shown, and under which heading.
fn alert_placement(operation_type: &OperationType) -> (AlertSource, &'static str) {
    match operation_type {
        OperationType::DeleteRecord(_) => (AlertSource::ZoneTable, "Error deleting the record:"),
        _ => (AlertSource::RecordForm, "Error adding the record:"),
    }
}

async fn load_zone(
    store: &dyn ZoneStore,
    codec: &dyn ZoneCodec,
) -> Result<(Zone, String), OperationError> {
    let zone_text = store
        .fetch_zone()
        .await
        .map_err(|e| OperationError::Load(e.to_string()))?;
    let zone = codec
        .parse(&zone_text)
        .map_err(|e| OperationError::Load(e.to_string()))?;
    Ok((zone, zone_text))
}

fn next_event() -> std::io::Result<Option<Event>> {
    if event::poll(INPUT_POLL)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::test_support::MemoryStore;
    use crate::api::PersistError;
    use crate::codec::ZoneFileCodec;
    use crate::models::RecordType;
    use crate::state::async_ops::AsyncStatus;
    use crate::state::NotificationLevel;
    use crate::ui::Screen;
    use crate::validation::FieldId;

    const ZONE: &str = r#"$ORIGIN example.com.
$TTL 3600
@   IN  SOA ns1.example.com. admin.example.com. ( 100 3600 600 604800 300 )
@   IN  NS  ns1
ns1 IN  A   1.2.3.4
www IN  A   5.6.7.8
"#;

    async fn app_with(store: MemoryStore) -> (App, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let mut config = ZoneditConfig::default();
        config.settings.reload_delay_seconds = 0;

        let codec = Arc::new(ZoneFileCodec::new("example.com.").unwrap());
        let app = App::bootstrap(&config, store.clone(), codec).await.unwrap();
        (app, store)
    }

    /// Feeds the next action produced by a background task back into the app.
    async fn settle(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.update(action);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(Action::FormInput(c));
        }
    }

    #[tokio::test]
    async fn test_bootstrap_loads_zone() {
        let (app, _) = app_with(MemoryStore::new(ZONE)).await;

        assert_eq!(app.state.origin, "example.com.");
        assert_eq!(app.state.zone().len(), 3);
        assert_eq!(app.state.zone_text(), ZONE);
    }

    #[tokio::test]
    async fn test_bootstrap_fails_on_unparseable_zone() {
        let store: Arc<dyn ZoneStore> = Arc::new(MemoryStore::new("www IN LOC 1 2 3"));
        let codec = Arc::new(ZoneFileCodec::new("example.com.").unwrap());
        let result = App::bootstrap(&ZoneditConfig::default(), store, codec).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_record_through_form() {
        let (mut app, store) = app_with(MemoryStore::new(ZONE)).await;
        app.update(Action::NavigateTo(Screen::RecordForm));

        type_text(&mut app, "api");
        app.update(Action::NextFormField);
        type_text(&mut app, "9.9.9.9");
        app.update(Action::SubmitForm);
        assert_eq!(app.state.in_flight(), 1);

        settle(&mut app).await;

        assert_eq!(app.state.zone().records(RecordType::A).len(), 3);
        assert!(app.state.zone_text().contains("9.9.9.9"));
        assert_eq!(store.replacements(), vec![app.state.zone_text().to_string()]);
        assert!(app.state.zone().soa.as_ref().unwrap().serial > 100);
        assert_eq!(app.state.form.form().value(FieldId::Name), "");
        assert!(app.state.pending_operations.is_empty());
        assert_eq!(
            app.state.notifications.back().unwrap().level,
            NotificationLevel::Success
        );
    }

    #[tokio::test]
    async fn test_form_edited_during_add_is_kept() {
        let (mut app, _) = app_with(MemoryStore::new(ZONE)).await;
        app.update(Action::NavigateTo(Screen::RecordForm));

        type_text(&mut app, "api");
        app.update(Action::NextFormField);
        type_text(&mut app, "9.9.9.9");
        app.update(Action::SubmitForm);

        // The next record is started before the first one is saved.
        app.update(Action::PreviousFormField);
        type_text(&mut app, "2");
        settle(&mut app).await;

        assert_eq!(app.state.zone().records(RecordType::A).len(), 3);
        assert_eq!(app.state.form.form().value(FieldId::Name), "api2");
        assert_eq!(app.state.form.form().value(FieldId::Ip), "9.9.9.9");
    }

    #[tokio::test]
    async fn test_unwritable_record_alerts_on_form() {
        let (mut app, store) = app_with(MemoryStore::new(ZONE)).await;
        app.update(Action::NavigateTo(Screen::RecordForm));
        app.update(Action::NextRecordType);
        assert_eq!(app.state.form.record_type(), RecordType::AAAA);

        type_text(&mut app, "v6");
        app.update(Action::NextFormField);
        type_text(&mut app, "fe80::1%eth0");
        app.update(Action::SubmitForm);
        settle(&mut app).await;

        assert!(store.replacements().is_empty());
        let alert = app.state.alert.clone().unwrap();
        assert_eq!(alert.source, AlertSource::RecordForm);
        assert_eq!(alert.kind, "Invalid record");
        assert_eq!(app.state.form.form().value(FieldId::Name), "v6");
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let (mut app, store) = app_with(MemoryStore::new(ZONE)).await;
        app.update(Action::NavigateTo(Screen::RecordForm));

        type_text(&mut app, "api");
        app.update(Action::NextFormField);
        type_text(&mut app, "999.1.1.1");
        app.update(Action::SubmitForm);

        assert_eq!(app.state.in_flight(), 0);
        assert!(store.replacements().is_empty());
        assert!(app.state.form.form().fields().iter().all(|f| f.touched));
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_zone_and_shows_alert() {
        let store = MemoryStore::new(ZONE).failing_with(PersistError::Rejected {
            kind: "BadZoneFile".to_string(),
            message: "CNAME and other data".to_string(),
        });
        let (mut app, _) = app_with(store).await;
        let before = app.state.zone().clone();

        type_text(&mut app, "www");
        app.update(Action::NextRecordType);
        app.update(Action::NextRecordType);
        assert_eq!(app.state.form.record_type(), RecordType::CNAME);
        app.update(Action::NextFormField);
        type_text(&mut app, "ns1");
        app.update(Action::SubmitForm);
        settle(&mut app).await;

        assert_eq!(app.state.zone(), &before);
        let alert = app.state.alert.clone().unwrap();
        assert_eq!(alert.source, AlertSource::RecordForm);
        assert_eq!(alert.heading, "Error adding the record:");
        assert_eq!(alert.kind, "BadZoneFile");
        assert_eq!(alert.message, "CNAME and other data");

        app.update(Action::DismissAlert);
        assert!(app.state.alert.is_none());
    }

    #[tokio::test]
    async fn test_delete_protected_row_is_refused() {
        let (mut app, store) = app_with(MemoryStore::new(ZONE)).await;

        // Row 1 is the primary NS.
        app.update(Action::DeleteSelected);

        assert_eq!(app.state.in_flight(), 0);
        assert!(store.replacements().is_empty());
        assert_eq!(
            app.state.notifications.back().unwrap().level,
            NotificationLevel::Warning
        );
    }

    #[tokio::test]
    async fn test_delete_selected_row() {
        let (mut app, _) = app_with(MemoryStore::new(ZONE)).await;

        app.update(Action::SelectPrevious);
        assert_eq!(app.state.selection_state.zone_table_index, 2);
        app.update(Action::DeleteSelected);
        settle(&mut app).await;

        assert_eq!(app.state.zone().records(RecordType::A).len(), 1);
        assert_eq!(app.state.selection_state.zone_table_index, 1);
    }

    #[tokio::test]
    async fn test_network_failure_schedules_reload() {
        let store = MemoryStore::new(ZONE).failing_with(PersistError::Network {
            message: "connection refused".to_string(),
        });
        let (mut app, _) = app_with(store).await;

        app.state.selection_state.zone_table_index = 2;
        app.update(Action::DeleteSelected);
        settle(&mut app).await;

        let alert = app.state.alert.clone().unwrap();
        assert_eq!(alert.source, AlertSource::ZoneTable);
        assert_eq!(alert.heading, "Error deleting the record:");
        assert_eq!(app.state.zone().len(), 3);

        let reload = app.action_rx.recv().await.unwrap();
        assert!(matches!(reload, Action::ReloadZone));
        app.update(reload);
        assert_eq!(
            app.state.pending_operations[0].operation_type,
            OperationType::LoadZone
        );

        settle(&mut app).await;
        assert_eq!(app.state.zone().len(), 3);
        assert!(app.state.pending_operations.is_empty());
    }

    #[tokio::test]
    async fn test_failed_reset_sets_message() {
        let store = MemoryStore {
            reset_fails: true,
            ..MemoryStore::new(ZONE)
        };
        let (mut app, _) = app_with(store).await;

        app.update(Action::ResetZone);
        assert_eq!(app.state.pending_operations[0].status, AsyncStatus::InProgress);
        settle(&mut app).await;

        assert_eq!(app.state.reset_error.as_deref(), Some(RESET_FAILED));
    }

    #[tokio::test]
    async fn test_successful_reset_reloads() {
        let (mut app, _) = app_with(MemoryStore::new(ZONE)).await;

        app.update(Action::ResetZone);
        settle(&mut app).await;
        assert!(app.state.reset_error.is_none());
        assert_eq!(
            app.state.pending_operations[0].operation_type,
            OperationType::LoadZone
        );

        settle(&mut app).await;
        assert!(app.state.pending_operations.is_empty());
    }

    #[tokio::test]
    async fn test_zone_text_scroll_is_bounded() {
        let (mut app, _) = app_with(MemoryStore::new(ZONE)).await;

        app.update(Action::ScrollZoneText(-3));
        assert_eq!(app.state.selection_state.zone_text_scroll, 0);
        app.update(Action::ScrollZoneText(100));
        assert_eq!(
            app.state.selection_state.zone_text_scroll as usize,
            ZONE.lines().count() - 1
        );
    }
}

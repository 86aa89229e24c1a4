use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;
use crate::ui::Screen;

/// Convert crossterm events to Actions
pub fn handle_event(event: Event, current_screen: &Screen) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key_event(key_event, current_screen)
        }
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, current_screen: &Screen) -> Action {
    // Keys that work everywhere, including while typing into a form
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,
        (KeyCode::Esc, _) => return Action::NavigateBack,
        _ => {}
    }

    if *current_screen == Screen::RecordForm {
        return handle_record_form_keys(key);
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('?') => return Action::NavigateTo(Screen::Help),
        KeyCode::Char('n') => return Action::DismissNotification,
        _ => {}
    }

    match current_screen {
        Screen::ZoneTable => handle_zone_table_keys(key),
        Screen::ZoneText => handle_zone_text_keys(key),
        _ => Action::None,
    }
}

fn handle_zone_table_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('a') => Action::NavigateTo(Screen::RecordForm),
        KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
        KeyCode::Char('t') => Action::NavigateTo(Screen::ZoneText),
        KeyCode::Char('x') => Action::DismissAlert,
        KeyCode::Char('r') => Action::ReloadZone,
        KeyCode::Char('R') => Action::ResetZone,
        _ => Action::None,
    }
}

fn handle_zone_text_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollZoneText(-1),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollZoneText(1),
        KeyCode::PageUp => Action::ScrollZoneText(-10),
        KeyCode::PageDown => Action::ScrollZoneText(10),
        _ => Action::None,
    }
}

fn handle_record_form_keys(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::DismissAlert,
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Action::NextFormField,
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Action::PreviousFormField,
        (KeyCode::Right, _) => Action::NextRecordType,
        (KeyCode::Left, _) => Action::PreviousRecordType,
        (KeyCode::Enter, _) => Action::SubmitForm,
        (KeyCode::Backspace, _) => Action::FormBackspace,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::FormInput(c),
        _ => Action::None,
    }
}

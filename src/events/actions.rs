use uuid::Uuid;

use crate::state::{AsyncOperationResult, OperationError};
use crate::ui::Screen;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateTo(Screen),
    NavigateBack,

    // Zone table
    SelectNext,
    SelectPrevious,
    DeleteSelected,
    ScrollZoneText(i16),

    // Record form
    NextRecordType,
    PreviousRecordType,
    FormInput(char),
    FormBackspace,
    NextFormField,
    PreviousFormField,
    SubmitForm,
    DismissAlert,

    // Whole zone
    ResetZone,
    ReloadZone,

    // Async operation results
    AsyncOperationCompleted(Uuid, Result<AsyncOperationResult, OperationError>),

    // Notifications
    DismissNotification,

    // System
    Quit,

    // No-op
    None,
}

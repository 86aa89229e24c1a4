pub mod app_state;
pub mod async_ops;
pub mod mutation;
pub mod record_form;
pub mod selection;

pub use app_state::{Alert, AlertSource, AppState, Notification, NotificationLevel};
pub use async_ops::{AsyncOperation, AsyncOperationResult, OperationError, OperationType};
pub use mutation::{Change, Commit, MutationError};
pub use record_form::RecordForm;

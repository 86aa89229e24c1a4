pub mod field;
pub mod form;

pub use field::FieldKind;
pub use form::{evaluate, FieldId, Form, FormField};

pub mod alert;
pub mod help;
pub mod record_form;
pub mod zone_table;
pub mod zone_text;

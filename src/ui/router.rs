#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    ZoneTable,
    RecordForm,
    ZoneText,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub zone_table_index: usize,
    pub zone_text_scroll: u16,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Keeps the table selection inside `rows` after the zone changed.
    pub fn clamp(&mut self, rows: usize) {
        if rows == 0 {
            self.zone_table_index = 0;
        } else if self.zone_table_index >= rows {
            self.zone_table_index = rows - 1;
        }
    }
}

//! Event handling for the Table component.

use crate::components::events::{ComponentEvents, EventResult};
use crate::input::{ClickEvent, ClickTarget, Modifiers};

use super::state::Table;

impl Table {
    /// Handle header click for sorting.
    ///
    /// Without multi-sort every click cycles the clicked field and replaces
    /// the sort. With multi-sort, Ctrl/Cmd+click adds or cycles the field in
    /// place, and a plain click resets the sort to the clicked field.
    pub fn on_header_click(&self, key: &str, modifiers: Modifiers) -> EventResult {
        match self.toggle_sort(key, modifiers) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }

    /// Handle click on data row with modifiers.
    ///
    /// `index` is the row's displayed (sorted) position.
    pub fn on_row_click(&self, index: usize, modifiers: Modifiers) -> EventResult {
        match self.click_row(index, modifiers) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }
}

impl ComponentEvents for Table {
    fn on_click(&self, event: &ClickEvent) -> EventResult {
        match &event.target {
            ClickTarget::Header(key) => self.on_header_click(key, event.modifiers),
            ClickTarget::Row(index) => self.on_row_click(*index, event.modifiers),
        }
    }
}

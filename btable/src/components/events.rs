//! Component event handling types and traits.
//!
//! Components handle clicks themselves and queue [`TableEvent`]s describing
//! what changed; the rendering layer drains the queue after each event.

use crate::components::table::SortSpec;
use crate::input::ClickEvent;

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Change notification emitted by a table.
///
/// `SortChanged` and `SelectionChanged` carry the full new value, not a diff.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The sort specification changed.
    SortChanged(SortSpec),
    /// The selection changed; IDs in displayed order.
    SelectionChanged(Vec<String>),
    /// A row became selected.
    RowSelected(String),
    /// A row stopped being selected.
    RowUnselected(String),
}

/// Trait for components that can handle click events.
///
/// The default implementation ignores every click.
pub trait ComponentEvents {
    /// Handle a click on a header or row.
    fn on_click(&self, _event: &ClickEvent) -> EventResult {
        EventResult::Ignored
    }
}

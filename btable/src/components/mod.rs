//! Table components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` - the component state type
//! - `events.rs` - click handling
//! - `mod.rs` - public exports

pub mod events;
pub mod selection;
pub mod table;

pub use events::{ComponentEvents, EventResult, TableEvent};
pub use selection::{Selection, SelectionMode};
pub use table::{Field, SortByFormatted, SortEntry, SortOrder, SortSpec, Table, TableId};

//! Table component - sorting and row selection over JSON rows.
//!
//! The Table component provides:
//! - Field definitions with formatters and formatted-value sort keys
//! - Multi-key stable sorting with optional custom comparers
//! - Header click cycling (`none -> ascending -> descending -> none`)
//! - Row selection (single, multi, or range with Ctrl/Shift modifiers)
//! - Change notifications for the rendering layer
//!
//! # Example
//!
//! ```
//! use btable::prelude::*;
//! use serde_json::json;
//!
//! let fields = vec![Field::new("name").sortable(), Field::new("age").sortable()];
//! let rows = vec![
//!     json!({"age": 27, "name": "Havij"}),
//!     json!({"age": 9, "name": "Cyndi"}),
//!     json!({"age": 42, "name": "Robert"}),
//! ];
//! let table = Table::new(
//!     TableConfig::new().selection_mode(SelectionMode::Single),
//!     fields,
//!     rows,
//! );
//!
//! table.on_header_click("name", Modifiers::NONE);
//! assert_eq!(table.aria_sort("name"), "ascending");
//! assert_eq!(table.row(0).unwrap()["name"], "Cyndi");
//!
//! table.on_row_click(0, Modifiers::NONE);
//! assert_eq!(table.selected_ids(), vec!["1".to_string()]);
//! ```

mod compare;
mod events;
mod item;
mod resolve;
mod sort;
mod state;

pub use compare::{RowComparator, collate, compare_keys};
pub use item::{Field, Formatter, SortByFormatted};
pub use resolve::{SortKey, display_value, raw_value, resolve_sort_key};
pub use sort::{ARIA_SORT_NONE, Comparer, SortEntry, SortOrder, SortSpec, next_order};
pub use state::{Table, TableId};

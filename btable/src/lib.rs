pub mod components;
pub mod config;
pub mod error;
pub mod input;
pub mod utils;

pub use config::TableConfig;
pub use error::TableError;

pub mod prelude {
    pub use crate::components::{ComponentEvents, EventResult, TableEvent};
    pub use crate::components::{Field, SortByFormatted, SortEntry, SortOrder, SortSpec};
    pub use crate::components::{Selection, SelectionMode, Table, TableId};
    pub use crate::config::{MustSort, TableConfig};
    pub use crate::error::TableError;
    pub use crate::input::{ClickEvent, ClickTarget, Modifiers};
}

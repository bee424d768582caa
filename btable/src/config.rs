//! Table configuration types.

use serde::Deserialize;

use crate::components::selection::SelectionMode;
use crate::components::table::{SortEntry, SortOrder};
use crate::error::TableError;

/// Per-table configuration.
///
/// Built in code with the builder methods, or decoded from JSON props with
/// [`TableConfig::from_json`]. Keys accept both `camelCase` and `snake_case`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Field whose value identifies a row. Rows fall back to their position
    /// when unset, or when the key is missing or duplicated on any row.
    #[serde(alias = "primary_key")]
    pub primary_key: Option<String>,

    /// How row clicks change the selection.
    #[serde(alias = "selection_mode", alias = "selectMode")]
    pub selection_mode: SelectionMode,

    /// Allow more than one sort key (Ctrl/Cmd+click adds a key).
    #[serde(alias = "multi_sort", alias = "multisort")]
    pub multi_sort: bool,

    /// Fields whose header cycle never returns to unsorted.
    #[serde(alias = "must_sort")]
    pub must_sort: MustSort,

    /// Place missing values last regardless of direction.
    #[serde(alias = "null_last")]
    pub null_last: bool,

    /// Sort applied at construction.
    #[serde(alias = "initial_sort", alias = "sortBy")]
    pub initial_sort: Vec<InitialSort>,
}

impl TableConfig {
    /// Create a default config (positional identity, no selection, single sort).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the primary-key field.
    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Enable multi-key sorting.
    pub fn multi_sort(mut self) -> Self {
        self.multi_sort = true;
        self
    }

    /// Never cycle any header back to unsorted.
    pub fn must_sort(mut self) -> Self {
        self.must_sort = MustSort::All;
        self
    }

    /// Never cycle the listed headers back to unsorted.
    pub fn must_sort_fields<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_sort = MustSort::Fields(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Place missing values last regardless of direction.
    pub fn null_last(mut self) -> Self {
        self.null_last = true;
        self
    }

    /// Add an initial sort key.
    pub fn sort_by(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.initial_sort.push(InitialSort {
            key: key.into(),
            order,
        });
        self
    }
}

/// A sort key applied at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitialSort {
    pub key: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl From<InitialSort> for SortEntry {
    fn from(initial: InitialSort) -> Self {
        SortEntry::new(initial.key, initial.order)
    }
}

/// Which headers skip the unsorted state when cycling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MustSortRepr")]
pub enum MustSort {
    #[default]
    Off,
    All,
    Fields(Vec<String>),
}

impl MustSort {
    /// Whether the rule applies to a field key.
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            MustSort::Off => false,
            MustSort::All => true,
            MustSort::Fields(keys) => keys.iter().any(|k| k == key),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MustSortRepr {
    Flag(bool),
    Fields(Vec<String>),
}

impl From<MustSortRepr> for MustSort {
    fn from(repr: MustSortRepr) -> Self {
        match repr {
            MustSortRepr::Flag(true) => MustSort::All,
            MustSortRepr::Flag(false) => MustSort::Off,
            MustSortRepr::Fields(keys) => MustSort::Fields(keys),
        }
    }
}

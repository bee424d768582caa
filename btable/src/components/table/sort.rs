//! Sort specification types and header-click cycling.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::TableError;

/// Custom row comparer attached to a sort entry.
///
/// Receives the two full rows, not just the resolved sort keys, so it can
/// inspect any field. The result is negated for descending entries.
pub type Comparer = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Direction of a sort entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    /// The `aria-sort` token for this direction.
    pub fn aria(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(TableError::invalid_sort_direction(s)),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
        }
    }
}

/// `aria-sort` value for a field that is not part of the sort.
pub const ARIA_SORT_NONE: &str = "none";

/// Next state of a field's sort cycle after a header click.
///
/// Starting from `initial`, the cycle is `none -> initial -> reversed -> none`.
/// With `must_sort` the `none` state is skipped once a direction is set.
pub fn next_order(
    current: Option<SortOrder>,
    initial: SortOrder,
    must_sort: bool,
) -> Option<SortOrder> {
    match current {
        None => Some(initial),
        Some(order) if order == initial => Some(order.reversed()),
        Some(_) if must_sort => Some(initial),
        Some(_) => None,
    }
}

/// One key of a sort specification.
#[derive(Clone)]
pub struct SortEntry {
    /// Field key this entry sorts by
    pub key: String,
    /// Direction
    pub order: SortOrder,
    /// Optional comparer replacing the default key comparison
    pub comparer: Option<Comparer>,
}

impl SortEntry {
    /// Create an entry without a custom comparer.
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
            comparer: None,
        }
    }

    /// Ascending entry.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    /// Descending entry.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    /// Attach a custom comparer.
    pub fn comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.comparer = Some(Arc::new(comparer));
        self
    }
}

impl fmt::Debug for SortEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortEntry")
            .field("key", &self.key)
            .field("order", &self.order)
            .field("comparer", &self.comparer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PartialEq for SortEntry {
    fn eq(&self, other: &Self) -> bool {
        let same_comparer = match (&self.comparer, &other.comparer) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.key == other.key && self.order == other.order && same_comparer
    }
}

/// Ordered sort keys; the first entry is the primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    entries: Vec<SortEntry>,
}

impl SortSpec {
    /// An empty spec (input order).
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec with a single entry.
    pub fn single(entry: SortEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Builder: append an entry.
    pub fn then(mut self, entry: SortEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortEntry> {
        self.entries.iter()
    }

    /// Entry for a field key.
    pub fn get(&self, key: &str) -> Option<&SortEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SortEntry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    /// Priority of a field key (0 = primary).
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Current direction of a field key.
    pub fn order_of(&self, key: &str) -> Option<SortOrder> {
        self.get(key).map(|e| e.order)
    }

    pub fn push(&mut self, entry: SortEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry for a field key, returning it.
    pub fn remove(&mut self, key: &str) -> Option<SortEntry> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    /// Keep only the entries for which `keep` returns true, returning the rest.
    pub fn retain(&mut self, mut keep: impl FnMut(&SortEntry) -> bool) -> Vec<SortEntry> {
        let (kept, dropped): (Vec<SortEntry>, Vec<SortEntry>) =
            self.entries.drain(..).partition(|e| keep(e));
        self.entries = kept;
        dropped
    }

    /// Remove and return every entry.
    pub fn take_entries(&mut self) -> Vec<SortEntry> {
        std::mem::take(&mut self.entries)
    }

    /// `(key, order)` pairs in priority order.
    pub fn summary(&self) -> Vec<(String, SortOrder)> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.order))
            .collect()
    }
}

impl FromIterator<SortEntry> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SortSpec {
    type Item = SortEntry;
    type IntoIter = std::vec::IntoIter<SortEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_from_ascending() {
        let asc = SortOrder::Ascending;
        assert_eq!(next_order(None, asc, false), Some(SortOrder::Ascending));
        assert_eq!(next_order(Some(SortOrder::Ascending), asc, false), Some(SortOrder::Descending));
        assert_eq!(next_order(Some(SortOrder::Descending), asc, false), None);
    }

    #[test]
    fn test_cycle_from_descending() {
        let desc = SortOrder::Descending;
        assert_eq!(next_order(None, desc, false), Some(SortOrder::Descending));
        assert_eq!(next_order(Some(SortOrder::Descending), desc, false), Some(SortOrder::Ascending));
        assert_eq!(next_order(Some(SortOrder::Ascending), desc, false), None);
    }

    #[test]
    fn test_must_sort_skips_none() {
        let asc = SortOrder::Ascending;
        assert_eq!(next_order(Some(SortOrder::Descending), asc, true), Some(SortOrder::Ascending));
        assert_eq!(next_order(None, asc, true), Some(SortOrder::Ascending));
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("Descending".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_apply_reverses_for_descending() {
        assert_eq!(SortOrder::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Descending.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_spec_lookup_and_removal() {
        let mut spec = SortSpec::single(SortEntry::desc("name")).then(SortEntry::asc("age"));
        assert_eq!(spec.position("age"), Some(1));
        assert_eq!(spec.order_of("name"), Some(SortOrder::Descending));
        assert_eq!(spec.order_of("email"), None);

        let removed = spec.remove("name").unwrap();
        assert_eq!(removed.key, "name");
        assert_eq!(spec.summary(), vec![("age".to_string(), SortOrder::Ascending)]);
    }

    #[test]
    fn test_entry_equality_uses_comparer_identity() {
        let entry = SortEntry::asc("name").comparer(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
        assert_eq!(entry, entry.clone());
        assert_ne!(entry, SortEntry::asc("name"));
    }
}

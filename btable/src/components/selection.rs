//! Selection state management for the table.
//!
//! Selection uses string row IDs so it stays stable when the displayed order
//! changes after a re-sort.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::TableError;

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SelectionMode {
    /// No selection allowed
    #[default]
    None,
    /// At most one row selected; clicking a row selects exactly it
    Single,
    /// Every click toggles the clicked row
    Multi,
    /// Click selects one row, Ctrl/Cmd+click toggles, Shift+click selects a range
    Range,
}

impl SelectionMode {
    /// Parse a mode leniently: unknown values disable selection.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: TableError| {
            log::warn!("{}; selection disabled", e);
            SelectionMode::None
        })
    }
}

impl FromStr for SelectionMode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(SelectionMode::None),
            "single" => Ok(SelectionMode::Single),
            "multi" | "multiple" => Ok(SelectionMode::Multi),
            "range" => Ok(SelectionMode::Range),
            _ => Err(TableError::invalid_selection_mode(s)),
        }
    }
}

impl From<String> for SelectionMode {
    fn from(value: String) -> Self {
        SelectionMode::parse_lenient(&value)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionMode::None => "none",
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
            SelectionMode::Range => "range",
        };
        f.write_str(name)
    }
}

/// ID-based selection state.
///
/// The selection itself is mode-agnostic; the table decides which operation a
/// click maps to. Every mutating operation returns the `(added, removed)` IDs.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<String>,
    /// Anchor for range selection (Shift+click starting point)
    anchor: Option<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected IDs, lexically ordered. The table reports them in displayed
    /// order instead.
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Row a Shift+click range starts from.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Deselect everything and forget the anchor. Returns the removed IDs.
    pub fn clear(&mut self) -> Vec<String> {
        let removed: Vec<String> = self.selected.drain().collect();
        self.anchor = None;
        removed
    }

    /// Select a single ID (clears others) and make it the anchor.
    /// Returns (added, removed) IDs.
    pub fn select(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        let removed: Vec<_> = self.selected.iter().filter(|&i| i != id).cloned().collect();
        let was_selected = self.selected.contains(id);
        self.selected.clear();
        self.selected.insert(id.to_string());
        self.anchor = Some(id.to_string());
        let added = if was_selected {
            vec![]
        } else {
            vec![id.to_string()]
        };
        (added, removed)
    }

    /// Add an ID without touching the rest of the selection or the anchor.
    /// Returns (added, removed) IDs.
    pub fn insert(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.insert(id.to_string()) {
            (vec![id.to_string()], vec![])
        } else {
            (vec![], vec![])
        }
    }

    /// Remove an ID without touching the rest of the selection.
    /// Returns (added, removed) IDs.
    pub fn remove(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            (vec![], vec![])
        }
    }

    /// Toggle selection of an ID (Ctrl+click behavior).
    ///
    /// The anchor moves to the ID only when it becomes selected.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            self.selected.insert(id.to_string());
            self.anchor = Some(id.to_string());
            (vec![id.to_string()], vec![])
        }
    }

    /// Replace the selection with the inclusive span between the anchor and
    /// `target_id` in `displayed` order (Shift+click).
    ///
    /// The anchor stays put, so consecutive Shift+clicks all measure from the
    /// same row. With no anchor, or when either end is not displayed, this is
    /// a plain [`Selection::select`] of the target.
    pub fn range_select(
        &mut self,
        target_id: &str,
        displayed: &[String],
    ) -> (Vec<String>, Vec<String>) {
        let span = self.anchor.as_deref().and_then(|anchor| {
            let from = displayed.iter().position(|id| id == anchor)?;
            let to = displayed.iter().position(|id| id == target_id)?;
            Some(from.min(to)..=from.max(to))
        });
        let Some(span) = span else {
            return self.select(target_id);
        };

        let in_span = &displayed[span];
        let removed = self.retain_selected(|id| in_span.iter().any(|s| s == id));
        let added = in_span
            .iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect();
        (added, removed)
    }

    /// Select all items from the provided list of IDs.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, all_ids: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        added
    }

    /// Drop every ID for which `keep` returns false.
    /// The anchor is cleared if it is dropped. Returns the removed IDs.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed = self.retain_selected(&mut keep);
        if self.anchor.as_deref().is_some_and(|a| !keep(a)) {
            self.anchor = None;
        }
        removed
    }

    fn retain_selected(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.selected.retain(|id| {
            let kept = keep(id);
            if !kept {
                removed.push(id.clone());
            }
            kept
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("single".parse::<SelectionMode>().unwrap(), SelectionMode::Single);
        assert_eq!("MULTI".parse::<SelectionMode>().unwrap(), SelectionMode::Multi);
        assert_eq!("range".parse::<SelectionMode>().unwrap(), SelectionMode::Range);
        assert_eq!("none".parse::<SelectionMode>().unwrap(), SelectionMode::None);
        assert!("lasso".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_invalid_mode_is_lenient() {
        assert_eq!(SelectionMode::parse_lenient("lasso"), SelectionMode::None);
        assert_eq!(SelectionMode::from("Range".to_string()), SelectionMode::Range);
    }

    #[test]
    fn test_select_replaces_and_sets_anchor() {
        let mut selection = Selection::new();
        selection.select("a");
        let (added, removed) = selection.select("b");
        assert_eq!(added, ids(&["b"]));
        assert_eq!(removed, ids(&["a"]));
        assert_eq!(selection.selected(), ids(&["b"]));
        assert_eq!(selection.anchor(), Some("b"));
    }

    #[test]
    fn test_select_same_is_idempotent() {
        let mut selection = Selection::new();
        selection.select("a");
        let (added, removed) = selection.select("a");
        assert!(added.is_empty());
        assert!(removed.is_empty());
        assert!(selection.is_selected("a"));
    }

    #[test]
    fn test_toggle_moves_anchor_only_when_selecting() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.toggle("c");
        assert_eq!(selection.anchor(), Some("c"));

        let (added, removed) = selection.toggle("a");
        assert!(added.is_empty());
        assert_eq!(removed, ids(&["a"]));
        assert_eq!(selection.anchor(), Some("c"));
        assert_eq!(selection.selected(), ids(&["c"]));
    }

    #[test]
    fn test_range_select_keeps_anchor() {
        let order = ids(&["a", "b", "c", "d", "e"]);
        let mut selection = Selection::new();
        selection.select("b");

        selection.range_select("d", &order);
        assert_eq!(selection.selected(), ids(&["b", "c", "d"]));
        assert_eq!(selection.anchor(), Some("b"));

        let (added, removed) = selection.range_select("a", &order);
        assert_eq!(added, ids(&["a"]));
        assert_eq!(removed.len(), 2);
        assert_eq!(selection.selected(), ids(&["a", "b"]));
        assert_eq!(selection.anchor(), Some("b"));
    }

    #[test]
    fn test_range_select_without_anchor_selects_target() {
        let order = ids(&["a", "b", "c"]);
        let mut selection = Selection::new();
        selection.range_select("c", &order);
        assert_eq!(selection.selected(), ids(&["c"]));
        assert_eq!(selection.anchor(), Some("c"));
    }

    #[test]
    fn test_retain_clears_missing_anchor() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.toggle("b");
        let removed = selection.retain(|id| id != "b");
        assert_eq!(removed, ids(&["b"]));
        assert_eq!(selection.anchor(), None);
        assert_eq!(selection.selected(), ids(&["a"]));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.select_all(&ids(&["a", "b"]));
        assert_eq!(selection.len(), 2);
        let mut removed = selection.clear();
        removed.sort();
        assert_eq!(removed, ids(&["a", "b"]));
        assert!(selection.is_empty());
    }
}

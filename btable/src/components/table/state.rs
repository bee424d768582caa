//! Table component state.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::components::events::TableEvent;
use crate::components::selection::{Selection, SelectionMode};
use crate::config::{MustSort, TableConfig};
use crate::input::Modifiers;
use crate::utils::path::get_path;
use crate::utils::sort::stable_sort_by;

use super::compare::RowComparator;
use super::item::Field;
use super::resolve::display_value;
use super::sort::{ARIA_SORT_NONE, Comparer, SortEntry, SortOrder, SortSpec, next_order};

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

/// Internal state for the Table component.
pub(super) struct TableInner {
    /// Field definitions.
    pub fields: Vec<Field>,
    /// Rows in input order.
    pub rows: Vec<Value>,
    /// Row identity, by input index.
    pub ids: Vec<String>,
    /// Displayed order: input indices, sorted.
    pub order: Vec<usize>,
    /// Current sort specification.
    pub sort: SortSpec,
    /// Comparers of entries removed by header cycling, by field key.
    pub retained_comparers: HashMap<String, Comparer>,
    /// Selection state (by row ID).
    pub selection: Selection,
    /// Selection mode.
    pub selection_mode: SelectionMode,
    pub primary_key: Option<String>,
    pub multi_sort: bool,
    pub must_sort: MustSort,
    pub null_last: bool,
    /// Pending change notifications, coalesced by `push_event` so the queue
    /// stays bounded by the row count until drained.
    pub events: Vec<TableEvent>,
}

impl TableInner {
    fn new(config: TableConfig, fields: Vec<Field>, rows: Vec<Value>) -> Self {
        let mut inner = Self {
            fields,
            ids: compute_ids(&rows, config.primary_key.as_deref()),
            rows,
            order: Vec::new(),
            sort: SortSpec::new(),
            retained_comparers: HashMap::new(),
            selection: Selection::new(),
            selection_mode: config.selection_mode,
            primary_key: config.primary_key,
            multi_sort: config.multi_sort,
            must_sort: config.must_sort,
            null_last: config.null_last,
            events: Vec::new(),
        };
        let initial: SortSpec = config.initial_sort.into_iter().map(SortEntry::from).collect();
        inner.sort = inner.normalize_sort(initial);
        inner.resort();
        inner
    }

    fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Queue a notification.
    ///
    /// `SortChanged` and `SelectionChanged` replace a pending event of the same
    /// kind. A row event cancels a pending opposite event for the same row.
    fn push_event(&mut self, event: TableEvent) {
        match &event {
            TableEvent::SortChanged(_) => self
                .events
                .retain(|e| !matches!(e, TableEvent::SortChanged(_))),
            TableEvent::SelectionChanged(_) => self
                .events
                .retain(|e| !matches!(e, TableEvent::SelectionChanged(_))),
            TableEvent::RowSelected(id) => {
                let pending = self
                    .events
                    .iter()
                    .position(|e| matches!(e, TableEvent::RowUnselected(other) if other == id));
                if let Some(index) = pending {
                    self.events.remove(index);
                    return;
                }
            }
            TableEvent::RowUnselected(id) => {
                let pending = self
                    .events
                    .iter()
                    .position(|e| matches!(e, TableEvent::RowSelected(other) if other == id));
                if let Some(index) = pending {
                    self.events.remove(index);
                    return;
                }
            }
        }
        self.events.push(event);
    }

    /// Re-run the comparator over every row. Never memoized: custom comparers
    /// must see every comparison of every sort.
    fn resort(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if !self.sort.is_empty() {
            let comparator = RowComparator::new(self.sort.entries(), &self.fields, self.null_last);
            let rows = &self.rows;
            stable_sort_by(&mut order, |&a, &b| comparator.compare(&rows[a], &rows[b]));
        }
        log::trace!(
            "Sorted {} rows by {:?}",
            order.len(),
            self.sort.summary()
        );
        self.order = order;
    }

    /// Drop entries for known non-sortable fields and duplicate keys, and
    /// enforce the single-key limit. Entries for unknown fields are kept; they
    /// tie during comparison.
    fn normalize_sort(&mut self, spec: SortSpec) -> SortSpec {
        let mut seen = HashSet::new();
        let mut normalized = SortSpec::new();

        for entry in spec {
            let sortable = self.field(&entry.key).map(|f| f.sortable);
            if sortable == Some(false) {
                log::warn!("Ignoring sort on non-sortable field '{}'", entry.key);
                continue;
            }
            if !seen.insert(entry.key.clone()) {
                log::warn!("Ignoring duplicate sort entry for '{}'", entry.key);
                continue;
            }
            normalized.push(entry);
        }

        if !self.multi_sort && normalized.len() > 1 {
            log::warn!(
                "Multi-sort is disabled; keeping only '{}' of {} sort entries",
                normalized.entries()[0].key,
                normalized.len()
            );
            let mut entries = normalized.take_entries();
            entries.truncate(1);
            normalized = entries.into_iter().collect();
        }

        normalized
    }

    /// Remember the comparer of an entry a header click removes.
    fn retire(&mut self, entry: SortEntry) {
        if let Some(comparer) = entry.comparer {
            self.retained_comparers.insert(entry.key, comparer);
        }
    }

    /// Comparer for an entry being (re)added by a header click.
    fn comparer_for(&mut self, key: &str, field_comparer: Option<Comparer>) -> Option<Comparer> {
        self.retained_comparers.remove(key).or(field_comparer)
    }

    /// Apply a header click to the sort spec. Returns the new spec, or `None`
    /// if the field is unknown or not sortable.
    fn toggle_sort(&mut self, key: &str, modifiers: Modifiers) -> Option<SortSpec> {
        let (initial, field_comparer) = {
            let field = self.field(key).filter(|f| f.sortable)?;
            (field.initial_sort_direction, field.sort_comparer.clone())
        };
        let must_sort = self.must_sort.applies_to(key);
        let next = next_order(self.sort.order_of(key), initial, must_sort);
        let additive = self.multi_sort && modifiers.toggle();

        if additive {
            match next {
                Some(order) => {
                    if let Some(entry) = self.sort.get_mut(key) {
                        entry.order = order;
                    } else {
                        let comparer = self.comparer_for(key, field_comparer);
                        self.sort.push(SortEntry {
                            key: key.to_string(),
                            order,
                            comparer,
                        });
                    }
                }
                None => {
                    if let Some(entry) = self.sort.remove(key) {
                        self.retire(entry);
                    }
                }
            }
        } else {
            let mut entries = self.sort.take_entries();
            let current = entries
                .iter()
                .position(|e| e.key == key)
                .map(|i| entries.remove(i));
            for entry in entries {
                self.retire(entry);
            }

            self.sort = match (next, current) {
                (Some(order), Some(entry)) => SortSpec::single(SortEntry { order, ..entry }),
                (Some(order), None) => {
                    let comparer = self.comparer_for(key, field_comparer);
                    SortSpec::single(SortEntry {
                        key: key.to_string(),
                        order,
                        comparer,
                    })
                }
                (None, current) => {
                    if let Some(entry) = current {
                        self.retire(entry);
                    }
                    SortSpec::new()
                }
            };
        }

        log::debug!("Sort on '{}' -> {:?}", key, self.sort.summary());
        self.resort();
        self.push_event(TableEvent::SortChanged(self.sort.clone()));
        Some(self.sort.clone())
    }

    /// Row ID at a displayed index.
    fn id_at(&self, index: usize) -> Option<&String> {
        self.order.get(index).map(|&i| &self.ids[i])
    }

    /// All row IDs in displayed order.
    fn displayed_ids(&self) -> Vec<String> {
        self.order.iter().map(|&i| self.ids[i].clone()).collect()
    }

    /// Selected IDs in displayed order.
    fn selected_in_order(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|&i| &self.ids[i])
            .filter(|id| self.selection.is_selected(id))
            .cloned()
            .collect()
    }

    /// Queue notifications for a selection change. Returns true if anything changed.
    fn publish_selection(&mut self, added: Vec<String>, removed: Vec<String>) -> bool {
        if added.is_empty() && removed.is_empty() {
            return false;
        }
        log::debug!("Selection +{:?} -{:?}", added, removed);
        for id in removed {
            self.push_event(TableEvent::RowUnselected(id));
        }
        for id in added {
            self.push_event(TableEvent::RowSelected(id));
        }
        let selected = self.selected_in_order();
        self.push_event(TableEvent::SelectionChanged(selected));
        true
    }

    /// Apply a row click. Returns `None` when the click is a no-op by mode or
    /// index, otherwise the `(added, removed)` IDs (possibly both empty).
    fn click_row(&mut self, index: usize, modifiers: Modifiers) -> Option<(Vec<String>, Vec<String>)> {
        let id = self.id_at(index)?.clone();
        let change = match self.selection_mode {
            SelectionMode::None => return None,
            SelectionMode::Single => self.selection.select(&id),
            SelectionMode::Multi => self.selection.toggle(&id),
            SelectionMode::Range => {
                if modifiers.shift {
                    let all_ids = self.displayed_ids();
                    self.selection.range_select(&id, &all_ids)
                } else if modifiers.toggle() {
                    self.selection.toggle(&id)
                } else {
                    self.selection.select(&id)
                }
            }
        };
        Some(change)
    }

    /// Bring the selection in line with the current mode and row set.
    fn normalize_selection(&mut self) -> Vec<String> {
        let known: HashSet<String> = self.ids.iter().cloned().collect();
        let mut removed = self.selection.retain(|id| known.contains(id));

        match self.selection_mode {
            SelectionMode::None => removed.extend(self.selection.clear()),
            SelectionMode::Single if self.selection.len() > 1 => {
                let keep = self
                    .selection
                    .anchor()
                    .filter(|a| self.selection.is_selected(a))
                    .map(str::to_string)
                    .or_else(|| self.selected_in_order().into_iter().next());
                if let Some(keep) = keep {
                    removed.extend(self.selection.select(&keep).1);
                }
            }
            _ => {}
        }
        removed
    }
}

/// Row identity: the primary-key value when every row has a distinct scalar
/// one, otherwise the input position.
fn compute_ids(rows: &[Value], primary_key: Option<&str>) -> Vec<String> {
    let positional = || -> Vec<String> { (0..rows.len()).map(|i| i.to_string()).collect() };

    let Some(key) = primary_key else {
        return positional();
    };

    let mut seen = HashSet::with_capacity(rows.len());
    let mut ids = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let id = match get_path(row, key) {
            Some(Value::String(s)) => s.clone(),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
            _ => {
                log::warn!(
                    "Row {} has no usable primary key '{}'; using positional row identity",
                    index,
                    key
                );
                return positional();
            }
        };
        if !seen.insert(id.clone()) {
            log::warn!(
                "Duplicate primary key '{}' in field '{}'; using positional row identity",
                id,
                key
            );
            return positional();
        }
        ids.push(id);
    }
    ids
}

/// A sortable, selectable table over JSON rows.
///
/// `Table` owns the sort specification and selection state for one mounted
/// table and exposes:
/// - The rows in displayed (sorted) order
/// - Per-field sort state for header indicators and `aria-sort`
/// - Selection state, driven by row clicks and modifiers
/// - Queued change notifications ([`TableEvent`])
///
/// Clones share state. Every mutation completes, re-sort included, before the
/// call returns.
pub struct Table {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.len())
            .field("sort", &self.sort_summary())
            .field("selection_mode", &self.selection_mode())
            .finish()
    }
}

impl Table {
    /// Create a table from a config, field definitions and rows.
    pub fn new(config: TableConfig, fields: Vec<Field>, rows: Vec<Value>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(config, fields, rows))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a table with the default config.
    pub fn with_rows(fields: Vec<Field>, rows: Vec<Value>) -> Self {
        Self::new(TableConfig::default(), fields, rows)
    }

    /// Set the selection mode.
    pub fn with_selection_mode(self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self.take_events();
        self
    }

    /// Set the initial sort specification (entries may carry comparers).
    pub fn with_sort_by(self, spec: SortSpec) -> Self {
        self.set_sort_by(spec);
        self.take_events();
        self
    }

    /// Set the initial selection.
    pub fn with_selected_ids<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_selected_ids(ids);
        self.take_events();
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Fields
    // -------------------------------------------------------------------------

    /// Get the field definitions.
    pub fn fields(&self) -> Vec<Field> {
        self.inner
            .read()
            .map(|g| g.fields.clone())
            .unwrap_or_default()
    }

    /// Replace the field definitions. Sort entries that no longer reference a
    /// sortable field are dropped, and rows are re-sorted.
    pub fn set_fields(&self, fields: Vec<Field>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.fields = fields;
            // A retained comparer only outlives fields that still sort without
            // one of their own.
            let inner = &mut *guard;
            let fields = &inner.fields;
            inner.retained_comparers.retain(|key, _| {
                fields
                    .iter()
                    .any(|f| &f.key == key && f.sortable && f.sort_comparer.is_none())
            });

            let previous = std::mem::take(&mut guard.sort);
            let before = previous.summary();
            guard.sort = guard.normalize_sort(previous);
            if guard.sort.summary() != before {
                let spec = guard.sort.clone();
                guard.push_event(TableEvent::SortChanged(spec));
            }
            guard.resort();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by displayed index.
    pub fn row(&self, index: usize) -> Option<Value> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.order.get(index).map(|&i| g.rows[i].clone()))
    }

    /// Get all rows in displayed order.
    pub fn rows(&self) -> Vec<Value> {
        self.inner
            .read()
            .map(|g| g.order.iter().map(|&i| g.rows[i].clone()).collect())
            .unwrap_or_default()
    }

    /// Get the ID of the row at a displayed index.
    pub fn row_id(&self, index: usize) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.id_at(index).cloned())
    }

    /// Get all row IDs in displayed order.
    pub fn row_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.displayed_ids())
            .unwrap_or_default()
    }

    /// Get the displayed index of a row by ID.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.order.iter().position(|&i| g.ids[i] == id))
    }

    /// Display value of a cell: the field's formatter output, or the raw value.
    /// `None` if the index or field is unknown.
    pub fn cell_value(&self, index: usize, key: &str) -> Option<Value> {
        self.inner.read().ok().and_then(|g| {
            let row = g.order.get(index).map(|&i| &g.rows[i])?;
            let field = g.field(key)?;
            Some(display_value(row, field))
        })
    }

    // -------------------------------------------------------------------------
    // Row mutation
    // -------------------------------------------------------------------------

    /// Replace all rows.
    ///
    /// Identities are recomputed, rows re-sorted, and selected IDs that no
    /// longer exist are dropped.
    pub fn set_rows(&self, rows: Vec<Value>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.ids = compute_ids(&rows, guard.primary_key.as_deref());
            guard.rows = rows;
            guard.resort();
            let removed = guard.normalize_selection();
            guard.publish_selection(vec![], removed);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the current sort specification.
    pub fn sort_by(&self) -> SortSpec {
        self.inner
            .read()
            .map(|g| g.sort.clone())
            .unwrap_or_default()
    }

    /// `(key, order)` pairs of the current sort, in priority order.
    pub fn sort_summary(&self) -> Vec<(String, SortOrder)> {
        self.inner
            .read()
            .map(|g| g.sort.summary())
            .unwrap_or_default()
    }

    /// Replace the sort specification and re-sort.
    ///
    /// The given sort spec is authoritative: comparers of the replaced entries, and
    /// any retained by earlier header clicks, are discarded.
    pub fn set_sort_by(&self, spec: SortSpec) {
        if let Ok(mut guard) = self.inner.write() {
            guard.retained_comparers.clear();
            guard.sort = guard.normalize_sort(spec);
            guard.resort();
            let spec = guard.sort.clone();
            guard.push_event(TableEvent::SortChanged(spec));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the sort (rows return to input order).
    pub fn clear_sort(&self) {
        self.set_sort_by(SortSpec::new());
    }

    /// Apply a header click for a field.
    ///
    /// Returns the new sort specification, or `None` if the field is unknown
    /// or not sortable.
    pub fn toggle_sort(&self, key: &str, modifiers: Modifiers) -> Option<SortSpec> {
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        let spec = guard.toggle_sort(key, modifiers)?;
        self.dirty.store(true, Ordering::SeqCst);
        Some(spec)
    }

    /// Current direction of a field (`None` if it is not sorted).
    pub fn sort_direction(&self, key: &str) -> Option<SortOrder> {
        self.inner.read().ok().and_then(|g| g.sort.order_of(key))
    }

    /// `aria-sort` value for a field: `"none"`, `"ascending"` or `"descending"`.
    pub fn aria_sort(&self, key: &str) -> &'static str {
        self.sort_direction(key)
            .map(SortOrder::aria)
            .unwrap_or(ARIA_SORT_NONE)
    }

    /// Priority of a field in the sort (0 = primary).
    pub fn sort_priority(&self, key: &str) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.sort.position(key))
    }

    /// Whether the multi-sort modifier adds keys.
    pub fn is_multi_sort(&self) -> bool {
        self.inner.read().map(|g| g.multi_sort).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection_mode)
            .unwrap_or_default()
    }

    /// Set the selection mode, trimming the selection to fit it.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        if let Ok(mut guard) = self.inner.write() {
            let mode_changed = guard.selection_mode != mode;
            guard.selection_mode = mode;
            let removed = guard.normalize_selection();
            let selection_changed = guard.publish_selection(vec![], removed);
            if mode_changed || selection_changed {
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Set the selection mode from a string; unknown values disable selection.
    pub fn set_selection_mode_str(&self, mode: &str) {
        self.set_selection_mode(SelectionMode::parse_lenient(mode));
    }

    /// Get selected IDs in displayed order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selected_in_order())
            .unwrap_or_default()
    }

    /// Get selected rows in displayed order.
    pub fn selected_rows(&self) -> Vec<Value> {
        self.inner
            .read()
            .map(|g| {
                g.order
                    .iter()
                    .filter(|&&i| g.selection.is_selected(&g.ids[i]))
                    .map(|&i| g.rows[i].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if a row is selected by ID.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    /// Check if the row at a displayed index is selected.
    pub fn is_row_selected(&self, index: usize) -> bool {
        self.inner
            .read()
            .map(|g| g.id_at(index).is_some_and(|id| g.selection.is_selected(id)))
            .unwrap_or(false)
    }

    /// Get the range-selection anchor.
    pub fn anchor(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.selection.anchor().map(str::to_string))
    }

    /// Apply a row click at a displayed index.
    ///
    /// Returns `None` if the click does nothing (selection disabled or index
    /// out of range), otherwise the (added IDs, removed IDs).
    pub fn click_row(&self, index: usize, modifiers: Modifiers) -> Option<(Vec<String>, Vec<String>)> {
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        let (added, removed) = guard.click_row(index, modifiers)?;
        if guard.publish_selection(added.clone(), removed.clone()) {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Some((added, removed))
    }

    /// Select the row at a displayed index. In single mode this replaces the
    /// selection; in multi and range modes it adds to it.
    /// Returns (added IDs, removed IDs).
    pub fn select_row(&self, index: usize) -> (Vec<String>, Vec<String>) {
        if let Ok(mut guard) = self.inner.write()
            && let Some(id) = guard.id_at(index).cloned()
        {
            let (added, removed) = match guard.selection_mode {
                SelectionMode::None => return (vec![], vec![]),
                SelectionMode::Single => guard.selection.select(&id),
                SelectionMode::Multi | SelectionMode::Range => guard.selection.insert(&id),
            };
            if guard.publish_selection(added.clone(), removed.clone()) {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return (added, removed);
        }
        (vec![], vec![])
    }

    /// Unselect the row at a displayed index.
    /// Returns the IDs that were deselected.
    pub fn unselect_row(&self, index: usize) -> Vec<String> {
        if let Ok(mut guard) = self.inner.write()
            && let Some(id) = guard.id_at(index).cloned()
        {
            let (_, removed) = guard.selection.remove(&id);
            if guard.publish_selection(vec![], removed.clone()) {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return removed;
        }
        vec![]
    }

    /// Select all rows (multi and range modes only).
    /// Returns the IDs that were newly selected.
    pub fn select_all_rows(&self) -> Vec<String> {
        if let Ok(mut guard) = self.inner.write()
            && matches!(guard.selection_mode, SelectionMode::Multi | SelectionMode::Range)
            && !guard.rows.is_empty()
        {
            let all_ids = guard.displayed_ids();
            let added = guard.selection.select_all(&all_ids);
            if guard.publish_selection(added.clone(), vec![]) {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return added;
        }
        vec![]
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear_selected(&self) -> Vec<String> {
        if let Ok(mut guard) = self.inner.write() {
            let removed = guard.selection.clear();
            if guard.publish_selection(vec![], removed.clone()) {
                self.dirty.store(true, Ordering::SeqCst);
            }
            return removed;
        }
        vec![]
    }

    /// Replace the selection with caller-owned state.
    ///
    /// Unknown IDs are ignored; selection is emptied when disabled and trimmed
    /// to the first ID in single mode.
    pub fn set_selected_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };

        let known: HashSet<&String> = guard.ids.iter().collect();
        let mut wanted: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if known.contains(&id) && !wanted.contains(&id) {
                wanted.push(id);
            }
        }
        match guard.selection_mode {
            SelectionMode::None => wanted.clear(),
            SelectionMode::Single if wanted.len() > 1 => {
                log::warn!("Single selection mode; keeping only '{}'", wanted[0]);
                wanted.truncate(1);
            }
            _ => {}
        }

        let removed = guard.selection.retain(|id| wanted.iter().any(|w| w == id));
        let mut added = Vec::new();
        for id in &wanted {
            added.extend(guard.selection.insert(id).0);
        }
        if guard.publish_selection(added, removed) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Events and render state
    // -------------------------------------------------------------------------

    /// Drain pending change notifications.
    ///
    /// Callers should drain after every handled event. Undrained notifications
    /// are coalesced: only the latest `SortChanged` and `SelectionChanged` are
    /// kept, and row events that cancel out are dropped.
    pub fn take_events(&self) -> Vec<TableEvent> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    /// Whether state changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Mark the current state as rendered.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

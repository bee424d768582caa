//! Multi-key row comparison.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use super::item::Field;
use super::resolve::{SortKey, resolve_sort_key};
use super::sort::SortEntry;

/// Compares rows by an ordered list of sort entries.
///
/// Holds no state of its own: every call resolves keys afresh and calls the
/// entries' comparers, so a comparer sees exactly one call per comparison the
/// sort performs (for each entry it reaches).
pub struct RowComparator<'a> {
    entries: &'a [SortEntry],
    fields: &'a [Field],
    null_last: bool,
}

impl<'a> RowComparator<'a> {
    pub fn new(entries: &'a [SortEntry], fields: &'a [Field], null_last: bool) -> Self {
        Self {
            entries,
            fields,
            null_last,
        }
    }

    /// Compare two rows; the first non-equal entry decides.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for entry in self.entries {
            // Entries for unknown or non-sortable fields tie.
            let Some(field) = self
                .fields
                .iter()
                .find(|f| f.key == entry.key && f.sortable)
            else {
                continue;
            };

            let ordering = match &entry.comparer {
                Some(comparer) => entry.order.apply(comparer(a, b)),
                None => {
                    let left = resolve_sort_key(a, field);
                    let right = resolve_sort_key(b, field);
                    match (self.null_last, left.is_undefined(), right.is_undefined()) {
                        (true, true, true) => Ordering::Equal,
                        (true, true, false) => Ordering::Greater,
                        (true, false, true) => Ordering::Less,
                        _ => entry.order.apply(compare_keys(&left, &right)),
                    }
                }
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Default ascending order of sort keys.
///
/// `Undefined` first, numbers numerically, everything else by [`collate`] on
/// the text form.
pub fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Undefined, SortKey::Undefined) => Ordering::Equal,
        (SortKey::Undefined, _) => Ordering::Less,
        (_, SortKey::Undefined) => Ordering::Greater,
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => collate(&a.as_text(), &b.as_text()),
    }
}

/// Locale-independent string collation.
///
/// Case-insensitive comparison with digit runs compared by numeric value
/// (`"item2" < "item10"`); on a tie, lowercase sorts before uppercase at the
/// first differing character; finally plain code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    natural_cmp(&a.to_lowercase(), &b.to_lowercase())
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ordering = compare_digit_runs(&l, &r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                if x != y {
                    return x.cmp(&y);
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        if x.is_lowercase() && y.is_uppercase() {
            return Ordering::Less;
        }
        if x.is_uppercase() && y.is_lowercase() {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

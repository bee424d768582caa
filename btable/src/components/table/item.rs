//! Field definitions for table columns.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::sort::{Comparer, SortOrder};

/// Cell formatter: `(value, field key, row) -> display value`.
///
/// `value` is the raw field value, or `Value::Null` when the row has none.
pub type Formatter = Arc<dyn Fn(&Value, &str, &Value) -> Value + Send + Sync>;

/// How a field's sort key is derived.
#[derive(Clone, Default)]
pub enum SortByFormatted {
    /// Sort by the raw field value.
    #[default]
    Off,
    /// Sort by the formatter's output (raw value if there is no formatter).
    Formatted,
    /// Sort by this function's output. It receives the formatted value when the
    /// field has a formatter, the raw value otherwise.
    Custom(Formatter),
}

impl fmt::Debug for SortByFormatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortByFormatted::Off => f.write_str("Off"),
            SortByFormatted::Formatted => f.write_str("Formatted"),
            SortByFormatted::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Field (column) configuration.
///
/// Fields define which keys the table knows about, whether their headers
/// sort, and how their values are formatted and turned into sort keys.
///
/// # Examples
///
/// ```
/// use btable::prelude::*;
/// use serde_json::json;
///
/// let fields = vec![
///     Field::new("name").sortable(),
///     Field::new("age")
///         .sortable()
///         .formatter(|value, _, _| json!(format!("{} years", value))),
///     Field::new("email"),
/// ];
/// assert!(fields[0].sortable);
/// ```
#[derive(Clone, Deserialize)]
#[serde(from = "FieldRepr")]
pub struct Field {
    /// Key of the value on each row (may be a dotted path)
    pub key: String,
    /// Header label
    pub label: String,
    /// Whether clicking the header sorts
    pub sortable: bool,
    /// Direction used the first time the header is clicked
    pub initial_sort_direction: SortOrder,
    /// Display formatter
    pub formatter: Option<Formatter>,
    /// Sort key derivation
    pub sort_by_formatted: SortByFormatted,
    /// Comparer used when a header click adds this field to the sort
    pub sort_comparer: Option<Comparer>,
}

impl Field {
    /// Create a new field; the label defaults to the humanized key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: humanize(&key),
            key,
            sortable: false,
            initial_sort_direction: SortOrder::Ascending,
            formatter: None,
            sort_by_formatted: SortByFormatted::Off,
            sort_comparer: None,
        }
    }

    /// Set the header label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Make the field sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Start this field descending on its first header click.
    pub fn initial_descending(mut self) -> Self {
        self.initial_sort_direction = SortOrder::Descending;
        self
    }

    /// Set the display formatter.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &str, &Value) -> Value + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Sort by the formatted value instead of the raw value.
    pub fn sort_by_formatted(mut self) -> Self {
        self.sort_by_formatted = SortByFormatted::Formatted;
        self
    }

    /// Sort by a custom key derived from the (formatted) value.
    pub fn sort_by<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&Value, &str, &Value) -> Value + Send + Sync + 'static,
    {
        self.sort_by_formatted = SortByFormatted::Custom(Arc::new(key_fn));
        self
    }

    /// Default comparer for sort entries created by clicking this header.
    pub fn sort_comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&Value, &Value) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        self.sort_comparer = Some(Arc::new(comparer));
        self
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("initial_sort_direction", &self.initial_sort_direction)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .field("sort_by_formatted", &self.sort_by_formatted)
            .field("sort_comparer", &self.sort_comparer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// JSON shape of a field: either a bare key or an object.
///
/// Function-valued members cannot come from JSON; attach them in code.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRepr {
    Key(String),
    Spec {
        key: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        sortable: bool,
        #[serde(default, rename = "sortByFormatted", alias = "sort_by_formatted")]
        sort_by_formatted: bool,
        #[serde(default, rename = "initialSortDirection", alias = "initial_sort_direction")]
        initial_sort_direction: Option<SortOrder>,
    },
}

impl From<FieldRepr> for Field {
    fn from(repr: FieldRepr) -> Self {
        match repr {
            FieldRepr::Key(key) => Field::new(key),
            FieldRepr::Spec {
                key,
                label,
                sortable,
                sort_by_formatted,
                initial_sort_direction,
            } => {
                let mut field = Field::new(key);
                if let Some(label) = label {
                    field.label = label;
                }
                field.sortable = sortable;
                if sort_by_formatted {
                    field.sort_by_formatted = SortByFormatted::Formatted;
                }
                if let Some(direction) = initial_sort_direction {
                    field.initial_sort_direction = direction;
                }
                field
            }
        }
    }
}

/// `"first_name"` / `"firstName"` / `"address.city"` -> `"First Name"` / `"Address City"`.
fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("first_name"), "First Name");
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("address.city"), "Address City");
    }

    #[test]
    fn test_builder() {
        let field = Field::new("age").label("Age (years)").sortable().initial_descending();
        assert_eq!(field.key, "age");
        assert_eq!(field.label, "Age (years)");
        assert!(field.sortable);
        assert_eq!(field.initial_sort_direction, SortOrder::Descending);
        assert!(field.formatter.is_none());
    }

    #[test]
    fn test_deserialize_fields() {
        let json = r#"[
            "email",
            {"key": "name", "sortable": true},
            {"key": "age", "label": "Years", "sortable": true, "sortByFormatted": true, "initialSortDirection": "desc"}
        ]"#;
        let fields: Vec<Field> = serde_json::from_str(json).unwrap();

        assert_eq!(fields[0].key, "email");
        assert!(!fields[0].sortable);
        assert_eq!(fields[1].label, "Name");
        assert!(fields[1].sortable);
        assert_eq!(fields[2].label, "Years");
        assert!(matches!(fields[2].sort_by_formatted, SortByFormatted::Formatted));
        assert_eq!(fields[2].initial_sort_direction, SortOrder::Descending);
    }
}

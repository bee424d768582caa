//! Sort key resolution: turning a row and a field into a comparable value.

use serde_json::Value;

use crate::utils::path::get_path;

use super::item::{Field, SortByFormatted};

/// A comparable value produced from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Missing field, unresolvable path, or JSON `null`
    Undefined,
    /// JSON number
    Number(f64),
    /// Anything else, coerced to text (arrays and objects as JSON)
    Text(String),
}

impl SortKey {
    /// Convert a looked-up value into a sort key.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => SortKey::Undefined,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(SortKey::Number)
                .unwrap_or_else(|| SortKey::Text(n.to_string())),
            Some(Value::String(s)) => SortKey::Text(s.clone()),
            Some(other) => SortKey::Text(other.to_string()),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SortKey::Undefined)
    }

    /// Text form used when the two keys are not both numbers.
    pub fn as_text(&self) -> String {
        match self {
            SortKey::Undefined => String::new(),
            SortKey::Number(n) => n.to_string(),
            SortKey::Text(s) => s.clone(),
        }
    }
}

/// Raw value of a field on a row (`Value::Null` when missing).
pub fn raw_value(row: &Value, key: &str) -> Value {
    get_path(row, key).cloned().unwrap_or(Value::Null)
}

/// Display value: the formatter's output, or the raw value.
pub fn display_value(row: &Value, field: &Field) -> Value {
    let raw = raw_value(row, &field.key);
    match &field.formatter {
        Some(formatter) => formatter(&raw, &field.key, row),
        None => raw,
    }
}

/// Resolve the value a field sorts by.
pub fn resolve_sort_key(row: &Value, field: &Field) -> SortKey {
    match &field.sort_by_formatted {
        SortByFormatted::Custom(key_fn) => {
            let value = display_value(row, field);
            SortKey::from_value(Some(&key_fn(&value, &field.key, row)))
        }
        SortByFormatted::Formatted if field.formatter.is_some() => {
            SortKey::from_value(Some(&display_value(row, field)))
        }
        _ => SortKey::from_value(get_path(row, &field.key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_key() {
        let field = Field::new("age");
        assert_eq!(resolve_sort_key(&json!({"age": 27}), &field), SortKey::Number(27.0));
        assert_eq!(resolve_sort_key(&json!({"age": null}), &field), SortKey::Undefined);
        assert_eq!(resolve_sort_key(&json!({}), &field), SortKey::Undefined);
    }

    #[test]
    fn test_nested_key() {
        let field = Field::new("person.name");
        let row = json!({"person": {"name": "Robert"}});
        assert_eq!(resolve_sort_key(&row, &field), SortKey::Text("Robert".into()));
    }

    #[test]
    fn test_formatter_ignored_unless_sort_by_formatted() {
        let field = Field::new("age").formatter(|v, _, _| json!(format!("#{}", v)));
        let row = json!({"age": 9});
        assert_eq!(resolve_sort_key(&row, &field), SortKey::Number(9.0));
        assert_eq!(display_value(&row, &field), json!("#9"));

        let field = field.sort_by_formatted();
        assert_eq!(resolve_sort_key(&row, &field), SortKey::Text("#9".into()));
    }

    #[test]
    fn test_sort_by_formatted_without_formatter_uses_raw() {
        let field = Field::new("age").sort_by_formatted();
        assert_eq!(resolve_sort_key(&json!({"age": 42}), &field), SortKey::Number(42.0));
    }

    #[test]
    fn test_custom_key_receives_formatted_value() {
        let field = Field::new("name")
            .formatter(|v, _, _| json!(v.as_str().unwrap_or_default().to_uppercase()))
            .sort_by(|v, key, row| {
                assert_eq!(key, "name");
                assert!(row.get("name").is_some());
                json!(v.as_str().map(str::len))
            });
        let row = json!({"name": "Havij"});
        assert_eq!(resolve_sort_key(&row, &field), SortKey::Number(5.0));
    }

    #[test]
    fn test_custom_key_without_formatter_receives_raw() {
        let field = Field::new("first").sort_by(|v, _, row| json!(format!("{}{}", row["last"].as_str().unwrap_or(""), v.as_str().unwrap_or(""))));
        let row = json!({"first": "Ada", "last": "Lovelace"});
        assert_eq!(resolve_sort_key(&row, &field), SortKey::Text("LovelaceAda".into()));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(SortKey::from_value(Some(&json!(true))), SortKey::Text("true".into()));
        assert_eq!(SortKey::from_value(Some(&json!([1, 2]))), SortKey::Text("[1,2]".into()));
        assert_eq!(SortKey::Number(27.0).as_text(), "27");
        assert_eq!(SortKey::Number(2.5).as_text(), "2.5");
    }
}

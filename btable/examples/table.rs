//! Table Example
//!
//! Drives a table the way a rendering layer would:
//! - Header clicks cycling single and multi-key sorts
//! - Range selection with Ctrl and Shift modifiers
//! - Draining change notifications after each click
//!
//! Debug logging goes to `table.log`.

use std::fs::File;

use btable::prelude::*;
use log::LevelFilter;
use serde_json::{Value, json};
use simplelog::{Config, WriteLogger};

// ============================================================================
// Data
// ============================================================================

fn people() -> Vec<Value> {
    vec![
        json!({"id": "h", "name": "Havij", "age": 27, "address": {"city": "Ghent"}}),
        json!({"id": "c", "name": "Cyndi", "age": 9, "address": {"city": "Antwerp"}}),
        json!({"id": "r", "name": "Robert", "age": 42, "address": {"city": "Ghent"}}),
        json!({"id": "a", "name": "Ann", "age": 27}),
    ]
}

fn fields() -> Vec<Field> {
    vec![
        Field::new("name").sortable(),
        Field::new("age")
            .sortable()
            .initial_descending()
            .formatter(|value, _, _| match value.as_i64() {
                Some(age) => json!(format!("{} years", age)),
                None => Value::Null,
            }),
        Field::new("address.city").label("City").sortable(),
    ]
}

// ============================================================================
// Rendering
// ============================================================================

fn print_table(title: &str, table: &Table) {
    println!("{}", title);
    let fields = table.fields();
    let header: Vec<String> = fields
        .iter()
        .map(|f| match table.sort_priority(&f.key) {
            Some(priority) => format!("{} [{} #{}]", f.label, table.aria_sort(&f.key), priority + 1),
            None => f.label.clone(),
        })
        .collect();
    println!("    {}", header.join(" | "));

    for index in 0..table.len() {
        let marker = if table.is_row_selected(index) { "*" } else { " " };
        let cells: Vec<String> = fields
            .iter()
            .map(|f| match table.cell_value(index, &f.key) {
                Some(Value::String(s)) => s,
                Some(Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            })
            .collect();
        println!("  {} {}", marker, cells.join(" | "));
    }

    for event in table.take_events() {
        println!("    -> {:?}", event);
    }
    println!();
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("table.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let config = TableConfig::new()
        .primary_key("id")
        .selection_mode(SelectionMode::Range)
        .multi_sort();
    let table = Table::new(config, fields(), people());
    print_table("Unsorted", &table);

    table.on_click(&ClickEvent::header("age", Modifiers::NONE));
    print_table("Age (first click is descending)", &table);

    table.on_click(&ClickEvent::header("name", Modifiers::CTRL));
    print_table("Age, then name", &table);

    table.on_click(&ClickEvent::header("address.city", Modifiers::NONE));
    print_table("City only", &table);

    table.on_click(&ClickEvent::row(0, Modifiers::NONE));
    table.on_click(&ClickEvent::row(2, Modifiers::SHIFT));
    print_table("Rows 1 to 3 selected", &table);

    table.on_click(&ClickEvent::row(1, Modifiers::CTRL));
    print_table("Middle row toggled off", &table);
}

use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into a Field/Value table; every array of objects
/// (schedules, per-record valuations, group rows) gets a table of its own.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
                print_envelope_notes(map);
            } else {
                print_section(None, value);
            }
        }
        Value::Array(arr) => print_rows(None, arr),
        _ => println!("{}", value),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    let Value::Object(map) = value else {
        if let Value::Array(rows) = value {
            print_rows(title, rows);
        } else {
            println!("{}", format_scalar(value));
        }
        return;
    };

    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .collect();
    if !scalars.is_empty() {
        if let Some(t) = title {
            println!("\n{}:", t);
        }
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map {
        let nested = match title {
            Some(t) => format!("{}.{}", t, key),
            None => key.clone(),
        };
        match val {
            Value::Array(rows) => print_rows(Some(nested.as_str()), rows),
            Value::Object(_) => print_section(Some(nested.as_str()), val),
            _ => {}
        }
    }
}

fn print_rows(title: Option<&str>, rows: &[Value]) {
    if let Some(t) = title {
        println!("\n{}:", t);
    }
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for item in rows {
            if let Value::Object(map) = item {
                builder.push_record(row_cells(&headers, map));
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in rows {
            println!("{}", format_scalar(item));
        }
    }
}

fn row_cells(headers: &[String], map: &Map<String, Value>) -> Vec<String> {
    headers
        .iter()
        .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
        .collect()
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

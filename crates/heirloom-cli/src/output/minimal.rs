use serde_json::Value;

use super::{format_scalar, payload};

/// Result fields worth printing alone, most specific first.
const PRIORITY_KEYS: [&str; 7] = [
    "monthly_payment",
    "interest_savings",
    "net_worth",
    "total_amount",
    "current_value",
    "gain",
    "excluded_count",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first scalar field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = payload(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    if let Value::Array(rows) = result_obj {
        println!("{}", rows.len());
        return;
    }

    if let Some(Value::Array(rows)) = value.get("results") {
        println!("{}", rows.len());
        return;
    }

    println!("{}", format_scalar(result_obj));
}

use serde_json::Value;
use std::io;

use super::{first_row_array, format_scalar, payload};

/// Write output as CSV to stdout.
///
/// Row data (an amortization schedule, per-record valuations) is written as
/// one line per row; otherwise the result is written as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = payload(value);
    let written = if let Some(Value::Array(rows)) = value.get("results") {
        write_rows(&mut wtr, rows)
    } else if let Some((_, rows)) = first_row_array(result) {
        write_rows(&mut wtr, rows)
    } else if let Value::Object(map) = result {
        write_pairs(&mut wtr, map)
    } else {
        wtr.write_record([format_scalar(result)])
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::warn!(error = %e, "failed to write CSV output");
    }
}

fn write_pairs(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        wtr.write_record([key.as_str(), &format_scalar(val)])?;
    }
    Ok(())
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([format_scalar(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

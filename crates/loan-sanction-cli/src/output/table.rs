use serde_json::{Map, Value};
use std::fmt::Write as _;
use tabled::{builder::Builder, Table};

use super::{format_value, record_array};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    print!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result @ Value::Object(_)) => render_result(&mut out, result, map),
            _ => render_object(&mut out, value),
        },
        Value::Array(arr) => render_records(&mut out, arr),
        _ => {
            let _ = writeln!(out, "{value}");
        }
    }
    out
}

fn render_result(out: &mut String, result: &Value, envelope: &Map<String, Value>) {
    render_object(out, result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    let _ = writeln!(out, "  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        let _ = writeln!(out, "\nMethodology: {meth}");
    }
}

/// Scalar fields as a Field/Value table, followed by any record array
/// (schedule rows, letter details) as its own table.
fn render_object(out: &mut String, value: &Value) {
    let Value::Object(map) = value else {
        return;
    };
    let records = record_array(value);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if records.is_some_and(|(name, _)| name == key.as_str()) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let _ = writeln!(out, "{}", Table::from(builder));

    if let Some((name, items)) = records {
        let _ = writeln!(out, "\n{name}:");
        render_records(out, items);
    }
}

fn render_records(out: &mut String, arr: &[Value]) {
    if arr.is_empty() {
        let _ = writeln!(out, "(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let _ = writeln!(out, "{}", Table::from(builder));
    } else {
        for item in arr {
            let _ = writeln!(out, "{}", format_value(item));
        }
    }
}

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
/// Pre-rendered text (e.g. `sanction --text`) is printed as is.
pub fn format_output(format: &OutputFormat, value: &Value) {
    if let Value::String(text) = value {
        print!("{text}");
        return;
    }

    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar rendering shared by the table and CSV writers.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// First array of objects found in a result object, e.g. schedule `rows`
/// or letter `details`.
pub(crate) fn record_array(result: &Value) -> Option<(&str, &Vec<Value>)> {
    result.as_object()?.iter().find_map(|(key, val)| match val {
        Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
            Some((key.as_str(), items))
        }
        _ => None,
    })
}

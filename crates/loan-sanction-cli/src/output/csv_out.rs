use serde_json::Value;
use std::io;

use super::{format_value, record_array};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(value, stdout.lock()) {
        eprintln!("CSV output error: {e}");
    }
}

/// Record arrays (schedule rows, letter details) become one CSV row per
/// record; anything else becomes two-column `field,value` output.
pub fn write_csv<W: io::Write>(value: &Value, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some((_, items)) = record_array(body) {
        write_records(&mut wtr, items)?;
    } else {
        match body {
            Value::Object(map) => {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &format_value(val)])?;
                }
            }
            Value::Array(arr) => write_records(&mut wtr, arr)?,
            _ => wtr.write_record([&format_value(body)])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([&format_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_string(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows() {
        let v = json!({
            "result": {
                "monthly_installment": "8791.59",
                "rows": [
                    { "interest": "833.33", "month": 1 },
                    { "interest": "767.01", "month": 2 }
                ]
            }
        });
        assert_eq!(csv_string(&v), "interest,month\n833.33,1\n767.01,2\n");
    }

    #[test]
    fn test_field_value_pairs() {
        let v = json!({ "gst": "270", "total_fee": "1769" });
        assert_eq!(csv_string(&v), "field,value\ngst,270\ntotal_fee,1769\n");
    }
}

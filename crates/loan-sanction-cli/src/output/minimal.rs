use serde_json::Value;

/// Priority list of headline fields, first match wins.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_installment",
    "qr_payload",
    "net_disbursed",
    "total_fee",
    "pan_valid",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

/// Look for a headline field in the result (or in a nested `quote`),
/// then fall back to the first field of the result object.
pub fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            let found = map
                .get(key)
                .or_else(|| map.get("quote").and_then(|q| q.get(key)));
            if let Some(val) = found {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_headline() {
        let v = json!({ "result": { "principal": "100000", "monthly_installment": "8791.59" } });
        assert_eq!(minimal_line(&v), "8791.59");
    }

    #[test]
    fn test_nested_quote_headline() {
        let v = json!({ "result": { "quote": { "monthly_installment": "9484.90" } } });
        assert_eq!(minimal_line(&v), "9484.90");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({ "name": "Asha" });
        assert_eq!(minimal_line(&v), "name: Asha");
    }
}

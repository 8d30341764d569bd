use serde_json::Value;

/// Print just the key answer value from the output.
///
/// A simulation output reduces to its expected final balance; a comparison
/// reduces to its final balance delta. Anything else falls back to the
/// first field.
pub fn print_minimal(value: &Value) {
    if let Some(expected) = value.pointer("/finalBalance/expected") {
        println!("{}", format_minimal(expected));
        return;
    }
    if let Some(diff) = value.pointer("/deltas/finalBalanceDiff") {
        println!("{}", format_minimal(diff));
        return;
    }
    if let Some(balance) = value.pointer("/baseline/finalBalance/expected") {
        println!("{}", format_minimal(balance));
        return;
    }
    if let Value::Object(map) = value {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }
    println!("{}", format_minimal(value));
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

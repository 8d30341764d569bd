use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Headline metrics of a simulation output, in display order.
const SUMMARY_FIELDS: &[&str] = &[
    "seed",
    "horizonDays",
    "baseCurrency",
    "collapseProbability",
    "collapseDay",
    "vibeState",
    "petState",
    "finalCreditScore",
    "shockResilienceIndex",
    "finalNAV",
    "finalLiquidityRatio",
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("snapshots") => {
            print_simulation_summary(value);
        }
        Value::Object(map) if map.contains_key("deltas") => {
            println!("Baseline");
            if let Some(baseline) = map.get("baseline") {
                print_simulation_summary(baseline);
            }
            println!("\nBranch");
            if let Some(branch) = map.get("branch") {
                print_simulation_summary(branch);
            }
            println!("\nDeltas");
            if let Some(deltas) = map.get("deltas") {
                print_flat_object(deltas);
            }
        }
        Value::Object(map) if map.contains_key("baseline") => {
            println!("Baseline");
            if let Some(baseline) = map.get("baseline") {
                print_simulation_summary(baseline);
            }
            println!("\nBranch");
            if let Some(branch) = map.get("branch") {
                print_simulation_summary(branch);
            }
        }
        _ => print_flat_object(value),
    }
}

fn print_simulation_summary(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for field in SUMMARY_FIELDS {
        if let Some(val) = map.get(*field) {
            if !val.is_null() {
                builder.push_record([*field, &format_value(val)]);
            }
        }
    }
    if let Some(balance) = map.get("finalBalance") {
        for key in ["expected", "p5", "p95"] {
            if let Some(val) = balance.get(key) {
                builder.push_record([&format!("finalBalance.{key}"), &format_value(val)]);
            }
        }
    }
    if let Some(Value::Array(snapshots)) = map.get("snapshots") {
        builder.push_record(["snapshots", &snapshots.len().to_string()]);
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

use serde_json::Value;
use std::io;

/// Columns of the per-day snapshot export, in wire order.
const SNAPSHOT_COLUMNS: &[&str] = &[
    "day",
    "date",
    "balance",
    "totalIncome",
    "totalExpenses",
    "netCashFlow",
    "assetNAV",
    "totalDebt",
    "creditScore",
    "liquidityRatio",
    "shockResilienceIndex",
    "taxPaid",
    "capitalGainsTax",
];

/// Write output as CSV to stdout.
///
/// A simulation output becomes one row per daily snapshot; anything else
/// flattens to field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(Value::Array(snapshots)) = value.get("snapshots") {
        let _ = wtr.write_record(SNAPSHOT_COLUMNS);
        for snapshot in snapshots {
            let row: Vec<String> = SNAPSHOT_COLUMNS
                .iter()
                .map(|col| {
                    snapshot
                        .get(*col)
                        .map(format_csv_value)
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&row);
        }
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(value)]);
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};

/// Read a typed JSON input from a file path or, failing that, piped stdin.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("failed to read '{path}': {e}"))?;
        let value =
            serde_json::from_str(&contents).map_err(|e| format!("failed to parse '{path}': {e}"))?;
        return Ok(value);
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(format!("--input <file.json> or piped stdin required for {command}").into());
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err(format!("--input <file.json> or piped stdin required for {command}").into());
    }
    Ok(serde_json::from_str(trimmed)?)
}

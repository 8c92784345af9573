//! Canonicalize command implementation.

use otf_parity_canonical::CanonicalValue;
use serde_json::Value;
use std::io::{self, Read};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let rendered = CanonicalValue::from_json(&value)
        .to_pretty_sorted_string()
        .map_err(|e| format!("Rendering failed: {}", e))?;
    println!("{}", rendered);
    Ok(())
}

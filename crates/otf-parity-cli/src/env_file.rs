//! `.env` file loading.
//!
//! Lines are `KEY=VALUE`; blank lines and `#` comments are skipped and one
//! level of matching quotes around the value is removed. Variables already
//! present in the process environment are never overwritten.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Parses `.env` text into key/value pairs in file order.
pub fn parse(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Loads `path` into the process environment.
///
/// Returns `None` when the file does not exist, otherwise the keys that were
/// set (keys already in the environment are skipped).
pub fn load(path: &Path) -> io::Result<Option<Vec<String>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut loaded = Vec::new();
    for (key, value) in parse(&text) {
        if env::var_os(&key).is_none() {
            env::set_var(&key, value);
            loaded.push(key);
        }
    }
    Ok(Some(loaded))
}

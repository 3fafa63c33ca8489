//! Canonical hashing of generation inputs.
//!
//! `params_hash = hex(BLAKE3(JCS({"config": ..., "params": ...})))`, where JCS is
//! the JSON Canonicalization Scheme (RFC 8785): sorted keys, no whitespace.

use serde_json::{json, Number, Value};

use crate::config::GeneratorConfig;
use crate::params::ChainParameters;

/// Computes the canonical BLAKE3 hash of a parameter set and its configuration.
///
/// Returns a 64-character lowercase hex string.
pub fn canonical_params_hash(
    params: &ChainParameters,
    config: &GeneratorConfig,
) -> Result<String, serde_json::Error> {
    let value = json!({
        "params": serde_json::to_value(params)?,
        "config": serde_json::to_value(config)?,
    });
    Ok(canonical_value_hash(&value))
}

/// Computes the BLAKE3 hash of the canonical form of `value`.
pub fn canonical_value_hash(value: &Value) -> String {
    blake3::hash(canonicalize(value).as_bytes())
        .to_hex()
        .to_string()
}

/// Serializes `value` in canonical form.
pub fn canonicalize(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => format_string(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonicalize).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_string(k), canonicalize(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                "0".to_string()
            } else if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", f as i64)
            } else {
                format!("{}", f)
            }
        }
        _ => "null".to_string(),
    }
}

fn format_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

//! Lenient accessors over untyped backend JSON.
//!
//! The backend serializes numbers as strings in some endpoints and omits
//! fields freely. Every helper here returns `None` (or a neutral value)
//! instead of failing, so normalization can stay total.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Returns `raw[key]` unless it is absent or JSON `null`.
pub(crate) fn present<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

/// Reads a string-ish scalar. Numbers are rendered with their JSON text.
pub(crate) fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn string_field(raw: &Value, key: &str) -> Option<String> {
    present(raw, key).and_then(string_value)
}

/// Like [`string_field`], but an empty string counts as absent.
pub(crate) fn non_empty_field(raw: &Value, key: &str) -> Option<String> {
    string_field(raw, key).filter(|s| !s.is_empty())
}

/// First non-empty string among `keys`, in order.
pub(crate) fn first_non_empty(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty_field(raw, key))
}

/// Parses a present price-like value; anything unparseable becomes zero.
pub(crate) fn decimal_value(value: &Value) -> Decimal {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn f64_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

pub(crate) fn f64_field(raw: &Value, key: &str) -> Option<f64> {
    present(raw, key).and_then(f64_value)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn i64_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

pub(crate) fn i64_field(raw: &Value, key: &str) -> Option<i64> {
    present(raw, key).and_then(i64_value)
}

/// Non-negative count; negative inputs clamp to zero.
pub(crate) fn u64_field(raw: &Value, key: &str) -> Option<u64> {
    i64_field(raw, key).map(|n| u64::try_from(n).unwrap_or(0))
}

pub(crate) fn bool_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    present(raw, key).and_then(bool_value)
}

/// Elements of `raw[key]` when it is an array; empty otherwise.
pub(crate) fn array_field<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Lowercases `name` and replaces every whitespace run with one `-`.
///
/// Leading and trailing whitespace are not trimmed, so `" Acme"` becomes
/// `"-acme"`; storefront URLs built from older slugs depend on this.
pub(crate) fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

//! Response envelope unwrapping and page metadata extraction.
//!
//! The marketplace backend is inconsistent about how it wraps list results.
//! Three shapes are accepted:
//!
//! ```text
//! [ {...}, {...} ]                                  bare array
//! { "data": [ {...} ] }                             single wrap
//! { "data": { "data": [ {...} ], "last_page": 3 } } paginator wrap
//! ```
//!
//! Page counts live either next to the inner list (`data.last_page`) or in a
//! sibling `meta` object (`meta.last_page`).

use serde::Serialize;
use serde_json::Value;

use crate::parse_helpers::{present, u64_field};

/// Extracts the list of raw records from a response body.
///
/// Never fails: a body of any other shape yields an empty vector.
#[must_use]
pub fn unwrap_records(body: &Value) -> Vec<Value> {
    if let Some(items) = body.as_array() {
        return items.clone();
    }

    let data = body.get("data");
    if let Some(items) = data.and_then(Value::as_array) {
        return items.clone();
    }
    if let Some(items) = data.and_then(|d| d.get("data")).and_then(Value::as_array) {
        return items.clone();
    }

    Vec::new()
}

/// Extracts a single record from a detail response.
///
/// Prefers an object under `data`, then the body itself when it is an
/// object. Returns `Value::Null` otherwise; the normalizers turn that into a
/// fully defaulted record.
#[must_use]
pub fn unwrap_record(body: &Value) -> Value {
    match body.get("data") {
        Some(data @ Value::Object(_)) => data.clone(),
        _ if body.is_object() => body.clone(),
        _ => Value::Null,
    }
}

/// Pagination state for one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
    pub total: Option<u64>,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: None,
        }
    }
}

impl PageInfo {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Reads pagination metadata from a list response.
///
/// `last_page` precedence: `data.last_page`, then `meta.last_page`, then 1.
/// `current_page` and `total` follow the same lookup order. Page numbers are
/// clamped to at least 1.
#[must_use]
pub fn extract_page_info(body: &Value) -> PageInfo {
    let lookup = |key: &str| -> Option<u64> {
        let from_data = body.get("data").and_then(|d| u64_field(d, key));
        from_data.or_else(|| present(body, "meta").and_then(|m| u64_field(m, key)))
    };
    let page_number = |key: &str| -> u32 {
        lookup(key)
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
            .max(1)
    };

    PageInfo {
        current_page: page_number("current_page"),
        last_page: page_number("last_page"),
        total: lookup("total"),
    }
}

/// One page of normalized items plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Unwraps `body`, maps each raw record through `normalize`, and reads
    /// the page metadata.
    pub fn from_body(body: &Value, normalize: impl Fn(&Value) -> T) -> Self {
        let items = unwrap_records(body).iter().map(normalize).collect();
        Self {
            items,
            info: extract_page_info(body),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

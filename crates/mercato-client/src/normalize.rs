//! Normalization from raw backend records to [`mercato_core`] view models.
//!
//! Every function here is total: missing, null, or oddly typed fields fall
//! back to documented defaults and nothing returns an error. Coercion of
//! individual scalars lives in [`crate::parse_helpers`].

use chrono::{DateTime, SecondsFormat, Utc};
use mercato_core::{
    Category, ContentEntry, OrderLine, OrderTracking, Product, ProductAttribute, ProductImage,
    ProductStatus, ProductVariation, Review, Vendor,
};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::parse_helpers::{
    array_field, bool_field, decimal_value, f64_field, first_non_empty, i64_field,
    non_empty_field, present, slugify, string_field, string_value, u64_field,
};

const DEFAULT_VENDOR_NAME: &str = "Vendor";

/// Normalizes a raw product record, stamping missing timestamps with the
/// current time.
#[must_use]
pub fn normalize_product(raw: &Value) -> Product {
    normalize_product_at(raw, Utc::now())
}

/// Normalizes a raw product record, using `now` for missing timestamps.
///
/// Field rules:
/// - `price` parses strings and numbers; anything else is 0. `sale_price`
///   follows the same rule but stays `None` when absent.
/// - `in_stock` is `stock_status == "in_stock"` when `stock_status` is
///   present, otherwise `true`.
/// - `status` is [`ProductStatus::Active`] only for `"approved"`; every other
///   value, including none, is [`ProductStatus::Draft`].
/// - `images` keep backend order; `sort_order` is carried, not applied.
/// - `categories` holds `raw.category` alone, or nothing.
#[must_use]
pub fn normalize_product_at(raw: &Value, now: DateTime<Utc>) -> Product {
    let id = string_field(raw, "id").unwrap_or_default();
    let slug = non_empty_field(raw, "slug").unwrap_or_else(|| id.clone());

    let price = present(raw, "price").map_or(Decimal::ZERO, decimal_value);
    let sale_price = present(raw, "sale_price").map(decimal_value);

    let in_stock = present(raw, "stock_status")
        .map_or(true, |status| status.as_str() == Some("in_stock"));

    let status = if raw.get("status").and_then(Value::as_str) == Some("approved") {
        ProductStatus::Active
    } else {
        ProductStatus::Draft
    };

    let categories = present(raw, "category")
        .map(|c| vec![normalize_category(c)])
        .unwrap_or_default();

    let timestamp = || now.to_rfc3339_opts(SecondsFormat::Secs, true);

    Product {
        slug,
        name: string_field(raw, "name").unwrap_or_default(),
        description: string_field(raw, "description").unwrap_or_default(),
        short_description: string_field(raw, "short_description").unwrap_or_default(),
        sku: non_empty_field(raw, "sku"),
        price,
        sale_price,
        stock_quantity: i64_field(raw, "stock_quantity").unwrap_or(0),
        in_stock,
        status,
        vendor: normalize_vendor(raw.get("vendor").unwrap_or(&Value::Null)),
        images: array_field(raw, "images").iter().map(normalize_image).collect(),
        categories,
        attributes: normalize_attributes(raw.get("attributes").unwrap_or(&Value::Null)),
        variations: array_field(raw, "variations")
            .iter()
            .map(normalize_variation)
            .collect(),
        reviews: array_field(raw, "reviews").iter().map(normalize_review).collect(),
        average_rating: f64_field(raw, "average_rating").unwrap_or(0.0),
        total_reviews: u64_field(raw, "total_reviews").unwrap_or(0),
        created_at: non_empty_field(raw, "created_at").unwrap_or_else(timestamp),
        updated_at: non_empty_field(raw, "updated_at").unwrap_or_else(timestamp),
        id,
    }
}

/// Normalizes a vendor record, either nested in a product or from the
/// vendors listing.
///
/// The display name is the first non-empty of `name` and `business_name`,
/// else `"Vendor"`. A missing slug is derived from that name.
#[must_use]
pub fn normalize_vendor(raw: &Value) -> Vendor {
    let name = first_non_empty(raw, &["name", "business_name"])
        .unwrap_or_else(|| DEFAULT_VENDOR_NAME.to_owned());
    let slug = non_empty_field(raw, "slug").unwrap_or_else(|| slugify(&name));

    Vendor {
        id: string_field(raw, "id").unwrap_or_default(),
        slug,
        email: string_field(raw, "email").unwrap_or_default(),
        logo_url: first_non_empty(raw, &["logo_url", "logo"]),
        description: string_field(raw, "description").unwrap_or_default(),
        rating: f64_field(raw, "rating").unwrap_or(0.0),
        total_reviews: u64_field(raw, "total_reviews").unwrap_or(0),
        name,
    }
}

/// Normalizes a category record. A bare string is taken as the name.
#[must_use]
pub fn normalize_category(raw: &Value) -> Category {
    if let Value::String(name) = raw {
        return Category {
            id: String::new(),
            slug: slugify(name),
            name: name.clone(),
            description: None,
            parent_id: None,
        };
    }

    let name = string_field(raw, "name").unwrap_or_default();
    Category {
        id: string_field(raw, "id").unwrap_or_default(),
        slug: non_empty_field(raw, "slug").unwrap_or_else(|| slugify(&name)),
        description: non_empty_field(raw, "description"),
        parent_id: string_field(raw, "parent_id"),
        name,
    }
}

/// A bare string entry is taken as the image URL.
fn normalize_image(raw: &Value) -> ProductImage {
    if let Value::String(url) = raw {
        return ProductImage {
            id: String::new(),
            url: url.clone(),
            alt_text: String::new(),
            is_primary: false,
            sort_order: 0,
        };
    }

    ProductImage {
        id: string_field(raw, "id").unwrap_or_default(),
        url: first_non_empty(raw, &["url", "image_url"]).unwrap_or_default(),
        alt_text: first_non_empty(raw, &["alt_text", "alt"]).unwrap_or_default(),
        is_primary: bool_field(raw, "is_primary").unwrap_or(false),
        sort_order: i64_field(raw, "sort_order").unwrap_or(0),
    }
}

/// Accepts either a list of `{name, value}` objects or a `{name: value}` map.
fn normalize_attributes(raw: &Value) -> Vec<ProductAttribute> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let name = string_field(item, "name")?;
                let value = item.get("value").map(attribute_value).unwrap_or_default();
                Some(ProductAttribute { name, value })
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| ProductAttribute {
                name: name.clone(),
                value: attribute_value(value),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Scalars render as text; lists of options are joined with `", "`.
fn attribute_value(value: &Value) -> String {
    match value {
        Value::Array(options) => options
            .iter()
            .filter_map(string_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Bool(b) => b.to_string(),
        other => string_value(other).unwrap_or_default(),
    }
}

fn normalize_variation(raw: &Value) -> ProductVariation {
    ProductVariation {
        id: string_field(raw, "id").unwrap_or_default(),
        sku: non_empty_field(raw, "sku"),
        price: present(raw, "price").map(decimal_value),
        stock_quantity: i64_field(raw, "stock_quantity").unwrap_or(0),
        attributes: normalize_attributes(raw.get("attributes").unwrap_or(&Value::Null)),
    }
}

fn normalize_review(raw: &Value) -> Review {
    let author = first_non_empty(raw, &["author", "customer_name"])
        .or_else(|| raw.get("user").and_then(|u| non_empty_field(u, "name")))
        .unwrap_or_default();

    Review {
        id: string_field(raw, "id").unwrap_or_default(),
        rating: f64_field(raw, "rating").unwrap_or(0.0),
        comment: first_non_empty(raw, &["comment", "body"]).unwrap_or_default(),
        author,
        created_at: string_field(raw, "created_at").unwrap_or_default(),
    }
}

/// Normalizes a content-page record (post, job, FAQ, help article, press
/// release or size-guide row).
#[must_use]
pub fn normalize_content_entry(raw: &Value) -> ContentEntry {
    let title = first_non_empty(raw, &["title", "question", "name"]).unwrap_or_default();
    ContentEntry {
        id: string_field(raw, "id").unwrap_or_default(),
        slug: non_empty_field(raw, "slug").unwrap_or_else(|| slugify(&title)),
        body: first_non_empty(raw, &["body", "content", "answer", "description"])
            .unwrap_or_default(),
        published_at: first_non_empty(raw, &["published_at", "created_at"]),
        title,
    }
}

/// Normalizes an order-tracking response record.
#[must_use]
pub fn normalize_order_tracking(raw: &Value) -> OrderTracking {
    OrderTracking {
        order_number: first_non_empty(raw, &["order_number", "number", "id"]).unwrap_or_default(),
        status: non_empty_field(raw, "status").unwrap_or_else(|| "unknown".to_owned()),
        tracking_number: non_empty_field(raw, "tracking_number"),
        estimated_delivery: non_empty_field(raw, "estimated_delivery"),
        total: present(raw, "total")
            .or_else(|| present(raw, "total_amount"))
            .map_or(Decimal::ZERO, decimal_value),
        items: array_field(raw, "items").iter().map(normalize_order_line).collect(),
    }
}

fn normalize_order_line(raw: &Value) -> OrderLine {
    let name = first_non_empty(raw, &["name", "product_name"])
        .or_else(|| raw.get("product").and_then(|p| non_empty_field(p, "name")))
        .unwrap_or_default();
    OrderLine {
        name,
        quantity: u64_field(raw, "quantity").unwrap_or(0),
        price: present(raw, "price").map_or(Decimal::ZERO, decimal_value),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

//! Plain-text rendering of list and form state.
//!
//! Everything here is pure so the output can be asserted in tests without a
//! backend.

use mercato_client::{ListState, LoadStatus, SubmissionState};
use mercato_core::{Category, ContentEntry, OrderTracking, Product, Vendor};
use rust_decimal::Decimal;
use serde_json::Value;

pub(crate) const NO_DEALS: &str = "No deals available right now.";
pub(crate) const NO_PRODUCTS: &str = "No products match these filters.";
pub(crate) const NO_VENDORS: &str = "No vendors yet.";
pub(crate) const NO_CATEGORIES: &str = "No categories yet.";
pub(crate) const NO_CONTENT: &str = "Nothing published here yet.";
pub(crate) const NO_RECORDS: &str = "No records.";

const SUMMARY_WIDTH: usize = 60;

fn money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}

/// Renders any list view: an error, the empty message, or one line per item
/// followed by a page footer when there is more than one page.
pub(crate) fn list<T, P>(
    state: &ListState<T, P>,
    empty_message: &str,
    line: impl Fn(&T) -> String,
) -> String {
    if let Some(route) = &state.redirect_to {
        return format!("Your session has expired. Sign in again at {route}.");
    }

    match state.status {
        LoadStatus::Failed => {
            let mut out = state.error.clone().unwrap_or_default();
            if !state.items.is_empty() {
                out.push_str("\nShowing the last results we loaded:\n");
                out.push_str(&lines(state, &line));
            }
            out
        }
        LoadStatus::LoadedEmpty => empty_message.to_owned(),
        LoadStatus::Loaded => lines(state, &line),
        LoadStatus::Idle | LoadStatus::Loading => String::new(),
    }
}

fn lines<T, P>(state: &ListState<T, P>, line: &impl Fn(&T) -> String) -> String {
    let mut out: Vec<String> = state.items.iter().map(line).collect();
    if state.page.last_page > 1 {
        out.push(format!(
            "Page {} of {}",
            state.page.current_page, state.page.last_page
        ));
    }
    out.join("\n")
}

/// One-line product card: name, vendor, price and a stock flag.
pub(crate) fn product_card(product: &Product) -> String {
    let price = price_label(product);
    let stock = if product.in_stock { "" } else { "  [out of stock]" };
    format!(
        "{:<32}{:<20}{}{stock}",
        truncate(&product.name, 30),
        truncate(&product.vendor.name, 18),
        price
    )
}

pub(crate) fn product_detail(product: &Product) -> String {
    let stock = if product.in_stock {
        format!("in stock ({})", product.stock_quantity)
    } else {
        "out of stock".to_owned()
    };
    let mut out = vec![
        product.name.clone(),
        format!("Sold by: {}", product.vendor.name),
        format!("Price:   {}", price_label(product)),
        format!("Stock:   {stock}"),
    ];
    if let Some(sku) = &product.sku {
        out.push(format!("SKU:     {sku}"));
    }
    if let Some(category) = product.categories.first() {
        out.push(format!("Category: {}", category.name));
    }
    if product.total_reviews > 0 {
        out.push(format!(
            "Rating:  {:.1} ({} reviews)",
            product.average_rating, product.total_reviews
        ));
    }
    if let Some(image) = product.primary_image() {
        out.push(format!("Image:   {}", image.url));
    }
    out.extend(
        product
            .attributes
            .iter()
            .map(|attribute| format!("  {}: {}", attribute.name, attribute.value)),
    );
    if !product.description.is_empty() {
        out.push(String::new());
        out.push(product.description.clone());
    }
    out.join("\n")
}

fn price_label(product: &Product) -> String {
    if product.is_on_sale() {
        format!(
            "{} (was {})",
            money(product.effective_price()),
            money(product.price)
        )
    } else {
        money(product.price)
    }
}

pub(crate) fn vendor_line(vendor: &Vendor) -> String {
    if vendor.total_reviews > 0 {
        format!(
            "{:<32}{:.1} ({} reviews)",
            truncate(&vendor.name, 30),
            vendor.rating,
            vendor.total_reviews
        )
    } else {
        format!("{:<32}no reviews yet", truncate(&vendor.name, 30))
    }
}

pub(crate) fn category_line(category: &Category) -> String {
    format!("{:<32}/{}", truncate(&category.name, 30), category.slug)
}

pub(crate) fn content_line(entry: &ContentEntry) -> String {
    let mut out = match &entry.published_at {
        Some(date) => format!("{} ({date})", entry.title),
        None => entry.title.clone(),
    };
    if !entry.body.is_empty() {
        out.push_str("\n    ");
        out.push_str(&truncate(&entry.body, SUMMARY_WIDTH));
    }
    out
}

pub(crate) fn order(order: &OrderTracking) -> String {
    let mut out = vec![format!("Order {}: {}", order.order_number, order.status)];
    if let Some(tracking) = &order.tracking_number {
        out.push(format!("Tracking number: {tracking}"));
    }
    if let Some(eta) = &order.estimated_delivery {
        out.push(format!("Estimated delivery: {eta}"));
    }
    out.extend(order.items.iter().map(|line| {
        format!("  {} x {}  {}", line.quantity, line.name, money(line.price))
    }));
    out.push(format!(
        "Total: {} ({} items)",
        money(order.total),
        order.unit_count()
    ));
    out.join("\n")
}

/// Compact JSON for one POS record.
pub(crate) fn pos_record(record: &Value) -> String {
    truncate(&record.to_string(), 100)
}

pub(crate) fn submission(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Submitting => "Still sending, please wait.".to_owned(),
        SubmissionState::Succeeded { message } | SubmissionState::Failed { message } => {
            message.clone()
        }
        SubmissionState::SignInRequired { login_route } => {
            format!("Your session has expired. Sign in again at {login_route}.")
        }
    }
}

use super::*;

use mercato_client::{normalize_product, ListState, LoadStatus, SubmissionState};
use mercato_core::Product;
use serde_json::json;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mercato"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn products_defaults_to_first_page_without_filters() {
    let cli = Cli::try_parse_from(["mercato", "products"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            page: 1,
            category: None,
            vendor: None,
            search: None,
            sort: None,
        })
    ));
}

#[test]
fn products_accepts_filters() {
    let cli = Cli::try_parse_from([
        "mercato",
        "products",
        "--page",
        "3",
        "--category",
        "home",
        "--search",
        "linen",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            page: 3,
            category: Some(ref c),
            search: Some(ref s),
            ..
        }) if c == "home" && s == "linen"
    ));
}

#[test]
fn parses_categories_navigation_flag() {
    let cli = Cli::try_parse_from(["mercato", "categories", "--navigation"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Categories { navigation: true })
    ));
}

#[test]
fn parses_hyphenated_content_section() {
    let cli = Cli::try_parse_from(["mercato", "content", "size-guide"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Content {
            kind: ContentKind::SizeGuide
        })
    ));
}

#[test]
fn rejects_unknown_content_section() {
    assert!(Cli::try_parse_from(["mercato", "content", "recipes"]).is_err());
}

#[test]
fn parses_pos_resource_with_page() {
    let cli = Cli::try_parse_from(["mercato", "pos", "inventory", "--page", "2"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Pos {
            resource: PosResource::Inventory,
            page: 2
        })
    ));
}

#[test]
fn contact_requires_all_message_fields() {
    let result = Cli::try_parse_from(["mercato", "contact", "--name", "Ada"]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from([
        "mercato",
        "contact",
        "--name",
        "Ada",
        "--email",
        "ada@example.com",
        "--subject",
        "Hi",
        "--message",
        "Hello",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Contact { phone: None, .. })
    ));
}

#[test]
fn parses_track_order_number() {
    let cli = Cli::try_parse_from(["mercato", "track", "ORD-1042"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Track { ref order_number }) if order_number == "ORD-1042"
    ));
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn product(raw: &serde_json::Value) -> Product {
    normalize_product(raw)
}

fn loaded(items: Vec<Product>) -> ListState<Product, u32> {
    ListState {
        status: LoadStatus::Loaded,
        items,
        ..ListState::default()
    }
}

#[test]
fn empty_deals_render_explicit_message() {
    let state: ListState<Product, u32> = ListState {
        status: LoadStatus::LoadedEmpty,
        ..ListState::default()
    };
    assert_eq!(
        render::list(&state, render::NO_DEALS, render::product_card),
        "No deals available right now."
    );
}

#[test]
fn sale_card_shows_both_prices() {
    let card = render::product_card(&product(&json!({
        "name": "Linen Throw",
        "price": "60",
        "sale_price": "45.5",
        "vendor": {"name": "Casa Lino"}
    })));
    assert!(card.contains("$45.50 (was $60.00)"), "card: {card}");
    assert!(card.contains("Casa Lino"));
    assert!(!card.contains("out of stock"));
}

#[test]
fn out_of_stock_card_is_flagged() {
    let card = render::product_card(&product(&json!({
        "name": "Wool Rug",
        "price": 120,
        "stock_status": "out_of_stock"
    })));
    assert!(card.ends_with("[out of stock]"), "card: {card}");
}

#[test]
fn list_footer_shows_page_position() {
    let mut state = loaded(vec![product(&json!({"name": "A", "price": 1}))]);
    state.page.current_page = 2;
    state.page.last_page = 4;
    let out = render::list(&state, render::NO_PRODUCTS, render::product_card);
    assert!(out.ends_with("Page 2 of 4"), "out: {out}");
}

#[test]
fn failed_list_shows_error_and_last_items() {
    let mut state = loaded(vec![product(&json!({"name": "Kept", "price": 1}))]);
    state.status = LoadStatus::Failed;
    state.error = Some("We couldn't load this page. Please try again.".to_owned());
    let out = render::list(&state, render::NO_PRODUCTS, render::product_card);
    assert!(out.starts_with("We couldn't load this page."));
    assert!(out.contains("Kept"));
}

#[test]
fn expired_session_renders_login_route() {
    let state: ListState<Product, u32> = ListState {
        status: LoadStatus::Failed,
        redirect_to: Some("/login".to_owned()),
        ..ListState::default()
    };
    assert_eq!(
        render::list(&state, render::NO_PRODUCTS, render::product_card),
        "Your session has expired. Sign in again at /login."
    );
}

#[test]
fn order_summary_lists_lines_and_total() {
    let order = mercato_client::normalize::normalize_order_tracking(&json!({
        "order_number": "ORD-7",
        "status": "processing",
        "total": "30",
        "items": [{"name": "Candle", "quantity": 3, "price": "10"}]
    }));
    let out = render::order(&order);
    assert!(out.starts_with("Order ORD-7: processing"));
    assert!(out.contains("3 x Candle  $10.00"));
    assert!(out.ends_with("Total: $30.00 (3 items)"));
}

#[test]
fn submission_messages_pass_through() {
    assert_eq!(
        render::submission(&SubmissionState::Succeeded {
            message: "Thanks!".to_owned()
        }),
        "Thanks!"
    );
    assert_eq!(render::submission(&SubmissionState::Idle), "");
}

#[test]
fn product_detail_lists_known_fields_in_order() {
    let detail = render::product_detail(&product(&json!({
        "name": "Linen Throw",
        "price": "60",
        "sku": "LT-01",
        "stock_quantity": 4,
        "vendor": {"name": "Casa Lino"},
        "category": {"name": "Home"},
        "attributes": {"Color": "Sand"},
        "description": "Stonewashed linen."
    })));
    let lines: Vec<&str> = detail.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Linen Throw",
            "Sold by: Casa Lino",
            "Price:   $60.00",
            "Stock:   in stock (4)",
            "SKU:     LT-01",
            "Category: Home",
            "  Color: Sand",
            "",
            "Stonewashed linen.",
        ]
    );
}

#[test]
fn content_line_shows_date_and_summary() {
    let entry = mercato_client::normalize::normalize_content_entry(&json!({
        "title": "Spring drop",
        "published_at": "2026-04-01",
        "body": "New linen."
    }));
    assert_eq!(
        render::content_line(&entry),
        "Spring drop (2026-04-01)\n    New linen."
    );
}

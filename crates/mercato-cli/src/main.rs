mod render;

use clap::{Parser, Subcommand};
use mercato_client::{
    AuthContext, ContactRequest, FetchCycle, FormSubmission, MercatoClient, Page, PageInfo,
    PosResource, ProductQuery,
};
use mercato_core::{AppConfig, ContentKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mercato")]
#[command(about = "Marketplace storefront and POS client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalogue
    Products {
        #[arg(long, default_value = "1")]
        page: u32,
        /// Category slug
        #[arg(long)]
        category: Option<String>,
        /// Vendor slug
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Backend sort key (e.g. `price_asc`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// Products currently on sale
    Deals {
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// List vendors
    Vendors {
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// List categories
    Categories {
        /// Use the lighter navigation listing
        #[arg(long)]
        navigation: bool,
    },
    /// Show a content section (posts, jobs, faqs, help, press, size-guide)
    Content {
        #[arg(value_parser = parse_content_kind)]
        kind: ContentKind,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Look up an order by its order number
    Track { order_number: String },
    /// Browse a POS resource (products, orders, payments, inventory, reports, customers)
    Pos {
        #[arg(value_parser = parse_pos_resource)]
        resource: PosResource,
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

fn parse_content_kind(value: &str) -> Result<ContentKind, String> {
    ContentKind::ALL
        .into_iter()
        .find(|kind| kind.path_segment() == value)
        .ok_or_else(|| format!("unknown content section '{value}'"))
}

fn parse_pos_resource(value: &str) -> Result<PosResource, String> {
    PosResource::ALL
        .into_iter()
        .find(|resource| resource.path_segment() == value)
        .ok_or_else(|| format!("unknown POS resource '{value}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("mercato: run `mercato --help` to list commands");
        return Ok(());
    };

    let config = mercato_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "loaded configuration");

    let client = MercatoClient::from_config(&config)?;
    let auth = AuthContext::with_token(config.api_token.clone(), config.login_route.clone());

    let output = run_command(command, &client, &auth, &config).await;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Wraps an unpaginated listing so it can go through a [`FetchCycle`].
fn single_page<T>(items: Vec<T>) -> Page<T> {
    Page {
        items,
        info: PageInfo::default(),
    }
}

async fn run_command(
    command: Commands,
    client: &MercatoClient,
    auth: &AuthContext,
    config: &AppConfig,
) -> String {
    match command {
        Commands::Products {
            page,
            category,
            vendor,
            search,
            sort,
        } => {
            let query = ProductQuery {
                page,
                per_page: Some(config.page_size),
                category,
                vendor,
                search,
                sort,
                on_sale: false,
            };
            let cycle = FetchCycle::new();
            cycle
                .run(query, |q| async move { client.list_products(auth, &q).await })
                .await;
            render::list(&cycle.snapshot(), render::NO_PRODUCTS, render::product_card)
        }
        Commands::Product { id } => {
            match client.get_product(auth, &id).await {
                Ok(product) => render::product_detail(&product),
                Err(err) => {
                    tracing::warn!(error = %err, product_id = %id, "product lookup failed");
                    err.user_message()
                }
            }
        }
        Commands::Deals { page } => {
            let cycle = FetchCycle::new();
            cycle
                .run(page, |p| async move { client.list_deals(auth, p).await })
                .await;
            render::list(&cycle.snapshot(), render::NO_DEALS, render::product_card)
        }
        Commands::Vendors { page } => {
            let cycle = FetchCycle::new();
            cycle
                .run(page, |p| async move { client.list_vendors(auth, p).await })
                .await;
            render::list(&cycle.snapshot(), render::NO_VENDORS, render::vendor_line)
        }
        Commands::Categories { navigation } => {
            let cycle = FetchCycle::new();
            cycle
                .run(navigation, |nav| async move {
                    let categories = if nav {
                        client.list_navigation_categories(auth).await
                    } else {
                        client.list_categories(auth).await
                    };
                    categories.map(single_page)
                })
                .await;
            render::list(&cycle.snapshot(), render::NO_CATEGORIES, render::category_line)
        }
        Commands::Content { kind } => {
            let cycle = FetchCycle::new();
            cycle
                .run(kind, |k| async move {
                    client.list_content(auth, k).await.map(single_page)
                })
                .await;
            render::list(&cycle.snapshot(), render::NO_CONTENT, render::content_line)
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
            phone,
        } => {
            let request = ContactRequest {
                name,
                email,
                subject,
                message,
                phone,
            };
            let form = FormSubmission::new();
            let state = form.submit(|| client.submit_contact(auth, &request)).await;
            render::submission(&state)
        }
        Commands::Track { order_number } => {
            let form = FormSubmission::new();
            let state = form
                .submit(|| async {
                    client
                        .track_order(auth, &order_number)
                        .await
                        .map(|order| render::order(&order))
                })
                .await;
            render::submission(&state)
        }
        Commands::Pos { resource, page } => {
            let cycle = FetchCycle::new();
            cycle
                .run((resource, page), |(r, p)| async move {
                    client.list_pos_records(auth, r, p).await
                })
                .await;
            render::list(&cycle.snapshot(), render::NO_RECORDS, render::pos_record)
        }
    }
}

#[cfg(test)]
mod tests;

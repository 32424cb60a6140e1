pub mod app_config;
pub mod config;
pub mod content;
pub mod error;
pub mod orders;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{ContentEntry, ContentKind};
pub use error::ConfigError;
pub use orders::{OrderLine, OrderTracking};
pub use products::{
    Category, Product, ProductAttribute, ProductImage, ProductStatus, ProductVariation, Review,
    Vendor,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Publication state of a product as shown to shoppers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Draft,
    Inactive,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A product as the storefront and POS render it.
///
/// Every field is populated: the normalizer in `mercato-client` fills gaps in
/// backend payloads with defaults instead of leaving them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend product ID, stored as a string. Empty when the payload had none.
    pub id: String,
    pub name: String,
    /// URL slug; falls back to the ID when the backend omits it.
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub sku: Option<String>,
    pub price: Decimal,
    /// Discounted price, only present when the backend sent one.
    pub sale_price: Option<Decimal>,
    pub stock_quantity: i64,
    pub in_stock: bool,
    pub status: ProductStatus,
    pub vendor: Vendor,
    /// Images in the order the backend listed them.
    pub images: Vec<ProductImage>,
    /// At most one entry in practice; see `normalize_product`.
    pub categories: Vec<Category>,
    pub attributes: Vec<ProductAttribute>,
    pub variations: Vec<ProductVariation>,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: u64,
    /// RFC 3339 timestamps.
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    /// Returns `true` when a sale price is set and below the regular price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
    }

    /// The price a shopper pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }

    /// Returns the image flagged primary, else the first image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }

    /// Renders this product back into the backend's raw record shape.
    ///
    /// Feeding the result through `normalize_product` yields a product equal
    /// to `self`, provided `status` is not [`ProductStatus::Inactive`] (the
    /// backend has no status that normalizes to it).
    #[must_use]
    pub fn to_raw(&self) -> Value {
        let status = match self.status {
            ProductStatus::Active => "approved",
            ProductStatus::Draft | ProductStatus::Inactive => "draft",
        };
        let stock_status = if self.in_stock {
            "in_stock"
        } else {
            "out_of_stock"
        };

        json!({
            "id": self.id,
            "name": self.name,
            "slug": self.slug,
            "description": self.description,
            "short_description": self.short_description,
            "sku": self.sku,
            "price": self.price.to_string(),
            "sale_price": self.sale_price.map(|p| p.to_string()),
            "stock_quantity": self.stock_quantity,
            "stock_status": stock_status,
            "status": status,
            "vendor": self.vendor.to_raw(),
            "images": self.images.iter().map(ProductImage::to_raw).collect::<Vec<_>>(),
            "category": self.categories.first().map(Category::to_raw),
            "attributes": self.attributes.iter().map(ProductAttribute::to_raw).collect::<Vec<_>>(),
            "variations": self.variations.iter().map(ProductVariation::to_raw).collect::<Vec<_>>(),
            "reviews": self.reviews.iter().map(Review::to_raw).collect::<Vec<_>>(),
            "average_rating": self.average_rating,
            "total_reviews": self.total_reviews,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }
}

/// The seller behind a product, or an entry on the vendors page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    /// Display name; `"Vendor"` when the backend sent neither name field.
    pub name: String,
    pub slug: String,
    pub email: String,
    pub logo_url: Option<String>,
    pub description: String,
    pub rating: f64,
    pub total_reviews: u64,
}

impl Vendor {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "slug": self.slug,
            "email": self.email,
            "logo": self.logo_url,
            "description": self.description,
            "rating": self.rating,
            "total_reviews": self.total_reviews,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub alt_text: String,
    pub is_primary: bool,
    /// Carried through from the backend; images are not reordered by it.
    pub sort_order: i64,
}

impl ProductImage {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "url": self.url,
            "alt_text": self.alt_text,
            "is_primary": self.is_primary,
            "sort_order": self.sort_order,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
}

impl Category {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "slug": self.slug,
            "description": self.description,
            "parent_id": self.parent_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub name: String,
    pub value: String,
}

impl ProductAttribute {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({ "name": self.name, "value": self.value })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariation {
    pub id: String,
    pub sku: Option<String>,
    /// Variation-specific price; `None` means the parent price applies.
    pub price: Option<Decimal>,
    pub stock_quantity: i64,
    pub attributes: Vec<ProductAttribute>,
}

impl ProductVariation {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "sku": self.sku,
            "price": self.price.map(|p| p.to_string()),
            "stock_quantity": self.stock_quantity,
            "attributes": self.attributes.iter().map(ProductAttribute::to_raw).collect::<Vec<_>>(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: f64,
    pub comment: String,
    pub author: String,
    pub created_at: String,
}

impl Review {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "rating": self.rating,
            "comment": self.comment,
            "author": self.author,
            "created_at": self.created_at,
        })
    }
}

//! Storefront endpoints: catalogue, vendors, content pages, contact form and
//! order tracking.

use mercato_core::{Category, ContentEntry, ContentKind, OrderTracking, Product, Vendor};
use serde_json::Value;

use crate::auth::AuthContext;
use crate::envelope::{unwrap_record, unwrap_records, Page};
use crate::error::ClientError;
use crate::form::ContactRequest;
use crate::normalize::{
    normalize_category, normalize_content_entry, normalize_order_tracking, normalize_product,
    normalize_vendor,
};

use super::MercatoClient;

const CONTACT_THANKS: &str = "Thanks for reaching out! We'll get back to you soon.";

/// Filters for the product listing. Two queries compare equal exactly when
/// they would fetch the same page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub per_page: Option<u32>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub on_sale: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
            category: None,
            vendor: None,
            search: None,
            sort: None,
            on_sale: false,
        }
    }
}

impl ProductQuery {
    /// Query for the deals page.
    #[must_use]
    pub fn deals(page: u32) -> Self {
        Self {
            page,
            on_sale: true,
            ..Self::default()
        }
    }

    /// Same filters, different page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.max(1).to_string())];
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        let optional = [
            ("category", &self.category),
            ("vendor", &self.vendor),
            ("search", &self.search),
            ("sort", &self.sort),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                pairs.push((key, value.to_owned()));
            }
        }
        if self.on_sale {
            pairs.push(("on_sale", "1".to_owned()));
        }
        pairs
    }
}

impl MercatoClient {
    /// `GET /api/v1/products`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on 401 (token cleared).
    /// - [`ClientError::NotFound`] on 404.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on transport failure.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    pub async fn list_products(
        &self,
        auth: &AuthContext,
        query: &ProductQuery,
    ) -> Result<Page<Product>, ClientError> {
        let url = self.endpoint(&["api", "v1", "products"], &query.query_pairs());
        let body = self.get_json(auth, url).await?;
        Ok(Page::from_body(&body, normalize_product))
    }

    /// Products currently on sale.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_deals(
        &self,
        auth: &AuthContext,
        page: u32,
    ) -> Result<Page<Product>, ClientError> {
        self.list_products(auth, &ProductQuery::deals(page)).await
    }

    /// `GET /api/v1/products/{id}`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn get_product(&self, auth: &AuthContext, id: &str) -> Result<Product, ClientError> {
        let url = self.endpoint(&["api", "v1", "products", id], &[]);
        let body = self.get_json(auth, url).await?;
        Ok(normalize_product(&unwrap_record(&body)))
    }

    /// `GET /api/v1/categories`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_categories(&self, auth: &AuthContext) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["api", "v1", "categories"], &[]);
        self.fetch_list(auth, url, normalize_category).await
    }

    /// `GET /categories`, the lighter list used by the site navigation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_navigation_categories(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["categories"], &[]);
        self.fetch_list(auth, url, normalize_category).await
    }

    /// `GET /api/vendors`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_vendors(
        &self,
        auth: &AuthContext,
        page: u32,
    ) -> Result<Page<Vendor>, ClientError> {
        let url = self.endpoint(&["api", "vendors"], &[("page", page.max(1).to_string())]);
        let body = self.get_json(auth, url).await?;
        Ok(Page::from_body(&body, normalize_vendor))
    }

    /// `GET /api/v1/{posts,jobs,faqs,help,press,size-guide}`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_content(
        &self,
        auth: &AuthContext,
        kind: ContentKind,
    ) -> Result<Vec<ContentEntry>, ClientError> {
        let url = self.endpoint(&["api", "v1", kind.path_segment()], &[]);
        self.fetch_list(auth, url, normalize_content_entry).await
    }

    /// `POST /api/v1/contact`. Returns the confirmation message to show.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingFields`] if a required field is blank (nothing
    ///   is sent).
    /// - Otherwise the same as [`Self::list_products`].
    pub async fn submit_contact(
        &self,
        auth: &AuthContext,
        request: &ContactRequest,
    ) -> Result<String, ClientError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields { fields: missing });
        }

        let url = self.endpoint(&["api", "v1", "contact"], &[]);
        let body = self.post_json(auth, url, request).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(CONTACT_THANKS)
            .to_owned())
    }

    /// `GET /api/v1/orders/track/{order_number}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingFields`] if `order_number` is blank.
    /// - Otherwise the same as [`Self::list_products`].
    pub async fn track_order(
        &self,
        auth: &AuthContext,
        order_number: &str,
    ) -> Result<OrderTracking, ClientError> {
        let order_number = order_number.trim();
        if order_number.is_empty() {
            return Err(ClientError::MissingFields {
                fields: vec!["order_number"],
            });
        }

        let url = self.endpoint(&["api", "v1", "orders", "track", order_number], &[]);
        let body = self.get_json(auth, url).await?;
        Ok(normalize_order_tracking(&unwrap_record(&body)))
    }

    pub(super) async fn fetch_list<T>(
        &self,
        auth: &AuthContext,
        url: reqwest::Url,
        normalize: impl Fn(&Value) -> T,
    ) -> Result<Vec<T>, ClientError> {
        let body = self.get_json(auth, url).await?;
        Ok(unwrap_records(&body).iter().map(normalize).collect())
    }
}

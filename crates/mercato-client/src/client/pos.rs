//! Point-of-sale endpoints under `/api/v1/pos/`.

use mercato_core::Product;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::envelope::Page;
use crate::error::ClientError;
use crate::normalize::normalize_product;

use super::MercatoClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosResource {
    Products,
    Orders,
    Payments,
    Inventory,
    Reports,
    Customers,
}

impl PosResource {
    pub const ALL: [PosResource; 6] = [
        PosResource::Products,
        PosResource::Orders,
        PosResource::Payments,
        PosResource::Inventory,
        PosResource::Reports,
        PosResource::Customers,
    ];

    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            PosResource::Products => "products",
            PosResource::Orders => "orders",
            PosResource::Payments => "payments",
            PosResource::Inventory => "inventory",
            PosResource::Reports => "reports",
            PosResource::Customers => "customers",
        }
    }
}

impl std::fmt::Display for PosResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl MercatoClient {
    /// Raw records of one POS resource. Only the envelope is unwrapped;
    /// records are returned as the backend sent them.
    ///
    /// # Errors
    ///
    /// Same as [`MercatoClient::list_products`].
    pub async fn list_pos_records(
        &self,
        auth: &AuthContext,
        resource: PosResource,
        page: u32,
    ) -> Result<Page<Value>, ClientError> {
        let url = self.endpoint(
            &["api", "v1", "pos", resource.path_segment()],
            &[("page", page.max(1).to_string())],
        );
        let body = self.get_json(auth, url).await?;
        Ok(Page::from_body(&body, Value::clone))
    }

    /// POS product grid, normalized like the storefront catalogue.
    ///
    /// # Errors
    ///
    /// Same as [`MercatoClient::list_products`].
    pub async fn list_pos_products(
        &self,
        auth: &AuthContext,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<Product>, ClientError> {
        let mut query = vec![("page", page.max(1).to_string())];
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.to_owned()));
        }
        let url = self.endpoint(&["api", "v1", "pos", "products"], &query);
        let body = self.get_json(auth, url).await?;
        Ok(Page::from_body(&body, normalize_product))
    }
}

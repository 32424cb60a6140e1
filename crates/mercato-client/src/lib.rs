pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod fetch_cycle;
pub mod form;
pub mod normalize;
mod parse_helpers;

pub use auth::{AuthContext, MemoryTokenStore, TokenStore};
pub use client::{MercatoClient, PosResource, ProductQuery};
pub use envelope::{extract_page_info, unwrap_record, unwrap_records, Page, PageInfo};
pub use error::ClientError;
pub use fetch_cycle::{FetchCycle, FetchOutcome, ListState, LoadStatus};
pub use form::{ContactRequest, FormSubmission, SubmissionState};
pub use normalize::{normalize_category, normalize_product, normalize_vendor};

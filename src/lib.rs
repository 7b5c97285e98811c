pub mod common;
pub mod endpoints;
pub mod infra;
pub mod logging;
pub mod scraper;

// Re-export the types most callers need at the crate root
pub use common::error::{Result, ScraperError};
pub use common::storefront::StoreFront;
pub use common::types::{AppId, AppRecord, Query};
pub use scraper::AppStoreScraper;

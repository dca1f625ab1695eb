//! Query modules for the crawler.
//!
//! Each module provides a query struct that borrows the client's
//! [`CrawlConfig`](crate::config::CrawlConfig) and exposes one async listing
//! operation. A fresh [`Session`](crate::session::Session) is acquired per
//! call and released when the call returns.

pub mod catalog;
pub mod games;

pub use catalog::{CatalogQuery, SearchCatalogParams};
pub use games::GameQuery;

//! src/routes/admin/documents/mod.rs
//!
//! Generic document browser over the backend collections.

mod get;
mod post;

pub use get::*;
pub use post::*;

use crate::domain::CollectionName;

const DOCUMENTS_PAGE: &str = "/admin/documents";

/// Browser location showing `collection`.
fn collection_page(collection: &CollectionName) -> String {
    format!(
        "{}?collection={}",
        DOCUMENTS_PAGE,
        urlencoding::encode(collection.as_ref())
    )
}

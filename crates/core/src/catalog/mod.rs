//! Model catalog - classified entries plus the active filter.
//!
//! A catalog is loaded whole from a [`CatalogDocument`], classified once, and
//! then only read. Filtering changes which entries are visible, never the
//! entries themselves.

mod source;
mod store;
mod types;

pub use source::CatalogDocument;
pub use store::CatalogStore;
pub use types::*;

pub mod filters;
pub mod models;
pub mod repositories;
pub mod store;
pub mod test_utils;

pub use store::{FileStore, MemoryStore, Store, StoreError};

/// Opens the on-disk store at the configured `STORE_PATH`.
pub fn connect() -> Result<FileStore, StoreError> {
    let root = util::paths::store_root();
    tracing::info!(path = %root.display(), "Opening ticket store");
    FileStore::open(root)
}

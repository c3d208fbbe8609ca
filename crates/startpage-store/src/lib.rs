// SQLite-backed key/value persistence layer
// One serialized text value per key, rewritten wholesale on every save

pub mod store;

pub use store::{Store, StoreError};

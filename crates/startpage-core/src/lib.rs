// Core business logic lives here - the brain of the start page
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod keys;
pub mod lists;
pub mod models;
pub mod session;

pub use config::Config;
pub use debounce::Debouncer;
pub use error::Error;
pub use lists::{Bookmarks, ListStore, Todos};
pub use models::{Bookmark, TodoItem};
pub use session::PageSession;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;

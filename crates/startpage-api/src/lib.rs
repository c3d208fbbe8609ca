// Outbound HTTP lives here - currently just the daily quote
pub mod quotes;

pub use quotes::{Quote, QuoteClient, QuoteError, FALLBACK_QUOTE};

//! Input parsing, normalization and cached loading.

mod cache;
mod loader;
mod normalize;
mod parser;
mod source;

pub use cache::{CachePolicy, TableCache};
pub use loader::{LoadOutcome, Loader};
pub use normalize::normalize_headers;
pub use parser::Parser;
pub use source::{DataTable, SourceMetadata};

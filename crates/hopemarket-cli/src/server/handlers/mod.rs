//! Request handlers.

mod dashboard;
mod download;
mod page;

pub use dashboard::*;
pub use download::*;
pub use page::*;

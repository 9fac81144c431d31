//! Collaborator contracts consumed by the analytics engine.

mod market_index_source;
mod news_source;
mod price_history_source;
mod snapshot_store;

pub use market_index_source::*;
pub use news_source::*;
pub use price_history_source::*;
pub use snapshot_store::*;

//! Data models for portfolio analytics.

mod forecast;
mod frontier;
mod holding;
mod market;
mod news;
mod price;
mod statistics;

pub use forecast::*;
pub use frontier::*;
pub use holding::*;
pub use market::*;
pub use news::*;
pub use price::*;
pub use statistics::*;

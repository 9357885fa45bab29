mod cached;
mod expired;
pub mod limit;
pub mod parse;

pub use cached::{load_cached, store_error};
pub use expired::SessionExpired;

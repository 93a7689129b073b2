//! Read-through cache policy for Stratus.
//!
//! Every cached HTTP domain (tag inventory, costs, advisor) goes through
//! the same sequence: look up a stored row, serve it if it is younger than
//! the domain's expiration window, otherwise fetch from AWS, write back,
//! and serve the fresh payload.

pub mod policy;
pub mod windows;

pub use policy::{CacheSlot, ReadThrough, Source};

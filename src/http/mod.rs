//! Rate-limited request dispatch against the configured API endpoint.
mod headers;
mod rate;
mod world;


pub use world::{RawResponse, RequestOptions, World};

pub(crate) use headers::merge_headers;
pub(crate) use rate::RateGate;

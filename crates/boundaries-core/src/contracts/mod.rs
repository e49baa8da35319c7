//! API contracts shared with the HTTP layer.
//!
//! `api` holds the serialized projections of domain entities; `http` holds
//! the route prefixes they link to. Keep both free of framework types.

pub mod api;
pub mod http;

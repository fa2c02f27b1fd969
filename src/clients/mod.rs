//! Client types for the Open Targets Platform GraphQL API.
//!
//! The central type is [`OpenTargetsClient`], a cached, retrying GraphQL
//! client. Its error taxonomy lives in [`GraphqlError`], [`NetworkError`],
//! and [`RequestFailure`].

mod cache;
mod client;
mod errors;

pub use client::OpenTargetsClient;
pub use errors::{GraphqlError, NetworkError, RequestFailure};

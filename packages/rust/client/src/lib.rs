//! Client for the Awesauce multi-tenant content API.
//!
//! This crate provides:
//! - [`CmsClient`] — site, posts, post, and feedback operations
//! - [`ConfigStore`] / [`ConfigUpdate`] — merge-on-write session configuration
//! - [`Transport`] — the injected HTTP capability, with [`ReqwestTransport`] as default
//! - [`query`] — per-endpoint query parameters and their encoding

pub mod client;
pub mod query;
pub mod store;
pub mod transport;

pub use client::{CmsClient, DEFAULT_POSTS_LIMIT, PostsQuery};
pub use store::{ClientConfig, ConfigStore, ConfigUpdate};
pub use transport::{Method, ReqwestTransport, Transport, TransportRequest, TransportResponse};

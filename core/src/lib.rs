//! Blocking client for a RabbitMQ-style broker's HTTP management API.
//!
//! # Overview
//! Configure connection parameters once, then issue list/get/create/delete
//! operations against vhosts, exchanges, queues, bindings, connections,
//! channels, consumers, nodes, the cluster name and definitions without
//! hand-building HTTP requests.
//!
//! # Design
//! - `ManagementClient` is immutable after construction and holds no
//!   per-call state; share one instance across threads.
//! - Every call is one request/response exchange: `build_request` (pure)
//!   followed by a `Transport` round-trip. No retries.
//! - Responses are returned as raw strings. Typed request bodies live in
//!   `types` and are serialized by the resource handles.
//! - By default only `200 OK` counts as success; see `StatusPolicy`.
//! - The crate emits `tracing` events but never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::ManagementClient;
pub use config::{ClientConfig, ConfigBag, StatusPolicy, DEFAULT_TIMEOUT};
pub use error::{ApiError, BoxError};
pub use http::{compose_url, encode_segment, HttpMethod, HttpRequest, HttpResponse};
pub use query::{build_pagination_query, Pagination};
pub use transport::{Transport, UreqTransport};
pub use types::{BindingOptions, ExchangeOptions, GetMessages, PublishMessage, QueueOptions};
pub use validate::{validate_required, validate_required_all};

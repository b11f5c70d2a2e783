//! Authenticated request execution against the management API.
//!
//! # Design
//! `ManagementClient` owns an immutable `ClientConfig` and one `Transport`,
//! and keeps no mutable state between calls, so one client can be shared
//! across threads. A call is split the way the rest of the crate is: the
//! pure `build_request` composes URL, headers and payload, then `execute`
//! hands the request to the transport and applies the status policy.
//! Payloads stay opaque strings; typed bodies are serialized at the call
//! site by the resource handles.

use base64::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::resources::{
    Bindings, Channels, Cluster, Connections, Consumers, Definitions, Exchanges, Nodes, Queues,
    Vhosts,
};
use crate::transport::{Transport, UreqTransport};

/// Blocking client for the broker's HTTP management API.
#[derive(Debug, Clone)]
pub struct ManagementClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ManagementClient<UreqTransport> {
    /// Build a client whose `ureq` agent uses the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }

    /// Validate a JSON configuration object and build a client from it.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        ClientConfig::from_json(json).map(ManagementClient::new)
    }
}

impl<T: Transport> ManagementClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a request without sending it.
    ///
    /// `Content-Type: application/json` and Basic authentication are always
    /// set. An empty `body` is treated as no body.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<&str>) -> HttpRequest {
        let credentials = format!("{}:{}", self.config.username(), self.config.password());
        HttpRequest {
            method,
            url: self.config.url(path),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (
                    "authorization".to_string(),
                    format!("Basic {}", BASE64_STANDARD.encode(credentials)),
                ),
            ],
            body: body.filter(|b| !b.is_empty()).map(str::to_string),
        }
    }

    /// Send one request and return the raw response body.
    ///
    /// A status rejected by the configured `StatusPolicy` yields
    /// `ApiError::HttpError` and the body is dropped. No retry is attempted.
    pub fn execute(&self, method: HttpMethod, path: &str, body: Option<&str>) -> Result<String, ApiError> {
        let request = self.build_request(method, path, body);
        debug!(%method, url = %request.url, has_body = request.body.is_some(), "sending request");

        let response = self.transport.send(request)?;
        debug!(%method, path, status = response.status, "received response");

        if !self.config.status_policy().accepts(response.status) {
            warn!(%method, path, status = response.status, "request rejected by status policy");
            return Err(ApiError::http_status(response.status));
        }
        Ok(response.body)
    }

    pub fn get(&self, path: &str) -> Result<String, ApiError> {
        self.execute(HttpMethod::Get, path, None)
    }

    pub fn put(&self, path: &str, body: &str) -> Result<String, ApiError> {
        self.execute(HttpMethod::Put, path, Some(body))
    }

    pub fn patch(&self, path: &str, body: &str) -> Result<String, ApiError> {
        self.execute(HttpMethod::Patch, path, Some(body))
    }

    pub fn post(&self, path: &str, body: &str) -> Result<String, ApiError> {
        self.execute(HttpMethod::Post, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<String, ApiError> {
        self.execute(HttpMethod::Delete, path, None)
    }

    /// Serialize `body` to JSON, then PUT it.
    pub fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let body = to_json(body)?;
        self.put(path, &body)
    }

    /// Serialize `body` to JSON, then POST it.
    pub fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let body = to_json(body)?;
        self.post(path, &body)
    }

    pub fn vhosts(&self) -> Vhosts<'_, T> {
        Vhosts::new(self)
    }

    pub fn exchanges(&self) -> Exchanges<'_, T> {
        Exchanges::new(self)
    }

    pub fn queues(&self) -> Queues<'_, T> {
        Queues::new(self)
    }

    pub fn bindings(&self) -> Bindings<'_, T> {
        Bindings::new(self)
    }

    pub fn connections(&self) -> Connections<'_, T> {
        Connections::new(self)
    }

    pub fn channels(&self) -> Channels<'_, T> {
        Channels::new(self)
    }

    pub fn consumers(&self) -> Consumers<'_, T> {
        Consumers::new(self)
    }

    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(self)
    }

    pub fn cluster(&self) -> Cluster<'_, T> {
        Cluster::new(self)
    }

    pub fn definitions(&self) -> Definitions<'_, T> {
        Definitions::new(self)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))
}

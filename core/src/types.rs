//! Typed request bodies for the resource handles.
//!
//! These serialize to the JSON objects the management API expects. Responses
//! are not modelled here; they come back as raw strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Optional arguments map (`x-message-ttl`, `alternate-exchange`, ...).
pub type Arguments = BTreeMap<String, serde_json::Value>;

/// Body for declaring a queue. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: Arguments,
}

/// Body for declaring an exchange, apart from its type which is a required
/// parameter of `Exchanges::create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExchangeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: Arguments,
}

#[derive(Serialize)]
pub(crate) struct ExchangeDeclaration<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    #[serde(flatten)]
    pub options: &'a ExchangeOptions,
}

/// Body for creating a binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BindingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: Arguments,
}

/// A message published through an exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishMessage {
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
    pub routing_key: String,
    pub payload: String,
    /// `string` or `base64`.
    pub payload_encoding: String,
}

/// Parameters for fetching messages from a queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetMessages {
    pub count: u32,
    /// `ack_requeue_true`, `ack_requeue_false`, `reject_requeue_true` or
    /// `reject_requeue_false`.
    pub ackmode: String,
    /// `auto` or `base64`.
    pub encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<u64>,
}

#[derive(Serialize)]
pub(crate) struct QueueAction<'a> {
    pub action: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ClusterName<'a> {
    pub name: &'a str,
}

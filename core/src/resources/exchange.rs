use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::query::Pagination;
use crate::transport::Transport;
use crate::types::{ExchangeDeclaration, ExchangeOptions, PublishMessage};
use crate::validate::{validate_required, validate_required_all};

/// Exchanges, and the messages published through them.
pub struct Exchanges<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Exchanges<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/exchanges")
    }

    pub fn list_paged(&self, pagination: &Pagination) -> Result<String, ApiError> {
        let query = pagination.to_query()?;
        self.client.get(&format!("/api/exchanges{query}"))
    }

    pub fn list_in_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.get(&format!("/api/exchanges/{}", encode_segment(vhost)))
    }

    pub fn get(&self, vhost: &str, exchange: &str) -> Result<String, ApiError> {
        self.client.get(&exchange_path(vhost, exchange)?)
    }

    /// Declare an exchange of `exchange_type` (`direct`, `topic`, ...).
    pub fn create(
        &self,
        vhost: &str,
        exchange: &str,
        exchange_type: &str,
        options: &ExchangeOptions,
    ) -> Result<String, ApiError> {
        validate_required_all(&[
            ("vhost", vhost),
            ("exchange", exchange),
            ("exchange type", exchange_type),
        ])?;
        let body = ExchangeDeclaration {
            kind: exchange_type,
            options,
        };
        self.client.put_json(&exchange_path(vhost, exchange)?, &body)
    }

    pub fn delete(&self, vhost: &str, exchange: &str) -> Result<String, ApiError> {
        self.client.delete(&exchange_path(vhost, exchange)?)
    }

    /// Bindings in which this exchange is the source.
    pub fn bindings_as_source(&self, vhost: &str, exchange: &str) -> Result<String, ApiError> {
        let path = exchange_path(vhost, exchange)?;
        self.client.get(&format!("{path}/bindings/source"))
    }

    /// Bindings in which this exchange is the destination.
    pub fn bindings_as_destination(&self, vhost: &str, exchange: &str) -> Result<String, ApiError> {
        let path = exchange_path(vhost, exchange)?;
        self.client.get(&format!("{path}/bindings/destination"))
    }

    /// Publish a message. Routing key, payload and payload encoding are
    /// required.
    pub fn publish(
        &self,
        vhost: &str,
        exchange: &str,
        message: &PublishMessage,
    ) -> Result<String, ApiError> {
        let path = exchange_path(vhost, exchange)?;
        validate_required_all(&[
            ("routing_key", message.routing_key.as_str()),
            ("payload", message.payload.as_str()),
            ("payload_encoding", message.payload_encoding.as_str()),
        ])?;
        self.client.post_json(&format!("{path}/publish"), message)
    }
}

fn exchange_path(vhost: &str, exchange: &str) -> Result<String, ApiError> {
    validate_required_all(&[("vhost", vhost), ("exchange", exchange)])?;
    Ok(format!(
        "/api/exchanges/{}/{}",
        encode_segment(vhost),
        encode_segment(exchange)
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::client::tests::client;
    use crate::http::HttpMethod;

    #[test]
    fn create_sends_type_with_options() {
        let c = client(200, "");
        let options = ExchangeOptions {
            durable: Some(true),
            ..ExchangeOptions::default()
        };
        c.exchanges().create("/", "amq.orders", "topic", &options).unwrap();

        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:15672/api/exchanges/%2F/amq.orders");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["type"], "topic");
        assert_eq!(body["durable"], true);
    }

    #[test]
    fn create_requires_exchange_type() {
        let err = client(200, "")
            .exchanges()
            .create("/", "x", "", &ExchangeOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing exchange type parameter");
    }

    #[test]
    fn binding_listings() {
        let c = client(200, "[]");
        c.exchanges().bindings_as_source("v", "e").unwrap();
        assert_eq!(
            c.transport().last().url,
            "http://localhost:15672/api/exchanges/v/e/bindings/source"
        );
        c.exchanges().bindings_as_destination("v", "e").unwrap();
        assert_eq!(
            c.transport().last().url,
            "http://localhost:15672/api/exchanges/v/e/bindings/destination"
        );
    }

    #[test]
    fn publish_posts_message() {
        let c = client(200, r#"{"routed":true}"#);
        let message = PublishMessage {
            properties: BTreeMap::new(),
            routing_key: "orders.new".to_string(),
            payload: "hello".to_string(),
            payload_encoding: "string".to_string(),
        };
        assert_eq!(c.exchanges().publish("/", "amq.default", &message).unwrap(), r#"{"routed":true}"#);
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:15672/api/exchanges/%2F/amq.default/publish");
    }

    #[test]
    fn publish_requires_payload() {
        let message = PublishMessage {
            properties: BTreeMap::new(),
            routing_key: "rk".to_string(),
            payload: String::new(),
            payload_encoding: "string".to_string(),
        };
        let err = client(200, "").exchanges().publish("/", "e", &message).unwrap_err();
        assert_eq!(err.to_string(), "missing payload parameter");
    }

    #[test]
    fn missing_exchange_is_rejected() {
        let err = client(200, "").exchanges().get("/", "").unwrap_err();
        assert_eq!(err.to_string(), "missing exchange parameter");
    }
}

use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::types::BindingOptions;
use crate::validate::{validate_required, validate_required_all};

/// Bindings from an exchange to a queue or to another exchange.
///
/// `props` is the `properties_key` field of a binding listing: the
/// binding's routing key combined with a hash of its arguments.
pub struct Bindings<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Bindings<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/bindings")
    }

    pub fn list_in_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.get(&format!("/api/bindings/{}", encode_segment(vhost)))
    }

    pub fn list_to_queue(&self, vhost: &str, exchange: &str, queue: &str) -> Result<String, ApiError> {
        self.client.get(&to_queue_path(vhost, exchange, queue)?)
    }

    /// Bind `queue` to `exchange`. The broker answers with a `Location`
    /// header naming the new binding.
    pub fn create_to_queue(
        &self,
        vhost: &str,
        exchange: &str,
        queue: &str,
        options: &BindingOptions,
    ) -> Result<String, ApiError> {
        self.client
            .post_json(&to_queue_path(vhost, exchange, queue)?, options)
    }

    pub fn get_to_queue(
        &self,
        vhost: &str,
        exchange: &str,
        queue: &str,
        props: &str,
    ) -> Result<String, ApiError> {
        let path = to_queue_path(vhost, exchange, queue)?;
        validate_required(props, "props")?;
        self.client.get(&format!("{path}/{}", encode_segment(props)))
    }

    pub fn delete_to_queue(
        &self,
        vhost: &str,
        exchange: &str,
        queue: &str,
        props: &str,
    ) -> Result<String, ApiError> {
        let path = to_queue_path(vhost, exchange, queue)?;
        validate_required(props, "props")?;
        self.client.delete(&format!("{path}/{}", encode_segment(props)))
    }

    pub fn list_between(&self, vhost: &str, source: &str, destination: &str) -> Result<String, ApiError> {
        self.client.get(&between_path(vhost, source, destination)?)
    }

    pub fn create_between(
        &self,
        vhost: &str,
        source: &str,
        destination: &str,
        options: &BindingOptions,
    ) -> Result<String, ApiError> {
        self.client
            .post_json(&between_path(vhost, source, destination)?, options)
    }

    pub fn get_between(
        &self,
        vhost: &str,
        source: &str,
        destination: &str,
        props: &str,
    ) -> Result<String, ApiError> {
        let path = between_path(vhost, source, destination)?;
        validate_required(props, "props")?;
        self.client.get(&format!("{path}/{}", encode_segment(props)))
    }

    pub fn delete_between(
        &self,
        vhost: &str,
        source: &str,
        destination: &str,
        props: &str,
    ) -> Result<String, ApiError> {
        let path = between_path(vhost, source, destination)?;
        validate_required(props, "props")?;
        self.client.delete(&format!("{path}/{}", encode_segment(props)))
    }
}

fn to_queue_path(vhost: &str, exchange: &str, queue: &str) -> Result<String, ApiError> {
    validate_required_all(&[("vhost", vhost), ("exchange", exchange), ("queue", queue)])?;
    Ok(format!(
        "/api/bindings/{}/e/{}/q/{}",
        encode_segment(vhost),
        encode_segment(exchange),
        encode_segment(queue)
    ))
}

fn between_path(vhost: &str, source: &str, destination: &str) -> Result<String, ApiError> {
    validate_required_all(&[
        ("vhost", vhost),
        ("source", source),
        ("destination", destination),
    ])?;
    Ok(format!(
        "/api/bindings/{}/e/{}/e/{}",
        encode_segment(vhost),
        encode_segment(source),
        encode_segment(destination)
    ))
}

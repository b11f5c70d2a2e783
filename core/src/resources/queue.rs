use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::query::Pagination;
use crate::transport::Transport;
use crate::types::{GetMessages, QueueAction, QueueOptions};
use crate::validate::{validate_required, validate_required_all};

/// Queues and their contents.
pub struct Queues<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Queues<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/queues")
    }

    pub fn list_paged(&self, pagination: &Pagination) -> Result<String, ApiError> {
        let query = pagination.to_query()?;
        self.client.get(&format!("/api/queues{query}"))
    }

    pub fn list_in_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.get(&format!("/api/queues/{}", encode_segment(vhost)))
    }

    pub fn get(&self, vhost: &str, queue: &str) -> Result<String, ApiError> {
        self.client.get(&queue_path(vhost, queue)?)
    }

    pub fn create(&self, vhost: &str, queue: &str, options: &QueueOptions) -> Result<String, ApiError> {
        self.client.put_json(&queue_path(vhost, queue)?, options)
    }

    pub fn delete(&self, vhost: &str, queue: &str) -> Result<String, ApiError> {
        self.client.delete(&queue_path(vhost, queue)?)
    }

    pub fn bindings(&self, vhost: &str, queue: &str) -> Result<String, ApiError> {
        let path = queue_path(vhost, queue)?;
        self.client.get(&format!("{path}/bindings"))
    }

    /// Drop every ready message in the queue.
    pub fn purge(&self, vhost: &str, queue: &str) -> Result<String, ApiError> {
        let path = queue_path(vhost, queue)?;
        self.client.delete(&format!("{path}/contents"))
    }

    /// Trigger a queue action such as `sync` or `cancel_sync`.
    pub fn set_action(&self, vhost: &str, queue: &str, action: &str) -> Result<String, ApiError> {
        let path = queue_path(vhost, queue)?;
        validate_required(action, "action")?;
        self.client
            .post_json(&format!("{path}/actions"), &QueueAction { action })
    }

    /// Fetch messages. Not a read-only operation: the ack mode decides
    /// whether they are requeued.
    pub fn get_messages(
        &self,
        vhost: &str,
        queue: &str,
        request: &GetMessages,
    ) -> Result<String, ApiError> {
        let path = queue_path(vhost, queue)?;
        validate_required_all(&[
            ("ackmode", request.ackmode.as_str()),
            ("encoding", request.encoding.as_str()),
        ])?;
        self.client.post_json(&format!("{path}/get"), request)
    }
}

fn queue_path(vhost: &str, queue: &str) -> Result<String, ApiError> {
    validate_required_all(&[("vhost", vhost), ("queue", queue)])?;
    Ok(format!(
        "/api/queues/{}/{}",
        encode_segment(vhost),
        encode_segment(queue)
    ))
}

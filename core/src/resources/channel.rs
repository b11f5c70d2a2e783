use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::validate::validate_required;

/// Channels open on client connections.
pub struct Channels<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Channels<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/channels")
    }

    pub fn get(&self, channel: &str) -> Result<String, ApiError> {
        validate_required(channel, "channel")?;
        self.client
            .get(&format!("/api/channels/{}", encode_segment(channel)))
    }

    pub fn list_in_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client
            .get(&format!("/api/vhosts/{}/channels", encode_segment(vhost)))
    }

    pub fn list_for_connection(&self, connection: &str) -> Result<String, ApiError> {
        validate_required(connection, "connection")?;
        self.client
            .get(&format!("/api/connections/{}/channels", encode_segment(connection)))
    }
}

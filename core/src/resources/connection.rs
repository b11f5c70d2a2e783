use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::validate::validate_required;

/// Client connections to the broker.
pub struct Connections<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Connections<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/connections")
    }

    pub fn get(&self, connection: &str) -> Result<String, ApiError> {
        validate_required(connection, "connection")?;
        self.client
            .get(&format!("/api/connections/{}", encode_segment(connection)))
    }

    /// Force the connection closed.
    pub fn close(&self, connection: &str) -> Result<String, ApiError> {
        validate_required(connection, "connection")?;
        self.client
            .delete(&format!("/api/connections/{}", encode_segment(connection)))
    }
}

use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::validate::validate_required;

/// Cluster nodes.
pub struct Nodes<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Nodes<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/nodes")
    }

    pub fn get(&self, node: &str) -> Result<String, ApiError> {
        validate_required(node, "node")?;
        self.client.get(&format!("/api/nodes/{}", encode_segment(node)))
    }
}

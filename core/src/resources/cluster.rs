use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::ClusterName;
use crate::validate::validate_required;

/// The cluster's identity.
pub struct Cluster<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Cluster<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn name(&self) -> Result<String, ApiError> {
        self.client.get("/api/cluster-name")
    }

    pub fn set_name(&self, name: &str) -> Result<String, ApiError> {
        validate_required(name, "cluster name")?;
        self.client.put_json("/api/cluster-name", &ClusterName { name })
    }
}

use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::validate::validate_required;

/// Server definitions: exchanges, queues, bindings, users, vhosts,
/// permissions and parameters.
pub struct Definitions<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Definitions<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn export(&self) -> Result<String, ApiError> {
        self.client.get("/api/definitions")
    }

    /// Definitions scoped to one vhost: exchanges, queues, bindings and
    /// policies.
    pub fn export_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client
            .get(&format!("/api/definitions/{}", encode_segment(vhost)))
    }

    /// Import a definitions document, as produced by `export`. The document
    /// is sent as-is.
    pub fn import(&self, definitions: &str) -> Result<String, ApiError> {
        validate_required(definitions, "definitions")?;
        self.client.post("/api/definitions", definitions)
    }
}

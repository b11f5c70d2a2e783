use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::query::Pagination;
use crate::transport::Transport;
use crate::validate::validate_required;

/// Virtual hosts.
pub struct Vhosts<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Vhosts<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/vhosts")
    }

    pub fn list_paged(&self, pagination: &Pagination) -> Result<String, ApiError> {
        let query = pagination.to_query()?;
        self.client.get(&format!("/api/vhosts{query}"))
    }

    pub fn get(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.get(&format!("/api/vhosts/{}", encode_segment(vhost)))
    }

    /// Create the vhost. The request carries no body.
    pub fn create(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.put(&format!("/api/vhosts/{}", encode_segment(vhost)), "")
    }

    pub fn delete(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client.delete(&format!("/api/vhosts/{}", encode_segment(vhost)))
    }

    pub fn permissions(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client
            .get(&format!("/api/vhosts/{}/permissions", encode_segment(vhost)))
    }
}

use crate::client::ManagementClient;
use crate::error::ApiError;
use crate::http::encode_segment;
use crate::transport::Transport;
use crate::validate::validate_required;

pub struct Consumers<'c, T> {
    client: &'c ManagementClient<T>,
}

impl<'c, T: Transport> Consumers<'c, T> {
    pub(crate) fn new(client: &'c ManagementClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<String, ApiError> {
        self.client.get("/api/consumers")
    }

    pub fn list_in_vhost(&self, vhost: &str) -> Result<String, ApiError> {
        validate_required(vhost, "vhost")?;
        self.client
            .get(&format!("/api/consumers/{}", encode_segment(vhost)))
    }
}

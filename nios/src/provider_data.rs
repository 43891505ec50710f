//! Provider data handed to resources after provider configuration

use crate::api::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct NiosProviderData {
    pub client: Arc<Client>,
}

impl NiosProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

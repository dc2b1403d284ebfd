use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Feed, IngestError};

/// Object-storage collaborator addressed by bucket path convention over
/// HTTP. Credential vending and presigned uploads live outside this
/// service; the bucket base URL comes from configuration.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
    base_url: String,
}

impl ObjectStore {
    pub fn new(config: &Config) -> Self {
        Self {
            client: config.http_client.clone(),
            base_url: config.storage_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, IngestError> {
        let url = self.object_url(key);
        debug!(url, "Downloading object");
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IngestError::Fetch {
                feed: Feed::Ratings,
                status: None,
                message: e.to_string(),
            })?;

        if res.status() == StatusCode::NOT_FOUND {
            return Err(IngestError::Fetch {
                feed: Feed::Ratings,
                status: Some(404),
                message: format!("The requested object {key} does not exist in the bucket."),
            });
        }
        if !res.status().is_success() {
            return Err(IngestError::Fetch {
                feed: Feed::Ratings,
                status: Some(res.status().as_u16()),
                message: format!("Server response code: {}", res.status().as_u16()),
            });
        }

        let bytes = res.bytes().await.map_err(|e| IngestError::Fetch {
            feed: Feed::Ratings,
            status: None,
            message: e.to_string(),
        })?;
        info!(key, size = bytes.len(), "Object downloaded");
        Ok(bytes.to_vec())
    }

    pub async fn put(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), IngestError> {
        let url = self.object_url(key);
        debug!(url, size = body.len(), "Uploading object");
        let res = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| IngestError::Fetch {
                feed: Feed::Ratings,
                status: None,
                message: e.to_string(),
            })?;

        if !res.status().is_success() {
            return Err(IngestError::Fetch {
                feed: Feed::Ratings,
                status: Some(res.status().as_u16()),
                message: format!("Upload of {key} failed with status {}", res.status().as_u16()),
            });
        }
        info!(key, "Object uploaded");
        Ok(())
    }
}

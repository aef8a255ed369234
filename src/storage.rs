use crate::naming::StorageKey;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),
}

/// Client for a Supabase-style storage REST API scoped to one bucket.
#[derive(Clone)]
pub struct ObjectStorageClient {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl ObjectStorageClient {
    pub fn new(base_url: String, bucket: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            bucket,
            api_key,
        }
    }

    fn object_url(&self, key: &StorageKey) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            key.encoded()
        )
    }

    pub async fn upload(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut req = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .body(data);

        if let Some(ct) = content_type {
            req = req.header("Content-Type", ct);
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            return Err(StorageError::OperationFailed(format!(
                "Upload of {} failed with status: {}",
                key,
                response.status()
            )));
        }

        Ok(())
    }

    /// Removes an object. A missing object counts as removed.
    pub async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(StorageError::OperationFailed(format!(
                "Delete of {} failed with status: {}",
                key,
                response.status()
            )));
        }

        Ok(())
    }

    pub fn public_url(&self, key: &StorageKey) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            key.encoded()
        )
    }
}

use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Thumbnail dimensions baked into synthesized thumbnail URLs
pub const THUMBNAIL_WIDTH: u32 = 150;
pub const THUMBNAIL_HEIGHT: u32 = 150;

/// MinIO/S3-compatible media store.
///
/// The object key doubles as the asset's public id: everything a client
/// needs later (direct URL, thumbnail URL, deletion) is derived from it.
pub struct MediaStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    public_endpoint: String,
    thumbnail_proxy: Option<String>,
}

impl MediaStore {
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create storage bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        Ok(Self {
            bucket,
            region,
            credentials,
            public_endpoint: config.public_endpoint,
            thumbnail_proxy: config.thumbnail_proxy,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Creating an existing bucket is reported as an error by MinIO;
        // treat that case as success.
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    async fn create_bucket(&self) -> Result<(), AppError> {
        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Upload a media object; the key becomes its public id
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to upload '{}': {}", key, e))
            })?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    /// Delete a media object by its public id
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.bucket.delete_object(key).await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to delete '{}': {}", key, e))
        })?;

        debug!("Deleted '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    /// Check whether an object exists
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self.bucket.head_object(key).await {
            Ok(_) => Ok(true),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::ExternalServiceError(format!(
                        "Failed to check '{}': {}",
                        key, e
                    )))
                }
            }
        }
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Direct URL for an object, synthesized from configuration only.
    /// Never checks that the object exists.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }

    /// Thumbnail URL for an object.
    ///
    /// Routed through the resizing proxy when one is configured; otherwise
    /// falls back to the direct URL.
    pub fn thumbnail_url(&self, key: &str) -> String {
        match &self.thumbnail_proxy {
            Some(proxy) => format!(
                "{}/{}x{}/{}/{}",
                proxy,
                THUMBNAIL_WIDTH,
                THUMBNAIL_HEIGHT,
                self.bucket.name(),
                key
            ),
            None => self.object_url(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(thumbnail_proxy: Option<&str>) -> MediaStore {
        MediaStore::new(StorageConfig {
            endpoint: "http://minio:9000".to_string(),
            public_endpoint: "https://media.example.com".to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            bucket: "coursedeck-media".to_string(),
            region: "us-east-1".to_string(),
            thumbnail_proxy: thumbnail_proxy.map(|s| s.to_string()),
        })
        .unwrap()
    }

    #[test]
    fn object_url_uses_public_endpoint_and_bucket() {
        let store = store(None);
        assert_eq!(
            store.object_url("images/abc.png"),
            "https://media.example.com/coursedeck-media/images/abc.png"
        );
    }

    #[test]
    fn thumbnail_url_goes_through_proxy_when_configured() {
        let store = store(Some("https://thumbs.example.com"));
        assert_eq!(
            store.thumbnail_url("images/abc.png"),
            "https://thumbs.example.com/150x150/coursedeck-media/images/abc.png"
        );
    }

    #[test]
    fn thumbnail_url_falls_back_to_direct_url() {
        let store = store(None);
        assert_eq!(
            store.thumbnail_url("images/abc.png"),
            store.object_url("images/abc.png")
        );
    }
}

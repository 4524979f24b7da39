use super::storage_repository::StorageRepository;
use async_trait::async_trait;
use aws_sdk_s3::{
    primitives::ByteStream,
    types::{Delete, ObjectIdentifier},
    Client as S3Client,
};
use std::sync::Arc;

/// AWS S3 implementation of the storage repository.
pub struct S3StorageRepository {
    s3_client: Arc<S3Client>,
}

impl S3StorageRepository {
    pub fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl StorageRepository for S3StorageRepository {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        let result = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, bucket, key, "S3 get_object failed");
                format!("S3 error: {:?}", e)
            })?;

        let body = result
            .body
            .collect()
            .await
            .map_err(|e| format!("Failed to read object body: {}", e))?;

        Ok(body.into_bytes().to_vec())
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), String> {
        let size = body.len();
        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, bucket, key, "S3 put_object failed");
                format!("S3 error: {:?}", e)
            })?;

        tracing::debug!(bucket, key, size, "Object stored");
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, String> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        // Listings paginate; keep following the continuation token until
        // the store reports no truncation.
        loop {
            let mut request = self
                .s3_client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let page = request.send().await.map_err(|e| {
                tracing::error!(error = ?e, bucket, prefix, "S3 list_objects_v2 failed");
                format!("S3 error: {:?}", e)
            })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match page.next_continuation_token() {
                Some(token) if page.is_truncated() == Some(true) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(keys)
    }

    async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), String> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid object identifier: {}", e))?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| format!("Invalid delete request: {}", e))?;

        self.s3_client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, bucket, count = keys.len(), "S3 delete_objects failed");
                format!("S3 error: {:?}", e)
            })?;

        Ok(())
    }
}

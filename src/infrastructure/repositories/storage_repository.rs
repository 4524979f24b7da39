use async_trait::async_trait;

/// Repository for object storage operations.
/// Abstracts the backing store (S3 in production, in-memory in tests).
///
/// Implementations are responsible for:
/// - Following truncated listings until the store reports no more pages
/// - Treating keys as opaque strings; namespacing is the caller's concern
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Fetch the full body of one object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String>;

    /// Write one object, replacing any existing body.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), String>;

    /// List every key under a prefix, following truncated pages.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, String>;

    /// Delete the given keys; deleting a missing key is not an error.
    async fn delete(&self, bucket: &str, keys: &[String]) -> Result<(), String>;
}

use crate::framework::{ClientError, Resource, ResourceClient};
use crate::model::Key;
use crate::result::{OperationResult, ServerSideValidationResult};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard CRUD contract.
///
/// Implementors only provide [`inner`](DataClient::inner); every operation is
/// provided and delegates to the generic [`ResourceClient`].
#[async_trait]
pub trait DataClient<T: Resource>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn count(&self) -> Result<u64, ClientError> {
        self.inner().count().await
    }

    #[tracing::instrument(skip(self, item), fields(resource = T::resource_name()))]
    async fn create(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        self.inner().create(item).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn get_all(&self) -> Result<Option<Vec<T>>, ClientError> {
        self.inner().get_all().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn get_single(&self) -> Result<Option<T>, ClientError> {
        self.inner().get_single().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn get_single_by_key(&self, key: &Key) -> Result<Option<T>, ClientError> {
        self.inner().get_single_by_key(key).await
    }

    #[tracing::instrument(skip(self, item), fields(resource = T::resource_name(), key = %item.key()))]
    async fn update(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        self.inner().update(item).await
    }

    #[tracing::instrument(skip(self, item), fields(resource = T::resource_name(), key = %item.key()))]
    async fn delete(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        self.inner().delete(item).await
    }

    #[tracing::instrument(skip(self, item), fields(resource = T::resource_name()))]
    async fn validate(&self, item: &T) -> Result<Option<ServerSideValidationResult>, ClientError> {
        self.inner().validate(item).await
    }
}

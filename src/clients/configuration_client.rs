use crate::clients::DataClient;
use crate::framework::{ClientError, Resource, ResourceClient};
use crate::model::{ConfigurationItem, ListView};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Client for configuration-style resources.
///
/// Adds [`get_all_list_view`](Self::get_all_list_view), which fetches the
/// collection already projected to [`ListView`] so displays do not transfer
/// full records.
pub struct ConfigurationClient<T: Resource = ConfigurationItem> {
    inner: ResourceClient<T>,
}

impl<T: Resource> Clone for ConfigurationClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Resource> ConfigurationClient<T> {
    pub fn new(inner: ResourceClient<T>) -> Self {
        Self { inner }
    }

    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.inner.with_cancellation(token))
    }

    /// `GET {type}/All/ListView`. Same absent/empty rules as `get_all`.
    #[instrument(skip(self), fields(resource = T::resource_name()))]
    pub async fn get_all_list_view(&self) -> Result<Option<Vec<ListView>>, ClientError> {
        debug!("Sending request");
        self.inner.fetch_collection::<ListView>(&["All", "ListView"]).await
    }
}

impl<T: Resource> DataClient<T> for ConfigurationClient<T> {
    fn inner(&self) -> &ResourceClient<T> {
        &self.inner
    }
}

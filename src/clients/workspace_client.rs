use crate::clients::DataClient;
use crate::framework::{ClientError, ResourceClient};
use crate::model::{Key, PagedList, Workspace};
use crate::query::{FilterDefinition, QueryDefinition, SortDefinition};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Client for the Workspace collection.
#[derive(Clone)]
pub struct WorkspaceClient {
    inner: ResourceClient<Workspace>,
}

impl WorkspaceClient {
    pub fn new(inner: ResourceClient<Workspace>) -> Self {
        Self { inner }
    }

    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.inner.with_cancellation(token))
    }

    /// Workspaces owned by `owner_id`, by name, filtered locally.
    #[instrument(skip(self))]
    pub async fn owned_by(
        &self,
        owner_id: &Key,
        skip: usize,
        take: usize,
    ) -> Result<Option<PagedList<Workspace>>, ClientError> {
        debug!("Sending request");
        let query = QueryDefinition::new()
            .filter(FilterDefinition::equals("ownerId", owner_id.as_text()))
            .sort(SortDefinition::ascending("name"))
            .skip(skip)
            .take(take);
        self.inner.query(&query).await
    }
}

impl DataClient<Workspace> for WorkspaceClient {
    fn inner(&self) -> &ResourceClient<Workspace> {
        &self.inner
    }
}

use std::sync::Arc;

use tracing::info;

use crate::clients::{ConfigurationClient, WorkspaceClient};
use crate::framework::{HttpTransport, ReqwestTransport, ResourceClient, TransportError};
use crate::runtime::ClientSettings;

/// Wires one shared transport into every concrete client.
///
/// ```ignore
/// let access = DataAccess::connect(&ClientSettings::from_env()?)?;
/// let items = access.configuration.get_all_list_view().await?;
/// ```
#[derive(Clone)]
pub struct DataAccess {
    pub configuration: ConfigurationClient,
    pub workspaces: WorkspaceClient,
    transport: Arc<dyn HttpTransport>,
}

impl DataAccess {
    /// Builds the reqwest transport from `settings` and hands it to every client.
    pub fn connect(settings: &ClientSettings) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(settings)?;
        info!(base = %settings.base_address, "Connecting data access layer");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Uses an existing transport, such as a [`MockTransport`](crate::framework::mock::MockTransport).
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            configuration: ConfigurationClient::new(ResourceClient::new(transport.clone())),
            workspaces: WorkspaceClient::new(ResourceClient::new(transport.clone())),
            transport,
        }
    }

    /// A client for any other resource type, sharing the same transport.
    pub fn client<T: crate::framework::Resource>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.transport.clone())
    }
}

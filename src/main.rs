//! # Remote CRUD demo
//!
//! Runs a local query over sample records, then talks to the configured
//! service:
//!
//! 1. Reads [`ClientSettings`] from the environment.
//! 2. Counts and lists configuration items.
//! 3. Creates one item and validates it.
//!
//! Remote calls against an unreachable service log a warning and report
//! absent results rather than failing the demo.

use remote_crud::clients::DataClient;
use remote_crud::model::{ConfigurationItem, Key};
use remote_crud::query::{FilterDefinition, QueryDefinition, SortDefinition};
use remote_crud::runtime::{setup_tracing, ClientSettings, DataAccess};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = ClientSettings::from_env().map_err(|e| e.to_string())?;
    info!(base = %settings.base_address, "Starting demo");

    // Local query
    let samples: Vec<ConfigurationItem> = [("Theme", "dark"), ("Locale", "en-GB"), ("Timezone", "UTC")]
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let mut item = ConfigurationItem::new(name, value);
            item.key = Key::Int(i as i64 + 1);
            item
        })
        .collect();
    let query = QueryDefinition::new()
        .filter(FilterDefinition::contains("name", "e"))
        .sort(SortDefinition::ascending("name"))
        .take(2);
    let page = query.apply_paged(samples).map_err(|e| e.to_string())?;
    for item in &page.data_objects {
        info!(key = %item.key, name = %item.audit.name, "Matched");
    }
    info!(total = page.total_records, "Local query done");

    // Remote calls
    let access = DataAccess::connect(&settings).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("configuration");
    async {
        let count = access.configuration.count().await.map_err(|e| e.to_string())?;
        info!(count, "Configuration items on server");

        match access
            .configuration
            .get_all_list_view()
            .await
            .map_err(|e| e.to_string())?
        {
            Some(views) => {
                for view in views {
                    info!(id = %view.id(), name = view.name(), "Listed");
                }
            }
            None => info!("List view unavailable"),
        }

        let draft = ConfigurationItem::new("Demo", "created by remote-crud");
        let created = access.configuration.create(&draft).await.map_err(|e| e.to_string())?;
        info!(status = %created.status_code, success = created.is_success(), "Create finished");

        if let Some(report) = access
            .configuration
            .validate(&draft)
            .await
            .map_err(|e| e.to_string())?
        {
            for error in report.errors() {
                info!(property = %error.property_name, message = %error.error_message, "Validation error");
            }
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    info!("Demo complete");
    Ok(())
}

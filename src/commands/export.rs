use std::path::PathBuf;

use crate::client::AdminClient;
use crate::config::Config;
use crate::console::FilterCriteria;
use crate::error::{AdminError, Result};
use crate::output;
use crate::types::EventId;

pub async fn csv(
    client: AdminClient,
    config: &Config,
    event: Option<EventId>,
    out: Option<PathBuf>,
) -> Result<()> {
    let dir = config.resolve_export_dir(out);
    let filters = FilterCriteria {
        event,
        ..Default::default()
    };
    let mut console = super::console(client, false).with_query(filters, 1);

    let path = console
        .export_filtered(&dir)
        .await
        .ok_or(AdminError::Reported)?;
    output::print_message(&path.display().to_string());
    Ok(())
}

pub async fn all(client: AdminClient, config: &Config, out: Option<PathBuf>) -> Result<()> {
    let dir = config.resolve_export_dir(out);
    let mut console = super::console(client, false);

    let path = console.export_all(&dir).await.ok_or(AdminError::Reported)?;
    output::print_message(&path.display().to_string());
    Ok(())
}

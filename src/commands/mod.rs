pub mod assign_sprint_cmd;
pub mod base_commands;
pub mod cleanup_badges_cmd;
pub mod complete_sprint_cmd;
pub mod create_sprint_cmd;
pub mod delete_sprint_cmd;
pub mod export_backlog_cmd;
pub mod report_format;
pub mod sprint_report_cmd;
pub mod sync_stories_cmd;

use crate::services::access::Role;
use crate::services::entity_store::StoreError;
use crate::services::http_store::{AuthData, HttpStoreClient, StoreConfig};

/// Shared setup for every subcommand: config file, env credentials, client.
pub(crate) fn open_store(config_path: &str) -> Result<(HttpStoreClient, Role), StoreError> {
    let config = StoreConfig::from_yaml_file(config_path)?;
    let role = config.role()?;
    let auth = AuthData::from_env()?;
    let client = HttpStoreClient::new(config, auth)?;
    Ok((client, role))
}

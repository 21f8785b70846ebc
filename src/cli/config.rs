use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, SessionStore, WorkspaceRef};

/// Persisted CLI configuration: where the server is and which workspace is
/// current. Lives next to the session file under the config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub base_url: String,
    pub workspace: WorkspaceRef,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4010".to_string(),
            workspace: WorkspaceRef::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OPSDESK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("opsdesk")
}

fn config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

fn session_path() -> PathBuf {
    config_dir().join("session.yaml")
}

pub fn load() -> CliConfig {
    std::fs::read_to_string(config_path())
        .ok()
        .and_then(|raw| serde_yaml::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save(config: &CliConfig) -> anyhow::Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let raw = serde_yaml::to_string(config)?;
    std::fs::write(config_path(), raw)?;
    Ok(())
}

/// Build an API client from the saved configuration, with the session
/// persisted to disk so logins survive between invocations.
pub fn client() -> ApiClient {
    let config = load();
    let client =
        ApiClient::new(config.base_url.clone()).with_session(SessionStore::persistent(session_path()));
    client.workspace.set_current(config.workspace);
    client
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Identifiers persisted between sessions by the external sign-in flow.
/// This component only reads them; an empty session is valid and simply
/// means nobody is signed in yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user identifier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Vehicle registration ("rekisteri") attached to new reservations.
    #[serde(default)]
    pub registration: Option<String>,
}

impl Session {
    /// Load the session from its JSON file. A missing file is not an error;
    /// it yields an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No session file at {}, starting signed out", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        let session: Session = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid session file {}", path.display()))?;
        Ok(session)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }
}

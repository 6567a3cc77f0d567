use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// what the asset service grants the current user on one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub write: bool,
    pub read: bool,
    pub share: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Permissions {
    /// what a remote only asset is clamped to, whatever the service says
    pub fn read_only() -> Self {
        Permissions {
            write: false,
            read: true,
            share: false,
            expiration: None,
        }
    }
}

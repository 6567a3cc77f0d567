use ras_api::client::error::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// the permission lookup for a node failed. action resolution fails
    /// closed on this variant: no menu is produced.
    #[error("permission lookup failed: {0}")]
    Permissions(#[source] RequestError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("invalid display name: {0:?}")]
    InvalidName(String),

    #[error("{0} no longer exists on the asset store")]
    Missing(String),

    #[error("operation does not apply to this node")]
    InvalidTarget,

    #[error("action is disabled for this node")]
    Disabled,

    #[error("operation requires a local environment")]
    LocalModeOnly,

    #[error("collaborator failure: {0}")]
    Collaborator(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T = ()> = std::result::Result<T, ExplorerError>;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Result;
use crate::nodes::ExplorerNode;
use crate::state::ExplorerState;

/// effect of an externally contributed action. the closure captures
/// whatever clients its manifest was built with.
pub type CustomExe =
    Arc<dyn Fn(ExplorerNode) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// context-menu entry contributed by the environment's install manifest
/// for a given asset kind
pub struct RawAction {
    pub icon: String,
    pub name: String,
    pub applicable: bool,
    pub exe: CustomExe,
}

impl RawAction {
    pub fn new<I, N>(icon: I, name: N, exe: CustomExe) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        RawAction {
            icon: icon.into(),
            name: name.into(),
            applicable: true,
            exe,
        }
    }
}

impl std::fmt::Debug for RawAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAction")
            .field("icon", &self.icon)
            .field("name", &self.name)
            .field("applicable", &self.applicable)
            .finish_non_exhaustive()
    }
}

/// descriptor of the currently loaded environment. failures and absent
/// manifests degrade to an empty contribution; they never block the
/// native actions.
#[async_trait]
pub trait InstallManifestProvider: Send + Sync {
    async fn context_menu_actions(
        &self,
        node: &ExplorerNode,
        state: &ExplorerState,
    ) -> Result<Vec<RawAction>>;
}

/// environment without a manifest
pub struct NoManifest;

#[async_trait]
impl InstallManifestProvider for NoManifest {
    async fn context_menu_actions(
        &self,
        _node: &ExplorerNode,
        _state: &ExplorerState,
    ) -> Result<Vec<RawAction>> {
        Ok(Vec::new())
    }
}

use async_trait::async_trait;

/// the router owning the navigation tree. paths are navigable strings
/// (`/` separated, item leaves carry the `asset_` marker in their final
/// segment, see `ras_lib::path`).
#[async_trait]
pub trait Navigator: Send + Sync {
    /// re-renders the view at the given path
    async fn navigate_to(&self, path: &str);

    /// re-issues the listing backing the given path without changing the
    /// current location
    async fn refresh(&self, path: &str);

    fn current_path(&self) -> String;

    fn parent_path(&self) -> String;
}

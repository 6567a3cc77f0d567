use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use ras_api::explorer as api;
use ras_api::explorer::EntityPath;
use ras_lib::ids;
use ras_lib::path as nav_path;
use ras_lib::validation::{check_display_name, DISPLAY_NAME_MAX_CHARS};

use crate::actions::{Action, ActionCommand};
use crate::collab::apps::{NoOpeningApps, OpeningAppsResolver};
use crate::collab::favorites::{FavoritesRegistry, MemoryFavorites};
use crate::collab::installer::{InstallManifestProvider, NoManifest};
use crate::collab::nav::Navigator;
use crate::collab::ui::{
    AppOpener,
    CwdDownloads,
    DownloadSink,
    NoClipboard,
    NoOpener,
    NoPrompt,
    Prompter,
    SystemClipboard,
};
use crate::error::{ExplorerError, Result};
use crate::nodes::{ExplorerNode, ItemNode, StatusKind, TrashNode};
use crate::store::AssetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    Move,
    Borrow,
}

/// content of the clipboard slot while a cut or borrow is pending
#[derive(Debug, Clone)]
pub struct ItemCut {
    pub cut_kind: CutKind,
    pub node: ExplorerNode,
    pub origin_refresh_path: String,
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// true when the backing server runs next to this process; gates the
    /// upload action
    pub local_mode: bool,
    /// public origin used to derive shareable file urls
    pub origin: String,
}

impl std::default::Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            local_mode: false,
            origin: String::from("http://localhost"),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// owns the single clipboard slot, performs every remote mutation, and
/// requests the navigation refreshes that follow them
pub struct ExplorerState {
    store: Arc<dyn AssetStore>,
    router: Arc<dyn Navigator>,
    installer: Arc<dyn InstallManifestProvider>,
    opening_apps: Arc<dyn OpeningAppsResolver>,
    favorites: Arc<dyn FavoritesRegistry>,
    prompter: Arc<dyn Prompter>,
    clipboard: Arc<dyn SystemClipboard>,
    opener: Arc<dyn AppOpener>,
    downloads: Arc<dyn DownloadSink>,
    config: ExplorerConfig,
    item_cut: Mutex<Option<ItemCut>>,
    item_data: Mutex<HashMap<ids::ItemId, Arc<ItemNode>>>,
}

impl ExplorerState {
    pub fn builder(
        store: Arc<dyn AssetStore>,
        router: Arc<dyn Navigator>,
    ) -> ExplorerStateBuilder {
        ExplorerStateBuilder {
            store,
            router,
            installer: Arc::new(NoManifest),
            opening_apps: Arc::new(NoOpeningApps),
            favorites: Arc::new(MemoryFavorites::default()),
            prompter: Arc::new(NoPrompt),
            clipboard: Arc::new(NoClipboard),
            opener: Arc::new(NoOpener),
            downloads: Arc::new(CwdDownloads),
            config: ExplorerConfig::default(),
        }
    }

    pub fn store(&self) -> &dyn AssetStore {
        &*self.store
    }

    pub fn installer(&self) -> &dyn InstallManifestProvider {
        &*self.installer
    }

    pub fn opening_apps(&self) -> &dyn OpeningAppsResolver {
        &*self.opening_apps
    }

    pub fn favorites(&self) -> &dyn FavoritesRegistry {
        &*self.favorites
    }

    pub fn local_mode(&self) -> bool {
        self.config.local_mode
    }

    /// shareable url of an item's raw content
    pub fn file_url(&self, raw_id: &str) -> String {
        format!("{}/raw/data/{}", self.config.origin.trim_end_matches('/'), raw_id)
    }

    pub fn has_pending_cut(&self) -> bool {
        lock(&self.item_cut).is_some()
    }

    pub fn pending_cut(&self) -> Option<ItemCut> {
        lock(&self.item_cut).clone()
    }

    /// memoized wrapper so repeated navigation into the same placement
    /// observes one status-bearing node
    pub fn get_item_data(&self, item: &api::Item) -> Arc<ItemNode> {
        let mut cache = lock(&self.item_data);

        cache.entry(item.item_id.clone())
            .or_insert_with(|| Arc::new(ItemNode::new(item.clone())))
            .clone()
    }

    pub async fn new_folder(&self, parent: &ExplorerNode) -> Result {
        let parent_folder_id = match parent {
            ExplorerNode::Folder(folder) => &folder.folder_id,
            ExplorerNode::Drive(drive) => &drive.drive_id,
            _ => return Err(ExplorerError::InvalidTarget),
        };

        self.store.create_folder(parent_folder_id, "new folder").await?;
        self.refresh().await;

        Ok(())
    }

    /// asks the prompter for the new name; backing out of the prompt
    /// leaves the entity untouched
    pub async fn rename(&self, node: &ExplorerNode) -> Result {
        let Some(new_name) = self.prompter.prompt("Please enter the new name:", node.name()) else {
            tracing::debug!(node = node.id(), "rename aborted");

            return Ok(());
        };

        if !check_display_name(&new_name, Some(DISPLAY_NAME_MAX_CHARS)) {
            return Err(ExplorerError::InvalidName(new_name));
        }

        match node {
            ExplorerNode::Item(item) => {
                self.store.rename_item(&item.item_id, &new_name).await?;
            },
            ExplorerNode::Folder(folder) => {
                self.store.rename_folder(&folder.folder_id, &new_name).await?;
            },
            _ => return Err(ExplorerError::InvalidTarget),
        }

        self.refresh().await;

        Ok(())
    }

    pub async fn delete_item_or_folder(&self, node: &ExplorerNode) -> Result {
        match node {
            ExplorerNode::Folder(folder) => {
                self.store.trash_folder(&folder.folder_id).await?;

                // the trashed folder may be the current location
                let parent = self.router.parent_path();
                self.router.navigate_to(&parent).await;
            },
            ExplorerNode::Item(item) => {
                self.store.trash_item(&item.item_id).await?;
                self.refresh().await;
            },
            _ => return Err(ExplorerError::InvalidTarget),
        }

        Ok(())
    }

    pub async fn purge_drive(&self, trash: &TrashNode) -> Result {
        self.store.purge_drive(&trash.drive_id).await?;

        let root = self.folder_nav_path(&trash.drive_id).await?;
        self.router.refresh(&root).await;

        Ok(())
    }

    /// records a pending move. a still pending cut is superseded and its
    /// node's tag cleared, so at most one node is ever marked `cut`.
    pub fn cut_item(&self, node: &ExplorerNode) -> Result {
        let origin_refresh_path = match node {
            ExplorerNode::Item(_) => self.refresh_path_for_item_action(),
            ExplorerNode::Folder(folder) => {
                if !folder.is_regular() {
                    tracing::warn!(
                        folder = folder.folder_id,
                        "cut only applies to regular folders"
                    );

                    return Err(ExplorerError::InvalidTarget);
                }

                self.router.parent_path()
            },
            _ => return Err(ExplorerError::InvalidTarget),
        };

        self.record_cut(CutKind::Move, node, origin_refresh_path);

        Ok(())
    }

    /// records a pending borrow; pasting creates a second placement of
    /// the item's asset
    pub fn borrow_item(&self, item: &Arc<ItemNode>) -> Result {
        let origin_refresh_path = self.refresh_path_for_item_action();
        let node = ExplorerNode::from(item.clone());

        self.record_cut(CutKind::Borrow, &node, origin_refresh_path);

        Ok(())
    }

    /// resolves the pending cut against a destination folder or drive
    /// root. a no-op when the clipboard is idle. on success exactly two
    /// locations refresh: the destination and the recorded origin.
    pub async fn paste_item(&self, destination: &ExplorerNode) -> Result {
        let destination_folder_id = match destination {
            ExplorerNode::Folder(folder) => folder.folder_id.clone(),
            ExplorerNode::Drive(drive) => drive.drive_id.clone(),
            _ => return Err(ExplorerError::InvalidTarget),
        };

        let Some(cut) = self.pending_cut() else {
            return Ok(());
        };

        match (cut.cut_kind, &cut.node) {
            (CutKind::Borrow, ExplorerNode::Item(item)) => {
                self.store.borrow_item(&item.item_id, &destination_folder_id).await?;
            },
            (CutKind::Move, ExplorerNode::Item(_)) |
            (CutKind::Move, ExplorerNode::Folder(_)) => {
                self.store.move_entity(cut.node.id(), &destination_folder_id).await?;
            },
            _ => return Err(ExplorerError::InvalidTarget),
        }

        // the mutation landed; release the slot before any refresh can
        // observe it
        cut.node.status().remove(StatusKind::Cut, cut.node.id());
        *lock(&self.item_cut) = None;

        let destination_path = self.folder_nav_path(&destination_folder_id).await?;

        self.router.refresh(&destination_path).await;
        self.router.refresh(&cut.origin_refresh_path).await;

        Ok(())
    }

    /// re-issues the listing behind the current location
    pub async fn refresh(&self) {
        let current = self.router.current_path();

        self.router.navigate_to(&current).await;
    }

    /// publishes a locally created asset to the remote network
    pub async fn upload_asset(&self, item: &ItemNode) -> Result {
        if !self.config.local_mode {
            return Err(ExplorerError::LocalModeOnly);
        }

        self.store.upload_asset(&item.asset_id).await?;
        self.refresh().await;

        Ok(())
    }

    pub async fn download_item(&self, item: &ItemNode) -> Result {
        let data = self.store.raw_data(&item.raw_id).await?;

        self.downloads.save(&item.name, &data.content_type, &data.bytes)?;

        Ok(())
    }

    pub fn launch_application(&self, package: &str, parameters: &BTreeMap<String, String>) {
        let query: String = parameters
            .iter()
            .map(|(key, value)| format!("&{}={}", key, value))
            .collect();
        let url = format!("/applications/{}/latest?{}", package, query);

        tracing::debug!(package, "launching application");

        self.opener.open(&url);
    }

    /// runs a resolved action's effect. disabled actions are rejected so
    /// the permission gating cannot be bypassed by a stale menu.
    pub async fn execute(&self, action: Action) -> Result {
        if !action.enabled {
            return Err(ExplorerError::Disabled);
        }

        match action.command {
            ActionCommand::RenameItem(item) => {
                self.rename(&ExplorerNode::from(item)).await
            },
            ActionCommand::RenameFolder(folder) => {
                self.rename(&ExplorerNode::from(folder)).await
            },
            ActionCommand::NewFolder(parent) => {
                self.new_folder(&parent).await
            },
            ActionCommand::DownloadItem(item) => {
                self.download_item(&item).await
            },
            ActionCommand::UploadAsset(item) => {
                self.upload_asset(&item).await
            },
            ActionCommand::TrashFolder(folder) => {
                self.delete_item_or_folder(&ExplorerNode::from(folder)).await
            },
            ActionCommand::ClearTrash(trash) => {
                self.purge_drive(&trash).await
            },
            ActionCommand::Cut(node) => {
                self.cut_item(&node)
            },
            ActionCommand::Borrow(item) => {
                self.borrow_item(&item)
            },
            ActionCommand::Paste(destination) => {
                self.paste_item(&destination).await
            },
            ActionCommand::TrashItem(item) => {
                self.delete_item_or_folder(&ExplorerNode::from(item)).await
            },
            ActionCommand::Refresh => {
                self.refresh().await;

                Ok(())
            },
            ActionCommand::CopyToClipboard(text) => {
                self.clipboard.write_text(&text);

                Ok(())
            },
            ActionCommand::ToggleFavoriteFolder(folder_id) => {
                self.favorites.toggle_folder(&folder_id);

                Ok(())
            },
            ActionCommand::ToggleDesktopItem(item_id) => {
                self.favorites.toggle_item(&item_id);

                Ok(())
            },
            ActionCommand::Custom { node, exe } => {
                (*exe)(node).await
            },
            ActionCommand::OpenWith { package, parameters } => {
                self.launch_application(&package, &parameters);

                Ok(())
            },
        }
    }

    fn record_cut(&self, cut_kind: CutKind, node: &ExplorerNode, origin_refresh_path: String) {
        let mut slot = lock(&self.item_cut);

        if let Some(previous) = slot.take() {
            tracing::debug!(
                superseded = previous.node.id(),
                by = node.id(),
                "pending cut superseded"
            );

            previous.node.status().remove(StatusKind::Cut, previous.node.id());
        }

        node.status().add(StatusKind::Cut, node.id());

        *slot = Some(ItemCut {
            cut_kind,
            node: node.clone(),
            origin_refresh_path,
        });
    }

    /// the location to refresh once a pending item operation resolves.
    /// when the current location is an asset leaf the containing listing
    /// is the one that changes.
    fn refresh_path_for_item_action(&self) -> String {
        let current = self.router.current_path();

        if nav_path::is_asset_leaf(&current) {
            self.router.parent_path()
        } else {
            current
        }
    }

    async fn folder_nav_path(&self, folder_id: &str) -> Result<String> {
        let path = self.store.folder_path(folder_id)
            .await?
            .ok_or_else(|| ExplorerError::Missing(folder_id.into()))?;

        Ok(navigable_path(&path))
    }
}

/// router path of an entity, derived from its path-from-root
pub fn navigable_path(path: &EntityPath) -> String {
    let mut rtn = format!("/{}", path.drive.drive_id);

    for folder in &path.folders {
        rtn = nav_path::join(&rtn, &folder.folder_id);
    }

    if let Some(item) = &path.item {
        let leaf = format!("{}{}", nav_path::ASSET_MARKER, item.asset_id);

        rtn = nav_path::join(&rtn, leaf);
    }

    rtn
}

pub struct ExplorerStateBuilder {
    store: Arc<dyn AssetStore>,
    router: Arc<dyn Navigator>,
    installer: Arc<dyn InstallManifestProvider>,
    opening_apps: Arc<dyn OpeningAppsResolver>,
    favorites: Arc<dyn FavoritesRegistry>,
    prompter: Arc<dyn Prompter>,
    clipboard: Arc<dyn SystemClipboard>,
    opener: Arc<dyn AppOpener>,
    downloads: Arc<dyn DownloadSink>,
    config: ExplorerConfig,
}

impl ExplorerStateBuilder {
    pub fn installer(&mut self, installer: Arc<dyn InstallManifestProvider>) {
        self.installer = installer;
    }

    pub fn opening_apps(&mut self, opening_apps: Arc<dyn OpeningAppsResolver>) {
        self.opening_apps = opening_apps;
    }

    pub fn favorites(&mut self, favorites: Arc<dyn FavoritesRegistry>) {
        self.favorites = favorites;
    }

    pub fn prompter(&mut self, prompter: Arc<dyn Prompter>) {
        self.prompter = prompter;
    }

    pub fn clipboard(&mut self, clipboard: Arc<dyn SystemClipboard>) {
        self.clipboard = clipboard;
    }

    pub fn opener(&mut self, opener: Arc<dyn AppOpener>) {
        self.opener = opener;
    }

    pub fn downloads(&mut self, downloads: Arc<dyn DownloadSink>) {
        self.downloads = downloads;
    }

    pub fn config(&mut self, config: ExplorerConfig) {
        self.config = config;
    }

    pub fn build(self) -> ExplorerState {
        ExplorerState {
            store: self.store,
            router: self.router,
            installer: self.installer,
            opening_apps: self.opening_apps,
            favorites: self.favorites,
            prompter: self.prompter,
            clipboard: self.clipboard,
            opener: self.opener,
            downloads: self.downloads,
            config: self.config,
            item_cut: Mutex::new(None),
            item_data: Mutex::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;
    use crate::testing::StoreCall;

    use pretty_assertions::assert_eq;

    use crate::actions::{Action, Section};
    use crate::nodes::StatusKind;

    fn seeded() -> testing::Harness {
        let harness = testing::harness();

        harness.store.insert_folder(testing::folder("f_1", "d1", "d1"));
        harness.store.insert_folder(testing::folder("f_2", "d1", "d1"));
        harness.store.insert_item(testing::item("i1", "a1", "f_1"));
        harness.router.set_current("/d1/f_1");

        harness
    }

    #[tokio::test]
    async fn cut_then_paste_moves_and_refreshes_both_locations() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.cut_item(&node).unwrap();

        assert!(node.status().contains(StatusKind::Cut, "a1"));
        assert!(harness.state.has_pending_cut());

        let destination = testing::folder_node("f_2", "d1", "d1");

        harness.state.paste_item(&destination).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::Move {
                target_id: String::from("a1"),
                destination_folder_id: String::from("f_2"),
            },
        ]);
        assert_eq!(harness.router.refreshed(), vec![
            String::from("/d1/f_2"),
            String::from("/d1/f_1"),
        ]);
        assert!(!node.status().contains(StatusKind::Cut, "a1"));
        assert!(!harness.state.has_pending_cut());
    }

    #[tokio::test]
    async fn move_leaves_a_single_placement_at_the_destination() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.cut_item(&node).unwrap();
        harness.state.paste_item(&testing::folder_node("f_2", "d1", "d1")).await.unwrap();

        let placements = harness.store.placements_of("a1");

        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].folder_id, "f_2");
    }

    #[tokio::test]
    async fn borrow_then_paste_adds_a_placement_and_keeps_the_original() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");
        let item = node.as_item().unwrap().clone();

        harness.state.borrow_item(&item).unwrap();
        harness.state.paste_item(&testing::folder_node("f_2", "d1", "d1")).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::Borrow {
                item_id: String::from("i1"),
                destination_folder_id: String::from("f_2"),
            },
        ]);

        let placements = harness.store.placements_of("a1");

        assert_eq!(placements.len(), 2);
        assert!(placements.iter().any(|placed| placed.folder_id == "f_1"));
        assert!(placements.iter().any(|placed| placed.folder_id == "f_2" && placed.borrowed));
    }

    #[tokio::test]
    async fn second_cut_supersedes_and_clears_the_first_tag() {
        let harness = seeded();

        harness.store.insert_item(testing::item("i2", "a2", "f_1"));

        let first = testing::item_node("i1", "a1", "f_1");
        let second = testing::item_node("i2", "a2", "f_1");

        harness.state.cut_item(&first).unwrap();
        harness.state.cut_item(&second).unwrap();

        assert!(!first.status().contains(StatusKind::Cut, "a1"));
        assert!(second.status().contains(StatusKind::Cut, "a2"));

        harness.state.paste_item(&testing::folder_node("f_2", "d1", "d1")).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::Move {
                target_id: String::from("a2"),
                destination_folder_id: String::from("f_2"),
            },
        ]);
    }

    #[tokio::test]
    async fn paste_on_an_idle_clipboard_is_a_no_op() {
        let harness = seeded();

        harness.state.paste_item(&testing::folder_node("f_2", "d1", "d1")).await.unwrap();

        assert!(harness.store.calls().is_empty());
        assert!(harness.router.refreshed().is_empty());
    }

    #[tokio::test]
    async fn failed_paste_keeps_the_slot_and_the_tag() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.cut_item(&node).unwrap();
        harness.store.fail_mutations();

        let result = harness.state.paste_item(&testing::folder_node("f_2", "d1", "d1")).await;

        assert!(result.is_err());
        assert!(node.status().contains(StatusKind::Cut, "a1"));
        assert!(harness.state.has_pending_cut());
        assert!(harness.router.refreshed().is_empty());
    }

    #[tokio::test]
    async fn cutting_from_an_asset_leaf_records_the_parent_path() {
        let harness = seeded();

        harness.router.set_current("/d1/f_1/asset_a1");

        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.cut_item(&node).unwrap();

        let pending = harness.state.pending_cut().unwrap();

        assert_eq!(pending.cut_kind, CutKind::Move);
        assert_eq!(pending.origin_refresh_path, "/d1/f_1");
    }

    #[tokio::test]
    async fn cut_rejects_reserved_folders() {
        let harness = seeded();

        harness.store.insert_folder(testing::folder("d1_home", "d1", "d1"));

        let node = testing::folder_node("d1_home", "d1", "d1");
        let result = harness.state.cut_item(&node);

        assert!(matches!(result, Err(ExplorerError::InvalidTarget)));
        assert!(!harness.state.has_pending_cut());
    }

    #[tokio::test]
    async fn clear_trash_purges_and_refreshes_the_drive_root() {
        let harness = seeded();
        let trash = TrashNode::new("d1".into(), "g1".into());

        harness.state.purge_drive(&trash).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::Purge { drive_id: String::from("d1") },
        ]);
        assert_eq!(harness.router.refreshed(), vec![String::from("/d1")]);
    }

    #[tokio::test]
    async fn rename_goes_through_the_prompter() {
        let harness = seeded();

        harness.prompter.answer("report v2");

        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.rename(&node).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::RenameItem {
                item_id: String::from("i1"),
                name: String::from("report v2"),
            },
        ]);
        assert_eq!(harness.router.navigated(), vec![String::from("/d1/f_1")]);
    }

    #[tokio::test]
    async fn rename_without_an_answer_does_nothing() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");

        harness.state.rename(&node).await.unwrap();

        assert!(harness.store.calls().is_empty());
    }

    #[tokio::test]
    async fn rename_rejects_invalid_names() {
        let harness = seeded();

        harness.prompter.answer(" leading space");

        let node = testing::item_node("i1", "a1", "f_1");
        let result = harness.state.rename(&node).await;

        assert!(matches!(result, Err(ExplorerError::InvalidName(_))));
        assert!(harness.store.calls().is_empty());
    }

    #[tokio::test]
    async fn new_folder_lands_under_the_parent() {
        let harness = seeded();
        let parent = testing::folder_node("f_1", "d1", "d1");

        harness.state.new_folder(&parent).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::CreateFolder {
                parent_folder_id: String::from("f_1"),
                name: String::from("new folder"),
            },
        ]);
    }

    #[tokio::test]
    async fn deleting_a_folder_navigates_up() {
        let harness = seeded();
        let node = testing::folder_node("f_1", "d1", "d1");

        harness.state.delete_item_or_folder(&node).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::TrashFolder { folder_id: String::from("f_1") },
        ]);
        assert_eq!(harness.router.navigated(), vec![String::from("/d1")]);
    }

    #[tokio::test]
    async fn upload_requires_local_mode() {
        let harness = testing::harness();
        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));

        harness.state.upload_asset(&item).await.unwrap();

        assert_eq!(harness.store.calls(), vec![
            StoreCall::Upload { asset_id: String::from("a1") },
        ]);

        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.config(ExplorerConfig::default());

        let remote_state = builder.build();
        let result = remote_state.upload_asset(&item).await;

        assert!(matches!(result, Err(ExplorerError::LocalModeOnly)));
    }

    #[tokio::test]
    async fn download_hands_the_bytes_to_the_sink() {
        let harness = seeded();

        harness.store.insert_raw("a1_raw", b"content".to_vec());

        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));

        harness.state.download_item(&item).await.unwrap();

        assert_eq!(harness.downloads.saved(), vec![
            (String::from("i1"), b"content".to_vec()),
        ]);
    }

    #[tokio::test]
    async fn item_nodes_are_memoized_per_placement() {
        let harness = seeded();
        let raw = testing::item("i1", "a1", "f_1");

        let first = harness.state.get_item_data(&raw);
        let second = harness.state.get_item_data(&raw);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn launch_application_folds_parameters_into_the_query() {
        let harness = seeded();
        let parameters = BTreeMap::from([
            (String::from("id"), String::from("a1")),
            (String::from("mode"), String::from("reader")),
        ]);

        harness.state.launch_application("viewer", &parameters);

        assert_eq!(harness.opener.urls(), vec![
            String::from("/applications/viewer/latest?&id=a1&mode=reader"),
        ]);
    }

    #[tokio::test]
    async fn disabled_actions_are_rejected() {
        let harness = seeded();
        let node = testing::item_node("i1", "a1", "f_1");
        let action = Action {
            icon: String::from("fa-pen"),
            name: String::from("rename"),
            section: Section::Modify,
            source: node.clone(),
            enabled: false,
            command: ActionCommand::RenameItem(node.as_item().unwrap().clone()),
        };

        let result = harness.state.execute(action).await;

        assert!(matches!(result, Err(ExplorerError::Disabled)));
        assert!(harness.store.calls().is_empty());
    }

    #[test]
    fn file_urls_are_anchored_at_the_configured_origin() {
        let harness = testing::harness();

        assert_eq!(harness.state.file_url("a1_raw"), "http://localhost/raw/data/a1_raw");
    }

    #[test]
    fn navigable_paths_carry_the_asset_marker() {
        let path = EntityPath {
            drive: testing::drive("d1"),
            folders: vec![testing::folder("f_1", "d1", "d1")],
            item: Some(testing::item("i1", "a1", "f_1")),
        };

        assert_eq!(navigable_path(&path), "/d1/f_1/asset_a1");
    }
}

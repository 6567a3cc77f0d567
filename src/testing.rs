//! in-memory collaborators backing the test suites. the fake store keeps
//! a mutable tree of drives, folders, and item placements and records
//! every mutation it is asked to perform.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::future::BoxFuture;

use ras_api::assets::Permissions;
use ras_api::client::assets::RawData;
use ras_api::client::error::RequestError;
use ras_api::error::{AssetKind, ExplorerKind, GeneralKind};
use ras_api::explorer as api;
use ras_api::explorer::{Children, DefaultDrive, Deleted, EntityPath};
use ras_api::ApiError;
use ras_lib::origin::Origin;

use crate::collab::apps::{OpeningApp, OpeningAppsResolver};
use crate::collab::installer::{InstallManifestProvider, RawAction};
use crate::collab::nav::Navigator;
use crate::collab::ui::{AppOpener, DownloadSink, Prompter, SystemClipboard};
use crate::error::{ExplorerError, Result as ExplorerResult};
use crate::nodes::{ExplorerNode, FolderNode, ItemNode};
use crate::state::{ExplorerConfig, ExplorerState};
use crate::store::AssetStore;

pub fn drive(drive_id: &str) -> api::Drive {
    api::Drive {
        drive_id: drive_id.into(),
        group_id: String::from("g1"),
        name: drive_id.into(),
    }
}

pub fn folder(folder_id: &str, parent_folder_id: &str, drive_id: &str) -> api::Folder {
    api::Folder {
        folder_id: folder_id.into(),
        parent_folder_id: parent_folder_id.into(),
        drive_id: drive_id.into(),
        group_id: String::from("g1"),
        name: folder_id.into(),
        origin: Some(Origin::local_only()),
    }
}

pub fn item(item_id: &str, asset_id: &str, folder_id: &str) -> api::Item {
    api::Item {
        item_id: item_id.into(),
        asset_id: asset_id.into(),
        raw_id: format!("{}_raw", asset_id),
        folder_id: folder_id.into(),
        drive_id: String::from("d1"),
        group_id: String::from("g1"),
        name: item_id.into(),
        kind: String::from("data"),
        borrowed: false,
        origin: Some(Origin::local_only()),
    }
}

pub fn item_node(item_id: &str, asset_id: &str, folder_id: &str) -> ExplorerNode {
    ExplorerNode::from(Arc::new(ItemNode::new(item(item_id, asset_id, folder_id))))
}

pub fn folder_node(folder_id: &str, parent_folder_id: &str, drive_id: &str) -> ExplorerNode {
    ExplorerNode::from(Arc::new(FolderNode::new(folder(
        folder_id,
        parent_folder_id,
        drive_id,
    ))))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateFolder { parent_folder_id: String, name: String },
    RenameFolder { folder_id: String, name: String },
    RenameItem { item_id: String, name: String },
    Move { target_id: String, destination_folder_id: String },
    Borrow { item_id: String, destination_folder_id: String },
    TrashItem { item_id: String },
    TrashFolder { folder_id: String },
    Purge { drive_id: String },
    Upload { asset_id: String },
}

#[derive(Default)]
pub struct FakeStore {
    drives: Mutex<Vec<api::Drive>>,
    folders: Mutex<Vec<api::Folder>>,
    items: Mutex<Vec<api::Item>>,
    deleted_folders: Mutex<Vec<api::Folder>>,
    deleted_items: Mutex<Vec<api::Item>>,
    permissions: Mutex<HashMap<String, Permissions>>,
    raw: Mutex<HashMap<String, Vec<u8>>>,
    permission_failure: AtomicBool,
    mutation_failure: AtomicBool,
    counter: AtomicUsize,
    calls: Mutex<Vec<StoreCall>>,
}

impl FakeStore {
    pub fn insert_drive(&self, drive: api::Drive) {
        lock(&self.drives).push(drive);
    }

    pub fn insert_folder(&self, folder: api::Folder) {
        lock(&self.folders).push(folder);
    }

    pub fn insert_item(&self, item: api::Item) {
        lock(&self.items).push(item);
    }

    pub fn insert_raw(&self, raw_id: &str, bytes: Vec<u8>) {
        lock(&self.raw).insert(raw_id.into(), bytes);
    }

    pub fn grant(&self, asset_id: &str, permissions: Permissions) {
        lock(&self.permissions).insert(asset_id.into(), permissions);
    }

    pub fn grant_all(&self, asset_id: &str) {
        self.grant(asset_id, Permissions {
            write: true,
            read: true,
            share: true,
            expiration: None,
        });
    }

    pub fn fail_permissions(&self) {
        self.permission_failure.store(true, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self) {
        self.mutation_failure.store(true, Ordering::SeqCst);
    }

    fn mutation_gate(&self) -> Result<(), RequestError> {
        if self.mutation_failure.load(Ordering::SeqCst) {
            return Err(RequestError::Api(ApiError::from(GeneralKind::InternalFailure)));
        }

        Ok(())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn placements_of(&self, asset_id: &str) -> Vec<api::Item> {
        lock(&self.items)
            .iter()
            .filter(|item| item.asset_id == asset_id)
            .cloned()
            .collect()
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }

    fn drive_record(&self, drive_id: &str) -> api::Drive {
        lock(&self.drives)
            .iter()
            .find(|drive| drive.drive_id == drive_id)
            .cloned()
            .unwrap_or_else(|| drive(drive_id))
    }

    /// chain of folders from the drive root down to the given folder
    fn folder_chain(&self, folder_id: &str) -> Vec<api::Folder> {
        let folders = lock(&self.folders);
        let mut chain = Vec::new();
        let mut cursor = folder_id.to_string();

        while let Some(found) = folders.iter().find(|folder| folder.folder_id == cursor) {
            chain.push(found.clone());

            if found.parent_folder_id == found.drive_id {
                break;
            }

            cursor = found.parent_folder_id.clone();
        }

        chain.reverse();
        chain
    }

    fn not_found(kind: ExplorerKind) -> RequestError {
        RequestError::Api(ApiError::from(kind))
    }
}

#[async_trait]
impl AssetStore for FakeStore {
    async fn default_drive(&self, group_id: &str) -> Result<Option<DefaultDrive>, RequestError> {
        let drives = lock(&self.drives);

        Ok(drives.iter().find(|drive| drive.group_id == group_id).map(|drive| {
            DefaultDrive {
                drive_id: drive.drive_id.clone(),
                group_id: drive.group_id.clone(),
                name: drive.name.clone(),
                home_folder_id: format!("{}_home", drive.drive_id),
                download_folder_id: format!("{}_download", drive.drive_id),
                system_folder_id: format!("{}_system", drive.drive_id),
            }
        }))
    }

    async fn children(&self, parent_id: &str) -> Result<Option<Children>, RequestError> {
        let folders = lock(&self.folders)
            .iter()
            .filter(|folder| folder.parent_folder_id == parent_id && folder.folder_id != parent_id)
            .cloned()
            .collect();
        let items = lock(&self.items)
            .iter()
            .filter(|item| item.folder_id == parent_id)
            .cloned()
            .collect();

        Ok(Some(Children { folders, items }))
    }

    async fn deleted(&self, _drive_id: &str) -> Result<Option<Deleted>, RequestError> {
        Ok(Some(Deleted {
            folders: lock(&self.deleted_folders).clone(),
            items: lock(&self.deleted_items).clone(),
        }))
    }

    async fn item_path(&self, item_id: &str) -> Result<Option<EntityPath>, RequestError> {
        let item = lock(&self.items)
            .iter()
            .find(|item| item.item_id == item_id)
            .cloned();

        let Some(item) = item else {
            return Ok(None);
        };

        Ok(Some(EntityPath {
            drive: self.drive_record(&item.drive_id),
            folders: self.folder_chain(&item.folder_id),
            item: Some(item),
        }))
    }

    async fn folder_path(&self, folder_id: &str) -> Result<Option<EntityPath>, RequestError> {
        let known_drive = lock(&self.drives)
            .iter()
            .any(|drive| drive.drive_id == folder_id);

        if known_drive {
            return Ok(Some(EntityPath {
                drive: self.drive_record(folder_id),
                folders: Vec::new(),
                item: None,
            }));
        }

        let chain = self.folder_chain(folder_id);

        let Some(last) = chain.last() else {
            return Ok(None);
        };

        Ok(Some(EntityPath {
            drive: self.drive_record(&last.drive_id),
            folders: chain,
            item: None,
        }))
    }

    async fn create_folder(&self, parent_folder_id: &str, name: &str) -> Result<api::Folder, RequestError> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let parent_drive = lock(&self.folders)
            .iter()
            .find(|folder| folder.folder_id == parent_folder_id)
            .map(|folder| folder.drive_id.clone())
            .unwrap_or_else(|| parent_folder_id.to_string());

        let created = api::Folder {
            folder_id: format!("f_new_{}", count),
            parent_folder_id: parent_folder_id.into(),
            drive_id: parent_drive,
            group_id: String::from("g1"),
            name: name.into(),
            origin: Some(Origin::local_only()),
        };

        lock(&self.folders).push(created.clone());
        self.record(StoreCall::CreateFolder {
            parent_folder_id: parent_folder_id.into(),
            name: name.into(),
        });

        Ok(created)
    }

    async fn rename_folder(&self, folder_id: &str, name: &str) -> Result<api::Folder, RequestError> {
        let mut folders = lock(&self.folders);

        let Some(found) = folders.iter_mut().find(|folder| folder.folder_id == folder_id) else {
            return Err(Self::not_found(ExplorerKind::FolderNotFound));
        };

        found.name = name.into();

        let updated = found.clone();

        drop(folders);
        self.record(StoreCall::RenameFolder {
            folder_id: folder_id.into(),
            name: name.into(),
        });

        Ok(updated)
    }

    async fn rename_item(&self, item_id: &str, name: &str) -> Result<api::Item, RequestError> {
        let mut items = lock(&self.items);

        let Some(found) = items.iter_mut().find(|item| item.item_id == item_id) else {
            return Err(Self::not_found(ExplorerKind::ItemNotFound));
        };

        found.name = name.into();

        let updated = found.clone();

        drop(items);
        self.record(StoreCall::RenameItem {
            item_id: item_id.into(),
            name: name.into(),
        });

        Ok(updated)
    }

    async fn move_entity(&self, target_id: &str, destination_folder_id: &str) -> Result<(), RequestError> {
        self.mutation_gate()?;

        {
            let mut items = lock(&self.items);

            for moved in items.iter_mut().filter(|item| item.asset_id == target_id) {
                moved.folder_id = destination_folder_id.into();
            }
        }

        {
            let mut folders = lock(&self.folders);

            for moved in folders.iter_mut().filter(|folder| folder.folder_id == target_id) {
                moved.parent_folder_id = destination_folder_id.into();
            }
        }

        self.record(StoreCall::Move {
            target_id: target_id.into(),
            destination_folder_id: destination_folder_id.into(),
        });

        Ok(())
    }

    async fn borrow_item(&self, item_id: &str, destination_folder_id: &str) -> Result<api::Item, RequestError> {
        self.mutation_gate()?;

        let source = lock(&self.items)
            .iter()
            .find(|item| item.item_id == item_id)
            .cloned();

        let Some(source) = source else {
            return Err(Self::not_found(ExplorerKind::ItemNotFound));
        };

        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let mut placed = source;

        placed.item_id = format!("{}_b{}", placed.item_id, count);
        placed.folder_id = destination_folder_id.into();
        placed.borrowed = true;

        lock(&self.items).push(placed.clone());
        self.record(StoreCall::Borrow {
            item_id: item_id.into(),
            destination_folder_id: destination_folder_id.into(),
        });

        Ok(placed)
    }

    async fn trash_item(&self, item_id: &str) -> Result<(), RequestError> {
        let mut items = lock(&self.items);

        let Some(position) = items.iter().position(|item| item.item_id == item_id) else {
            return Err(Self::not_found(ExplorerKind::ItemNotFound));
        };

        let removed = items.remove(position);

        drop(items);
        lock(&self.deleted_items).push(removed);
        self.record(StoreCall::TrashItem { item_id: item_id.into() });

        Ok(())
    }

    async fn trash_folder(&self, folder_id: &str) -> Result<(), RequestError> {
        let mut folders = lock(&self.folders);

        let Some(position) = folders.iter().position(|folder| folder.folder_id == folder_id) else {
            return Err(Self::not_found(ExplorerKind::FolderNotFound));
        };

        let removed = folders.remove(position);

        drop(folders);
        lock(&self.deleted_folders).push(removed);
        self.record(StoreCall::TrashFolder { folder_id: folder_id.into() });

        Ok(())
    }

    async fn purge_drive(&self, drive_id: &str) -> Result<(), RequestError> {
        lock(&self.deleted_folders).clear();
        lock(&self.deleted_items).clear();
        self.record(StoreCall::Purge { drive_id: drive_id.into() });

        Ok(())
    }

    async fn item_permissions(&self, asset_id: &str) -> Result<Permissions, RequestError> {
        if self.permission_failure.load(Ordering::SeqCst) {
            return Err(RequestError::Api(ApiError::from(AssetKind::PermissionDenied)));
        }

        let permissions = lock(&self.permissions);

        match permissions.get(asset_id) {
            Some(found) => Ok(found.clone()),
            None => Err(RequestError::Api(ApiError::from(AssetKind::AssetNotFound))),
        }
    }

    async fn raw_data(&self, raw_id: &str) -> Result<RawData, RequestError> {
        let raw = lock(&self.raw);

        match raw.get(raw_id) {
            Some(bytes) => Ok(RawData {
                content_type: mime::APPLICATION_OCTET_STREAM,
                bytes: bytes.clone(),
            }),
            None => Err(RequestError::Api(ApiError::from(AssetKind::RawNotFound))),
        }
    }

    async fn upload_asset(&self, asset_id: &str) -> Result<(), RequestError> {
        self.record(StoreCall::Upload { asset_id: asset_id.into() });

        Ok(())
    }
}

pub struct RecordingNavigator {
    current: Mutex<String>,
    refreshed: Mutex<Vec<String>>,
    navigated: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        RecordingNavigator {
            current: Mutex::new(path.into()),
            refreshed: Mutex::new(Vec::new()),
            navigated: Mutex::new(Vec::new()),
        }
    }

    pub fn set_current(&self, path: &str) {
        *lock(&self.current) = path.into();
    }

    pub fn refreshed(&self) -> Vec<String> {
        lock(&self.refreshed).clone()
    }

    pub fn navigated(&self) -> Vec<String> {
        lock(&self.navigated).clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate_to(&self, path: &str) {
        lock(&self.navigated).push(path.into());
        *lock(&self.current) = path.into();
    }

    async fn refresh(&self, path: &str) {
        lock(&self.refreshed).push(path.into());
    }

    fn current_path(&self) -> String {
        lock(&self.current).clone()
    }

    fn parent_path(&self) -> String {
        ras_lib::path::parent(&lock(&self.current)).to_string()
    }
}

#[derive(Default)]
pub struct ScriptedPrompter {
    answer: Mutex<Option<String>>,
}

impl ScriptedPrompter {
    pub fn answer(&self, value: &str) {
        *lock(&self.answer) = Some(value.into());
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, _label: &str, _current: &str) -> Option<String> {
        lock(&self.answer).clone()
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    texts: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn texts(&self) -> Vec<String> {
        lock(&self.texts).clone()
    }
}

impl SystemClipboard for RecordingClipboard {
    fn write_text(&self, text: &str) {
        lock(&self.texts).push(text.into());
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    urls: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        lock(&self.urls).clone()
    }
}

impl AppOpener for RecordingOpener {
    fn open(&self, url: &str) {
        lock(&self.urls).push(url.into());
    }
}

#[derive(Default)]
pub struct MemoryDownloads {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryDownloads {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        lock(&self.saved).clone()
    }
}

impl DownloadSink for MemoryDownloads {
    fn save(&self, name: &str, _content_type: &mime::Mime, bytes: &[u8]) -> std::io::Result<()> {
        lock(&self.saved).push((name.into(), bytes.to_vec()));

        Ok(())
    }
}

/// contributes one fixed custom action per configured name; executions
/// are recorded with the node they ran against
pub struct StaticInstaller {
    names: Vec<String>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl StaticInstaller {
    pub fn with_actions(names: &[&str]) -> Self {
        StaticInstaller {
            names: names.iter().map(|name| name.to_string()).collect(),
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        lock(&self.executed).clone()
    }
}

#[async_trait]
impl InstallManifestProvider for StaticInstaller {
    async fn context_menu_actions(
        &self,
        _node: &ExplorerNode,
        _state: &ExplorerState,
    ) -> ExplorerResult<Vec<RawAction>> {
        Ok(self.names
            .iter()
            .map(|name| {
                let executed = self.executed.clone();
                let recorded = name.clone();
                let exe = move |node: ExplorerNode| -> BoxFuture<'static, ExplorerResult<()>> {
                    let executed = executed.clone();
                    let recorded = recorded.clone();

                    Box::pin(async move {
                        lock(&executed).push(format!("{}:{}", recorded, node.id()));

                        Ok(())
                    })
                };

                RawAction::new("fa-bolt", name.clone(), Arc::new(exe))
            })
            .collect())
    }
}

pub struct FailingInstaller;

#[async_trait]
impl InstallManifestProvider for FailingInstaller {
    async fn context_menu_actions(
        &self,
        _node: &ExplorerNode,
        _state: &ExplorerState,
    ) -> ExplorerResult<Vec<RawAction>> {
        Err(ExplorerError::Collaborator("manifest offline".into()))
    }
}

pub struct StaticApps {
    candidates: Vec<OpeningApp>,
}

impl StaticApps {
    pub fn with_candidates(candidates: Vec<OpeningApp>) -> Self {
        StaticApps { candidates }
    }
}

#[async_trait]
impl OpeningAppsResolver for StaticApps {
    async fn candidates(&self, _item: &ItemNode) -> ExplorerResult<Vec<OpeningApp>> {
        Ok(self.candidates.clone())
    }
}

pub struct FailingApps;

#[async_trait]
impl OpeningAppsResolver for FailingApps {
    async fn candidates(&self, _item: &ItemNode) -> ExplorerResult<Vec<OpeningApp>> {
        Err(ExplorerError::Collaborator("resolver offline".into()))
    }
}

/// an `ExplorerState` wired to recording fakes, rooted at `/d1`
pub struct Harness {
    pub store: Arc<FakeStore>,
    pub router: Arc<RecordingNavigator>,
    pub prompter: Arc<ScriptedPrompter>,
    pub clipboard: Arc<RecordingClipboard>,
    pub opener: Arc<RecordingOpener>,
    pub downloads: Arc<MemoryDownloads>,
    pub state: ExplorerState,
}

pub fn harness() -> Harness {
    let store = Arc::new(FakeStore::default());

    store.insert_drive(drive("d1"));

    let router = Arc::new(RecordingNavigator::at("/d1"));
    let prompter = Arc::new(ScriptedPrompter::default());
    let clipboard = Arc::new(RecordingClipboard::default());
    let opener = Arc::new(RecordingOpener::default());
    let downloads = Arc::new(MemoryDownloads::default());

    let mut builder = ExplorerState::builder(store.clone(), router.clone());

    builder.prompter(prompter.clone());
    builder.clipboard(clipboard.clone());
    builder.opener(opener.clone());
    builder.downloads(downloads.clone());
    builder.config(ExplorerConfig {
        local_mode: true,
        origin: String::from("http://localhost"),
    });

    Harness {
        store,
        router,
        prompter,
        clipboard,
        opener,
        downloads,
        state: builder.build(),
    }
}

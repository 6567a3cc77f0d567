use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ras_lib::ids;
use ras_lib::origin::Origin;
use ras_api::explorer as api;

/// transient per-node marker observed by the views. the clipboard keeps at
/// most one `Cut` tag alive across the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Cut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTag {
    pub kind: StatusKind,
    pub id: String,
}

/// the only field of a node that mutates after construction. shared
/// between the clipboard (writer) and any subscribed views (readers).
#[derive(Debug, Default)]
pub struct StatusSet {
    tags: RwLock<Vec<StatusTag>>,
}

impl StatusSet {
    fn read(&self) -> RwLockReadGuard<'_, Vec<StatusTag>> {
        match self.tags.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<StatusTag>> {
        match self.tags.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn add(&self, kind: StatusKind, id: impl Into<String>) -> StatusTag {
        let tag = StatusTag { kind, id: id.into() };
        let mut tags = self.write();

        if !tags.contains(&tag) {
            tags.push(tag.clone());
        }

        tag
    }

    pub fn remove(&self, kind: StatusKind, id: &str) {
        self.write().retain(|tag| !(tag.kind == kind && tag.id == id));
    }

    pub fn contains(&self, kind: StatusKind, id: &str) -> bool {
        self.read().iter().any(|tag| tag.kind == kind && tag.id == id)
    }

    pub fn snapshot(&self) -> Vec<StatusTag> {
        self.read().clone()
    }
}

#[derive(Debug)]
pub struct DriveNode {
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    status: StatusSet,
}

impl DriveNode {
    pub fn new(drive: api::Drive) -> Self {
        DriveNode {
            drive_id: drive.drive_id,
            group_id: drive.group_id,
            name: drive.name,
            status: StatusSet::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.drive_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    Regular,
    Home,
    Download,
    System,
}

impl FolderKind {
    /// reserved folders are recognized by a suffix convention on their id
    pub fn from_folder_id(folder_id: &str) -> Self {
        if folder_id.ends_with("_system") {
            FolderKind::System
        } else if folder_id.ends_with("_download") {
            FolderKind::Download
        } else if folder_id.ends_with("_home") {
            FolderKind::Home
        } else {
            FolderKind::Regular
        }
    }
}

#[derive(Debug)]
pub struct FolderNode {
    pub folder_id: ids::FolderId,
    pub parent_folder_id: ids::FolderId,
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    pub kind: FolderKind,
    pub origin: Option<Origin>,
    status: StatusSet,
}

impl FolderNode {
    pub fn new(folder: api::Folder) -> Self {
        let kind = FolderKind::from_folder_id(&folder.folder_id);

        FolderNode {
            folder_id: folder.folder_id,
            parent_folder_id: folder.parent_folder_id,
            drive_id: folder.drive_id,
            group_id: folder.group_id,
            name: folder.name,
            kind,
            origin: folder.origin,
            status: StatusSet::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.folder_id
    }

    /// rename / delete / cut only apply to regular folders that are not
    /// the drive root
    pub fn is_regular(&self) -> bool {
        self.kind == FolderKind::Regular && self.folder_id != self.drive_id
    }
}

#[derive(Debug)]
pub struct ItemNode {
    pub item_id: ids::ItemId,
    pub asset_id: ids::AssetId,
    pub raw_id: ids::RawId,
    pub folder_id: ids::FolderId,
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    pub kind: String,
    pub borrowed: bool,
    pub origin: Option<Origin>,
    status: StatusSet,
}

impl ItemNode {
    pub fn new(item: api::Item) -> Self {
        ItemNode {
            item_id: item.item_id,
            asset_id: item.asset_id,
            raw_id: item.raw_id,
            folder_id: item.folder_id,
            drive_id: item.drive_id,
            group_id: item.group_id,
            name: item.name,
            kind: item.kind,
            borrowed: item.borrowed,
            origin: item.origin,
            status: StatusSet::default(),
        }
    }

    /// an item is addressed by its asset across the explorer; the
    /// `item_id` only distinguishes placements of the same asset
    pub fn id(&self) -> &str {
        &self.asset_id
    }
}

/// synthetic per-drive leaf. not backed by any listing entry; purging the
/// drive is its only operation.
#[derive(Debug)]
pub struct TrashNode {
    pub id: String,
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    status: StatusSet,
}

impl TrashNode {
    pub fn new(drive_id: ids::DriveId, group_id: ids::GroupId) -> Self {
        let id = ids::trash_id(&drive_id);

        TrashNode {
            id,
            drive_id,
            group_id,
            name: String::from("Trash"),
            status: StatusSet::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExplorerNode {
    Drive(Arc<DriveNode>),
    Folder(Arc<FolderNode>),
    Item(Arc<ItemNode>),
    Trash(Arc<TrashNode>),
}

impl ExplorerNode {
    pub fn id(&self) -> &str {
        match self {
            ExplorerNode::Drive(drive) => drive.id(),
            ExplorerNode::Folder(folder) => folder.id(),
            ExplorerNode::Item(item) => item.id(),
            ExplorerNode::Trash(trash) => &trash.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExplorerNode::Drive(drive) => &drive.name,
            ExplorerNode::Folder(folder) => &folder.name,
            ExplorerNode::Item(item) => &item.name,
            ExplorerNode::Trash(trash) => &trash.name,
        }
    }

    pub fn group_id(&self) -> &str {
        match self {
            ExplorerNode::Drive(drive) => &drive.group_id,
            ExplorerNode::Folder(folder) => &folder.group_id,
            ExplorerNode::Item(item) => &item.group_id,
            ExplorerNode::Trash(trash) => &trash.group_id,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            ExplorerNode::Folder(folder) => folder.origin,
            ExplorerNode::Item(item) => item.origin,
            ExplorerNode::Drive(_) | ExplorerNode::Trash(_) => None,
        }
    }

    /// an absent origin means the entity was created by the current
    /// environment and counts as local
    pub fn is_local(&self) -> bool {
        self.origin().map(|origin| origin.local).unwrap_or(true)
    }

    pub fn status(&self) -> &StatusSet {
        match self {
            ExplorerNode::Drive(drive) => &drive.status,
            ExplorerNode::Folder(folder) => &folder.status,
            ExplorerNode::Item(item) => &item.status,
            ExplorerNode::Trash(trash) => &trash.status,
        }
    }

    pub fn as_item(&self) -> Option<&Arc<ItemNode>> {
        match self {
            ExplorerNode::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Arc<FolderNode>> {
        match self {
            ExplorerNode::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    pub fn is_regular_folder(&self) -> bool {
        match self {
            ExplorerNode::Folder(folder) => folder.is_regular(),
            _ => false,
        }
    }
}

impl From<Arc<DriveNode>> for ExplorerNode {
    fn from(drive: Arc<DriveNode>) -> Self {
        ExplorerNode::Drive(drive)
    }
}

impl From<Arc<FolderNode>> for ExplorerNode {
    fn from(folder: Arc<FolderNode>) -> Self {
        ExplorerNode::Folder(folder)
    }
}

impl From<Arc<ItemNode>> for ExplorerNode {
    fn from(item: Arc<ItemNode>) -> Self {
        ExplorerNode::Item(item)
    }
}

impl From<Arc<TrashNode>> for ExplorerNode {
    fn from(trash: Arc<TrashNode>) -> Self {
        ExplorerNode::Trash(trash)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;

    #[test]
    fn folder_kind_follows_id_suffix() {
        assert_eq!(FolderKind::from_folder_id("f_1"), FolderKind::Regular);
        assert_eq!(FolderKind::from_folder_id("d1_system"), FolderKind::System);
        assert_eq!(FolderKind::from_folder_id("d1_download"), FolderKind::Download);
        assert_eq!(FolderKind::from_folder_id("d1_home"), FolderKind::Home);
    }

    #[test]
    fn drive_root_is_never_regular() {
        let root = FolderNode::new(testing::folder("d1", "d1", "d1"));

        assert_eq!(root.kind, FolderKind::Regular);
        assert!(!root.is_regular());

        let nested = FolderNode::new(testing::folder("f_1", "d1", "d1"));

        assert!(nested.is_regular());
    }

    #[test]
    fn trash_node_id_is_derived_from_drive() {
        let trash = TrashNode::new("d1".into(), "g1".into());

        assert_eq!(trash.id, "trash_d1");
        assert_eq!(trash.name, "Trash");
    }

    #[test]
    fn item_node_is_addressed_by_asset() {
        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));

        assert_eq!(item.id(), "a1");
        assert_eq!(item.item_id, "i1");
    }

    #[test]
    fn status_tags_add_and_remove_by_pair() {
        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));
        let node = ExplorerNode::from(Arc::new(item));

        node.status().add(StatusKind::Cut, node.id());
        node.status().add(StatusKind::Cut, node.id());

        assert_eq!(node.status().snapshot().len(), 1);
        assert!(node.status().contains(StatusKind::Cut, "a1"));

        node.status().remove(StatusKind::Cut, "other");
        assert!(node.status().contains(StatusKind::Cut, "a1"));

        node.status().remove(StatusKind::Cut, "a1");
        assert!(!node.status().contains(StatusKind::Cut, "a1"));
    }

    #[test]
    fn absent_origin_counts_as_local() {
        let mut raw = testing::item("i1", "a1", "f_1");
        raw.origin = None;

        let node = ExplorerNode::from(Arc::new(ItemNode::new(raw)));

        assert!(node.is_local());
    }
}

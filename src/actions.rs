use std::collections::BTreeMap;
use std::sync::Arc;

use crate::collab::installer::CustomExe;
use crate::nodes::{ExplorerNode, FolderNode, ItemNode, TrashNode};
use crate::permissions::OverallPermissions;
use crate::state::ExplorerState;

/// context-menu grouping, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Modify,
    Move,
    New,
    Io,
    Disposition,
    Info,
    CustomActions,
    Open,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Modify => "Modify",
            Section::Move => "Move",
            Section::New => "New",
            Section::Io => "IO",
            Section::Disposition => "Disposition",
            Section::Info => "Info",
            Section::CustomActions => "CustomActions",
            Section::Open => "Open",
        };

        write!(f, "{}", name)
    }
}

/// effect carried by a resolved action, executed through
/// `ExplorerState::execute`
pub enum ActionCommand {
    RenameItem(Arc<ItemNode>),
    RenameFolder(Arc<FolderNode>),
    NewFolder(ExplorerNode),
    DownloadItem(Arc<ItemNode>),
    UploadAsset(Arc<ItemNode>),
    TrashFolder(Arc<FolderNode>),
    ClearTrash(Arc<TrashNode>),
    Cut(ExplorerNode),
    Borrow(Arc<ItemNode>),
    Paste(ExplorerNode),
    TrashItem(Arc<ItemNode>),
    Refresh,
    CopyToClipboard(String),
    ToggleFavoriteFolder(String),
    ToggleDesktopItem(String),
    Custom { node: ExplorerNode, exe: CustomExe },
    OpenWith { package: String, parameters: BTreeMap<String, String> },
}

impl std::fmt::Debug for ActionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionCommand::RenameItem(item) => write!(f, "RenameItem({})", item.item_id),
            ActionCommand::RenameFolder(folder) => write!(f, "RenameFolder({})", folder.folder_id),
            ActionCommand::NewFolder(parent) => write!(f, "NewFolder({})", parent.id()),
            ActionCommand::DownloadItem(item) => write!(f, "DownloadItem({})", item.raw_id),
            ActionCommand::UploadAsset(item) => write!(f, "UploadAsset({})", item.asset_id),
            ActionCommand::TrashFolder(folder) => write!(f, "TrashFolder({})", folder.folder_id),
            ActionCommand::ClearTrash(trash) => write!(f, "ClearTrash({})", trash.drive_id),
            ActionCommand::Cut(node) => write!(f, "Cut({})", node.id()),
            ActionCommand::Borrow(item) => write!(f, "Borrow({})", item.asset_id),
            ActionCommand::Paste(node) => write!(f, "Paste({})", node.id()),
            ActionCommand::TrashItem(item) => write!(f, "TrashItem({})", item.item_id),
            ActionCommand::Refresh => write!(f, "Refresh"),
            ActionCommand::CopyToClipboard(text) => write!(f, "CopyToClipboard({})", text),
            ActionCommand::ToggleFavoriteFolder(id) => write!(f, "ToggleFavoriteFolder({})", id),
            ActionCommand::ToggleDesktopItem(id) => write!(f, "ToggleDesktopItem({})", id),
            ActionCommand::Custom { node, .. } => write!(f, "Custom({})", node.id()),
            ActionCommand::OpenWith { package, .. } => write!(f, "OpenWith({})", package),
        }
    }
}

#[derive(Debug)]
pub struct Action {
    pub icon: String,
    pub name: String,
    pub section: Section,
    pub source: ExplorerNode,
    pub enabled: bool,
    pub command: ActionCommand,
}

impl Action {
    fn new<I, N>(
        icon: I,
        name: N,
        section: Section,
        source: &ExplorerNode,
        enabled: bool,
        command: ActionCommand,
    ) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Action {
            icon: icon.into(),
            name: name.into(),
            section,
            source: source.clone(),
            enabled,
            command,
        }
    }
}

/// a catalog entry. returns `None` when the action does not apply to the
/// node; `enabled` reflects the resolved permissions.
pub type ActionConstructor =
    fn(&ExplorerState, &ExplorerNode, &OverallPermissions) -> Option<Action>;

/// the built-in actions, in menu order
pub const CATALOG: &[ActionConstructor] = &[
    rename_item,
    rename_folder,
    new_folder,
    download,
    upload,
    delete_folder,
    clear_trash,
    paste,
    cut,
    borrow_item,
    delete_item,
    refresh,
    copy_file_id,
    copy_explorer_id,
    copy_asset_id,
    copy_file_url,
    favorite_folder,
    un_favorite_folder,
    favorite_desktop_item,
    un_favorite_desktop_item,
];

fn rename_item(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-pen",
        "rename",
        Section::Modify,
        node,
        permissions.allows_item_modify(node),
        ActionCommand::RenameItem(item.clone()),
    ))
}

fn rename_folder(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let folder = node.as_folder()?;

    if !folder.is_regular() || !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-pen",
        "rename",
        Section::Modify,
        node,
        permissions.allows_group_modify(),
        ActionCommand::RenameFolder(folder.clone()),
    ))
}

fn new_folder(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    match node {
        ExplorerNode::Folder(_) | ExplorerNode::Drive(_) => {},
        _ => return None,
    }

    Some(Action::new(
        "fa-folder",
        "new folder",
        Section::New,
        node,
        permissions.allows_group_modify(),
        ActionCommand::NewFolder(node.clone()),
    ))
}

fn download(
    _state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if item.kind != "data" {
        return None;
    }

    Some(Action::new(
        "fa-download",
        "download file",
        Section::Io,
        node,
        true,
        ActionCommand::DownloadItem(item.clone()),
    ))
}

fn upload(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if !state.local_mode() || !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-upload",
        "upload asset",
        Section::Io,
        node,
        true,
        ActionCommand::UploadAsset(item.clone()),
    ))
}

fn delete_folder(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let folder = node.as_folder()?;

    if !folder.is_regular() || !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-trash",
        "delete",
        Section::Modify,
        node,
        permissions.allows_group_modify(),
        ActionCommand::TrashFolder(folder.clone()),
    ))
}

fn clear_trash(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let ExplorerNode::Trash(trash) = node else {
        return None;
    };

    Some(Action::new(
        "fa-times",
        "clear trash",
        Section::Modify,
        node,
        permissions.allows_group_modify(),
        ActionCommand::ClearTrash(trash.clone()),
    ))
}

fn paste(
    state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    if node.as_folder().is_none() || !state.has_pending_cut() {
        return None;
    }

    Some(Action::new(
        "fa-paste",
        "paste",
        Section::Move,
        node,
        permissions.allows_group_modify(),
        ActionCommand::Paste(node.clone()),
    ))
}

fn cut(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let (applies, enabled) = match node {
        ExplorerNode::Item(item) => (
            !item.borrowed && node.is_local(),
            permissions.allows_item_modify(node),
        ),
        ExplorerNode::Folder(_) => (
            node.is_regular_folder(),
            permissions.allows_group_modify(),
        ),
        _ => (false, false),
    };

    if !applies {
        return None;
    }

    Some(Action::new(
        "fa-cut",
        "cut",
        Section::Move,
        node,
        enabled,
        ActionCommand::Cut(node.clone()),
    ))
}

fn borrow_item(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-link",
        "borrow item",
        Section::Move,
        node,
        permissions.allows_item_share(),
        ActionCommand::Borrow(item.clone()),
    ))
}

fn delete_item(
    _state: &ExplorerState,
    node: &ExplorerNode,
    permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if !node.is_local() {
        return None;
    }

    Some(Action::new(
        "fa-trash",
        "delete",
        Section::Modify,
        node,
        permissions.allows_item_modify(node),
        ActionCommand::TrashItem(item.clone()),
    ))
}

fn refresh(
    _state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    match node {
        ExplorerNode::Folder(_) | ExplorerNode::Trash(_) => {},
        _ => return None,
    }

    Some(Action::new(
        "fa-sync-alt",
        "refresh",
        Section::Disposition,
        node,
        true,
        ActionCommand::Refresh,
    ))
}

fn copy_file_id(
    _state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if item.kind != "data" {
        return None;
    }

    Some(Action::new(
        "fa-clipboard",
        "copy file's id",
        Section::Info,
        node,
        true,
        ActionCommand::CopyToClipboard(item.raw_id.clone()),
    ))
}

fn copy_explorer_id(
    _state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    Some(Action::new(
        "fa-clipboard",
        "copy explorer's id",
        Section::Info,
        node,
        true,
        ActionCommand::CopyToClipboard(item.item_id.clone()),
    ))
}

fn copy_asset_id(
    _state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    Some(Action::new(
        "fa-clipboard",
        "copy asset's id",
        Section::Info,
        node,
        true,
        ActionCommand::CopyToClipboard(item.asset_id.clone()),
    ))
}

fn copy_file_url(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    let item = node.as_item()?;

    if item.kind != "data" {
        return None;
    }

    Some(Action::new(
        "fa-clipboard",
        "copy file's url",
        Section::Info,
        node,
        true,
        ActionCommand::CopyToClipboard(state.file_url(&item.raw_id)),
    ))
}

fn favorite_folder(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    if node.as_folder().is_none() || state.favorites().is_favorite_folder(node.id()) {
        return None;
    }

    Some(Action::new(
        "fa-map-pin",
        "add to favorites",
        Section::Disposition,
        node,
        true,
        ActionCommand::ToggleFavoriteFolder(node.id().into()),
    ))
}

fn un_favorite_folder(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    if node.as_folder().is_none() || !state.favorites().is_favorite_folder(node.id()) {
        return None;
    }

    Some(Action::new(
        "fa-unlink",
        "un-favorite",
        Section::Disposition,
        node,
        true,
        ActionCommand::ToggleFavoriteFolder(node.id().into()),
    ))
}

fn favorite_desktop_item(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    if node.as_item().is_none() || state.favorites().is_desktop_item(node.id()) {
        return None;
    }

    Some(Action::new(
        "fa-map-pin",
        "add to desktop",
        Section::Disposition,
        node,
        true,
        ActionCommand::ToggleDesktopItem(node.id().into()),
    ))
}

fn un_favorite_desktop_item(
    state: &ExplorerState,
    node: &ExplorerNode,
    _permissions: &OverallPermissions,
) -> Option<Action> {
    if node.as_item().is_none() || !state.favorites().is_desktop_item(node.id()) {
        return None;
    }

    Some(Action::new(
        "fa-unlink",
        "remove from desktop",
        Section::Disposition,
        node,
        true,
        ActionCommand::ToggleDesktopItem(node.id().into()),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;

    use ras_api::assets::Permissions;
    use ras_lib::origin::Origin;

    use crate::permissions::GroupPermissions;

    fn group_only() -> OverallPermissions {
        OverallPermissions {
            group: GroupPermissions { write: true },
            item: None,
        }
    }

    fn full_item() -> OverallPermissions {
        OverallPermissions {
            group: GroupPermissions { write: true },
            item: Some(Permissions {
                write: true,
                read: true,
                share: true,
                expiration: None,
            }),
        }
    }

    fn applicable_names(state: &ExplorerState, node: &ExplorerNode, permissions: &OverallPermissions) -> Vec<String> {
        CATALOG
            .iter()
            .filter_map(|constructor| constructor(state, node, permissions))
            .map(|action| action.name)
            .collect()
    }

    #[test]
    fn regular_folders_get_rename_delete_cut() {
        let harness = testing::harness();
        let node = testing::folder_node("f_1", "d1", "d1");
        let names = applicable_names(&harness.state, &node, &group_only());

        assert!(names.contains(&String::from("rename")));
        assert!(names.contains(&String::from("delete")));
        assert!(names.contains(&String::from("cut")));
    }

    #[test]
    fn reserved_folders_and_drive_roots_do_not() {
        let harness = testing::harness();

        for node in [
            testing::folder_node("d1_home", "d1", "d1"),
            testing::folder_node("d1_download", "d1", "d1"),
            testing::folder_node("d1_system", "d1", "d1"),
            testing::folder_node("d1", "d1", "d1"),
        ] {
            let names = applicable_names(&harness.state, &node, &group_only());

            assert!(!names.contains(&String::from("rename")), "{}", node.id());
            assert!(!names.contains(&String::from("delete")), "{}", node.id());
            assert!(!names.contains(&String::from("cut")), "{}", node.id());
        }
    }

    #[test]
    fn borrowed_items_cannot_be_cut() {
        let harness = testing::harness();
        let mut raw = testing::item("i1", "a1", "f_1");

        raw.borrowed = true;

        let node = ExplorerNode::from(Arc::new(ItemNode::new(raw)));
        let names = applicable_names(&harness.state, &node, &full_item());

        assert!(!names.contains(&String::from("cut")));
        assert!(names.contains(&String::from("borrow item")));
    }

    #[test]
    fn remote_items_keep_read_only_actions() {
        let harness = testing::harness();
        let mut raw = testing::item("i1", "a1", "f_1");

        raw.origin = Some(Origin::remote_only());

        let node = ExplorerNode::from(Arc::new(ItemNode::new(raw)));
        let names = applicable_names(&harness.state, &node, &full_item());

        assert!(!names.contains(&String::from("rename")));
        assert!(!names.contains(&String::from("delete")));
        assert!(!names.contains(&String::from("cut")));
        assert!(names.contains(&String::from("download file")));
        assert!(names.contains(&String::from("copy asset's id")));
    }

    #[test]
    fn paste_requires_a_pending_cut() {
        let harness = testing::harness();
        let destination = testing::folder_node("f_2", "d1", "d1");

        assert!(!applicable_names(&harness.state, &destination, &group_only())
            .contains(&String::from("paste")));

        harness.state.cut_item(&testing::item_node("i1", "a1", "f_1")).unwrap();

        assert!(applicable_names(&harness.state, &destination, &group_only())
            .contains(&String::from("paste")));
    }

    #[test]
    fn missing_write_permission_disables_modify_actions() {
        let harness = testing::harness();
        let node = testing::item_node("i1", "a1", "f_1");
        let permissions = OverallPermissions {
            group: GroupPermissions { write: true },
            item: Some(Permissions::read_only()),
        };

        let rename = rename_item(&harness.state, &node, &permissions).unwrap();
        let delete = delete_item(&harness.state, &node, &permissions).unwrap();

        assert!(!rename.enabled);
        assert!(!delete.enabled);
    }

    #[test]
    fn upload_is_gated_on_local_mode() {
        let harness = testing::harness();
        let node = testing::item_node("i1", "a1", "f_1");

        // the harness runs in local mode
        assert!(upload(&harness.state, &node, &full_item()).is_some());

        let builder = crate::state::ExplorerState::builder(
            harness.store.clone(),
            harness.router.clone(),
        );
        let remote_state = builder.build();

        assert!(upload(&remote_state, &node, &full_item()).is_none());
    }

    #[test]
    fn favorite_actions_follow_the_registry() {
        let harness = testing::harness();
        let node = testing::folder_node("f_1", "d1", "d1");

        let before = applicable_names(&harness.state, &node, &group_only());

        assert!(before.contains(&String::from("add to favorites")));
        assert!(!before.contains(&String::from("un-favorite")));

        harness.state.favorites().toggle_folder("f_1");

        let after = applicable_names(&harness.state, &node, &group_only());

        assert!(!after.contains(&String::from("add to favorites")));
        assert!(after.contains(&String::from("un-favorite")));
    }

    #[test]
    fn copy_helpers_derive_their_payloads() {
        let harness = testing::harness();
        let node = testing::item_node("i1", "a1", "f_1");
        let permissions = full_item();

        let file_id = copy_file_id(&harness.state, &node, &permissions).unwrap();
        let file_url = copy_file_url(&harness.state, &node, &permissions).unwrap();

        assert!(matches!(
            file_id.command,
            ActionCommand::CopyToClipboard(text) if text == "a1_raw"
        ));
        assert!(matches!(
            file_url.command,
            ActionCommand::CopyToClipboard(text) if text == "http://localhost/raw/data/a1_raw"
        ));
    }
}

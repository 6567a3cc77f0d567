use ras_lib::ids;
use ras_lib::origin::Origin;

use serde::{Serialize, Deserialize};

/// top level storage root inside an access group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drive {
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
}

/// the drive a group roots its tree in, with the reserved folders the
/// store provisions alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultDrive {
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    pub home_folder_id: ids::FolderId,
    pub download_folder_id: ids::FolderId,
    pub system_folder_id: ids::FolderId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub folder_id: ids::FolderId,
    pub parent_folder_id: ids::FolderId,
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ids::ItemId,
    pub asset_id: ids::AssetId,
    pub raw_id: ids::RawId,
    pub folder_id: ids::FolderId,
    pub drive_id: ids::DriveId,
    pub group_id: ids::GroupId,
    pub name: String,
    pub kind: String,
    pub borrowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// listing of a folder or drive root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Children {
    pub folders: Vec<Folder>,
    pub items: Vec<Item>,
}

/// content of a drive's trash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    pub folders: Vec<Folder>,
    pub items: Vec<Item>,
}

/// path from the drive root down to an entity. `folders` is ordered root
/// first; `item` is present when the path addresses an item leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPath {
    pub drive: Drive,
    pub folders: Vec<Folder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFolder {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateFolder {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItem {
    pub name: String,
}

/// re-parents an item or a folder under the destination folder
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveEntity {
    pub target_id: String,
    pub destination_folder_id: ids::FolderId,
}

/// creates a new item placement referencing the borrowed item's asset
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowItem {
    pub destination_folder_id: ids::FolderId,
}

impl crate::Validator for CreateFolder {
    fn validate(&self) -> Result<(), crate::ApiError> {
        check_name(&self.name)
    }
}

impl crate::Validator for UpdateFolder {
    fn validate(&self) -> Result<(), crate::ApiError> {
        check_name(&self.name)
    }
}

impl crate::Validator for UpdateItem {
    fn validate(&self) -> Result<(), crate::ApiError> {
        check_name(&self.name)
    }
}

fn check_name(name: &str) -> Result<(), crate::ApiError> {
    use ras_lib::validation::{check_display_name, DISPLAY_NAME_MAX_CHARS};

    if !check_display_name(name, Some(DISPLAY_NAME_MAX_CHARS)) {
        return Err(crate::ApiError::from((
            crate::error::GeneralKind::ValidationFailed,
            crate::Detail::with_key("name"),
        )));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn children_listing_parses_origin() {
        let raw = serde_json::json!({
            "folders": [{
                "folder_id": "f_1",
                "parent_folder_id": "drive_1",
                "drive_id": "drive_1",
                "group_id": "g_1",
                "name": "documents"
            }],
            "items": [{
                "item_id": "i_1",
                "asset_id": "a_1",
                "raw_id": "r_1",
                "folder_id": "f_1",
                "drive_id": "drive_1",
                "group_id": "g_1",
                "name": "report",
                "kind": "data",
                "borrowed": false,
                "origin": {"local": false, "remote": true}
            }]
        });

        let children: Children = serde_json::from_value(raw).unwrap();

        assert!(children.folders[0].origin.is_none());

        let origin = children.items[0].origin.unwrap();

        assert!(!origin.local);
        assert!(origin.remote);
    }

    #[test]
    fn create_folder_rejects_bad_names() {
        use crate::Validator;

        let valid = CreateFolder { name: String::from("new folder") };
        let invalid = CreateFolder { name: String::from(" new folder") };

        assert!(valid.validate().is_ok());
        assert!(invalid.validate().is_err());
    }
}

//! Identifiers minted by the remote asset store. All of them are opaque
//! strings from this client's perspective.

pub type GroupId = String;
pub type DriveId = String;
pub type FolderId = String;
pub type ItemId = String;
pub type AssetId = String;
pub type RawId = String;

pub const TRASH_ID_PREFIX: &str = "trash_";

/// id of the synthetic trash entry attached to a drive
pub fn trash_id<D>(drive_id: D) -> String
where
    D: AsRef<str>
{
    format!("{}{}", TRASH_ID_PREFIX, drive_id.as_ref())
}

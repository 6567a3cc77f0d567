use ras_lib::ids;

use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::{ApiError, ApiErrorKind, Validator};
use crate::error::ExplorerKind;
use crate::explorer::{
    Children,
    CreateFolder as CreateFolderBody,
    DefaultDrive,
    Deleted,
    EntityPath,
    Folder,
    Item,
    BorrowItem as BorrowItemBody,
    MoveEntity as MoveEntityBody,
    UpdateFolder as UpdateFolderBody,
    UpdateItem as UpdateItemBody,
};

/// drive a group's tree is rooted in, provisioned on first use
pub struct RetrieveDefaultDrive {
    group_id: ids::GroupId
}

impl RetrieveDefaultDrive {
    pub fn group(group_id: ids::GroupId) -> Self {
        RetrieveDefaultDrive { group_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<DefaultDrive>, RequestError> {
        let res = client.get(format!("/explorer/groups/{}/default-drive", self.group_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(res.json().await?)),
            reqwest::StatusCode::NOT_FOUND => {
                let err: ApiError = res.json().await?;

                if *err.kind() == ApiErrorKind::Explorer(ExplorerKind::GroupNotFound) {
                    return Ok(None);
                }

                Err(RequestError::Api(err))
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// listing of a folder. the drive root is addressed by its drive id.
pub struct QueryChildren {
    parent_id: ids::FolderId
}

impl QueryChildren {
    pub fn id(parent_id: ids::FolderId) -> Self {
        QueryChildren { parent_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<Children>, RequestError> {
        let res = client.get(format!("/explorer/folders/{}/children", self.parent_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(res.json().await?)),
            reqwest::StatusCode::NOT_FOUND => {
                let err: ApiError = res.json().await?;

                if *err.kind() == ApiErrorKind::Explorer(ExplorerKind::FolderNotFound) {
                    return Ok(None);
                }

                Err(RequestError::Api(err))
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct QueryDeleted {
    drive_id: ids::DriveId
}

impl QueryDeleted {
    pub fn drive(drive_id: ids::DriveId) -> Self {
        QueryDeleted { drive_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<Deleted>, RequestError> {
        let res = client.get(format!("/explorer/drives/{}/deleted", self.drive_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(res.json().await?)),
            reqwest::StatusCode::NOT_FOUND => {
                let err: ApiError = res.json().await?;

                if *err.kind() == ApiErrorKind::Explorer(ExplorerKind::DriveNotFound) {
                    return Ok(None);
                }

                Err(RequestError::Api(err))
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct RetrieveItemPath {
    item_id: ids::ItemId
}

impl RetrieveItemPath {
    pub fn id(item_id: ids::ItemId) -> Self {
        RetrieveItemPath { item_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<EntityPath>, RequestError> {
        let res = client.get(format!("/explorer/items/{}/path", self.item_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(res.json().await?)),
            reqwest::StatusCode::NOT_FOUND => {
                let err: ApiError = res.json().await?;

                if *err.kind() == ApiErrorKind::Explorer(ExplorerKind::ItemNotFound) {
                    return Ok(None);
                }

                Err(RequestError::Api(err))
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct RetrieveFolderPath {
    folder_id: ids::FolderId
}

impl RetrieveFolderPath {
    pub fn id(folder_id: ids::FolderId) -> Self {
        RetrieveFolderPath { folder_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<EntityPath>, RequestError> {
        let res = client.get(format!("/explorer/folders/{}/path", self.folder_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(Some(res.json().await?)),
            reqwest::StatusCode::NOT_FOUND => {
                let err: ApiError = res.json().await?;

                if *err.kind() == ApiErrorKind::Explorer(ExplorerKind::FolderNotFound) {
                    return Ok(None);
                }

                Err(RequestError::Api(err))
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct CreateFolder {
    parent_folder_id: ids::FolderId,
    body: CreateFolderBody
}

impl CreateFolder {
    pub fn name<N>(parent_folder_id: ids::FolderId, name: N) -> Self
    where
        N: Into<String>
    {
        CreateFolder {
            parent_folder_id,
            body: CreateFolderBody {
                name: name.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Folder, RequestError> {
        self.body.assert_ok()?;

        let res = client.post(format!("/explorer/folders/{}", self.parent_folder_id))
            .json(&self.body)
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::CREATED => Ok(res.json().await?),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct UpdateFolder {
    folder_id: ids::FolderId,
    body: UpdateFolderBody
}

impl UpdateFolder {
    pub fn name<N>(folder_id: ids::FolderId, name: N) -> Self
    where
        N: Into<String>
    {
        UpdateFolder {
            folder_id,
            body: UpdateFolderBody {
                name: name.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Folder, RequestError> {
        self.body.assert_ok()?;

        let res = client.patch(format!("/explorer/folders/{}", self.folder_id))
            .json(&self.body)
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(res.json().await?),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct UpdateItem {
    item_id: ids::ItemId,
    body: UpdateItemBody
}

impl UpdateItem {
    pub fn name<N>(item_id: ids::ItemId, name: N) -> Self
    where
        N: Into<String>
    {
        UpdateItem {
            item_id,
            body: UpdateItemBody {
                name: name.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Item, RequestError> {
        self.body.assert_ok()?;

        let res = client.patch(format!("/explorer/items/{}", self.item_id))
            .json(&self.body)
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(res.json().await?),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// re-parents an item or a folder under a destination folder
pub struct MoveEntity {
    body: MoveEntityBody
}

impl MoveEntity {
    pub fn to<T>(target_id: T, destination_folder_id: ids::FolderId) -> Self
    where
        T: Into<String>
    {
        MoveEntity {
            body: MoveEntityBody {
                target_id: target_id.into(),
                destination_folder_id
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post("/explorer/move")
            .json(&self.body)
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// creates a second placement of the item's asset under the destination,
/// leaving the original in place
pub struct BorrowItem {
    item_id: ids::ItemId,
    body: BorrowItemBody
}

impl BorrowItem {
    pub fn to(item_id: ids::ItemId, destination_folder_id: ids::FolderId) -> Self {
        BorrowItem {
            item_id,
            body: BorrowItemBody {
                destination_folder_id
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Item, RequestError> {
        let res = client.post(format!("/explorer/items/{}/borrow", self.item_id))
            .json(&self.body)
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::CREATED => Ok(res.json().await?),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// moves an item to its drive's trash
pub struct TrashItem {
    item_id: ids::ItemId
}

impl TrashItem {
    pub fn id(item_id: ids::ItemId) -> Self {
        TrashItem { item_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.delete(format!("/explorer/items/{}", self.item_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// moves a folder and everything below it to its drive's trash
pub struct TrashFolder {
    folder_id: ids::FolderId
}

impl TrashFolder {
    pub fn id(folder_id: ids::FolderId) -> Self {
        TrashFolder { folder_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.delete(format!("/explorer/folders/{}", self.folder_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

/// permanently deletes everything in the drive's trash
pub struct PurgeDrive {
    drive_id: ids::DriveId
}

impl PurgeDrive {
    pub fn drive(drive_id: ids::DriveId) -> Self {
        PurgeDrive { drive_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.delete(format!("/explorer/drives/{}/purge", self.drive_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

use async_trait::async_trait;

use ras_api::assets::Permissions;
use ras_api::client::assets::RawData;
use ras_api::client::error::RequestError;
use ras_api::client::ApiClient;
use ras_api::explorer::{Children, DefaultDrive, Deleted, EntityPath, Folder, Item};

/// the asset-store API as the explorer consumes it. `ApiClient` is the
/// production implementation; tests substitute an in-memory store.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn default_drive(&self, group_id: &str) -> Result<Option<DefaultDrive>, RequestError>;

    async fn children(&self, parent_id: &str) -> Result<Option<Children>, RequestError>;

    async fn deleted(&self, drive_id: &str) -> Result<Option<Deleted>, RequestError>;

    async fn item_path(&self, item_id: &str) -> Result<Option<EntityPath>, RequestError>;

    async fn folder_path(&self, folder_id: &str) -> Result<Option<EntityPath>, RequestError>;

    async fn create_folder(&self, parent_folder_id: &str, name: &str) -> Result<Folder, RequestError>;

    async fn rename_folder(&self, folder_id: &str, name: &str) -> Result<Folder, RequestError>;

    async fn rename_item(&self, item_id: &str, name: &str) -> Result<Item, RequestError>;

    async fn move_entity(&self, target_id: &str, destination_folder_id: &str) -> Result<(), RequestError>;

    async fn borrow_item(&self, item_id: &str, destination_folder_id: &str) -> Result<Item, RequestError>;

    async fn trash_item(&self, item_id: &str) -> Result<(), RequestError>;

    async fn trash_folder(&self, folder_id: &str) -> Result<(), RequestError>;

    async fn purge_drive(&self, drive_id: &str) -> Result<(), RequestError>;

    async fn item_permissions(&self, asset_id: &str) -> Result<Permissions, RequestError>;

    async fn raw_data(&self, raw_id: &str) -> Result<RawData, RequestError>;

    async fn upload_asset(&self, asset_id: &str) -> Result<(), RequestError>;
}

#[async_trait]
impl AssetStore for ApiClient {
    async fn default_drive(&self, group_id: &str) -> Result<Option<DefaultDrive>, RequestError> {
        ras_api::client::explorer::RetrieveDefaultDrive::group(group_id.into())
            .send(self)
            .await
    }

    async fn children(&self, parent_id: &str) -> Result<Option<Children>, RequestError> {
        ras_api::client::explorer::QueryChildren::id(parent_id.into())
            .send(self)
            .await
    }

    async fn deleted(&self, drive_id: &str) -> Result<Option<Deleted>, RequestError> {
        ras_api::client::explorer::QueryDeleted::drive(drive_id.into())
            .send(self)
            .await
    }

    async fn item_path(&self, item_id: &str) -> Result<Option<EntityPath>, RequestError> {
        ras_api::client::explorer::RetrieveItemPath::id(item_id.into())
            .send(self)
            .await
    }

    async fn folder_path(&self, folder_id: &str) -> Result<Option<EntityPath>, RequestError> {
        ras_api::client::explorer::RetrieveFolderPath::id(folder_id.into())
            .send(self)
            .await
    }

    async fn create_folder(&self, parent_folder_id: &str, name: &str) -> Result<Folder, RequestError> {
        ras_api::client::explorer::CreateFolder::name(parent_folder_id.into(), name)
            .send(self)
            .await
    }

    async fn rename_folder(&self, folder_id: &str, name: &str) -> Result<Folder, RequestError> {
        ras_api::client::explorer::UpdateFolder::name(folder_id.into(), name)
            .send(self)
            .await
    }

    async fn rename_item(&self, item_id: &str, name: &str) -> Result<Item, RequestError> {
        ras_api::client::explorer::UpdateItem::name(item_id.into(), name)
            .send(self)
            .await
    }

    async fn move_entity(&self, target_id: &str, destination_folder_id: &str) -> Result<(), RequestError> {
        ras_api::client::explorer::MoveEntity::to(target_id, destination_folder_id.into())
            .send(self)
            .await
    }

    async fn borrow_item(&self, item_id: &str, destination_folder_id: &str) -> Result<Item, RequestError> {
        ras_api::client::explorer::BorrowItem::to(item_id.into(), destination_folder_id.into())
            .send(self)
            .await
    }

    async fn trash_item(&self, item_id: &str) -> Result<(), RequestError> {
        ras_api::client::explorer::TrashItem::id(item_id.into())
            .send(self)
            .await
    }

    async fn trash_folder(&self, folder_id: &str) -> Result<(), RequestError> {
        ras_api::client::explorer::TrashFolder::id(folder_id.into())
            .send(self)
            .await
    }

    async fn purge_drive(&self, drive_id: &str) -> Result<(), RequestError> {
        ras_api::client::explorer::PurgeDrive::drive(drive_id.into())
            .send(self)
            .await
    }

    async fn item_permissions(&self, asset_id: &str) -> Result<Permissions, RequestError> {
        ras_api::client::assets::RetrievePermissions::asset(asset_id.into())
            .send(self)
            .await
    }

    async fn raw_data(&self, raw_id: &str) -> Result<RawData, RequestError> {
        ras_api::client::assets::RetrieveRawData::raw(raw_id.into())
            .send(self)
            .await
    }

    async fn upload_asset(&self, asset_id: &str) -> Result<(), RequestError> {
        ras_api::client::environment::UploadAsset::asset(asset_id.into())
            .send(self)
            .await
    }
}

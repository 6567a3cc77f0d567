use ras_lib::ids;

use crate::client::error::RequestError;
use crate::client::ApiClient;

/// asks a locally running environment to publish an asset to the remote
/// network. only meaningful when the server runs in local mode.
pub struct UploadAsset {
    asset_id: ids::AssetId
}

impl UploadAsset {
    pub fn asset(asset_id: ids::AssetId) -> Self {
        UploadAsset { asset_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.post(format!("/admin/environment/upload/{}", self.asset_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK | reqwest::StatusCode::ACCEPTED => Ok(()),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

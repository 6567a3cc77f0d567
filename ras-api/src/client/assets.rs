use ras_lib::ids;

use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::assets::Permissions;

/// effective permissions of the current user on one asset. failures are
/// returned as-is; callers decide whether to fail closed.
pub struct RetrievePermissions {
    asset_id: ids::AssetId
}

impl RetrievePermissions {
    pub fn asset(asset_id: ids::AssetId) -> Self {
        RetrievePermissions { asset_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Permissions, RequestError> {
        let res = client.get(format!("/assets/{}/permissions", self.asset_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => Ok(res.json().await?),
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

pub struct RawData {
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

pub struct RetrieveRawData {
    raw_id: ids::RawId
}

impl RetrieveRawData {
    pub fn raw(raw_id: ids::RawId) -> Self {
        RetrieveRawData { raw_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<RawData, RequestError> {
        let res = client.get(format!("/raw/data/{}", self.raw_id))
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => {
                let content_type = res.headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<mime::Mime>().ok())
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM);
                let bytes = res.bytes().await?;

                Ok(RawData {
                    content_type,
                    bytes: bytes.to_vec()
                })
            },
            _ => Err(RequestError::Api(res.json().await?))
        }
    }
}

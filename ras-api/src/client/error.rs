use crate::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error)
}

impl RequestError {
    pub fn as_api(self) -> Result<ApiError, reqwest::Error> {
        match self {
            RequestError::Api(v) => Ok(v),
            RequestError::Reqwest(v) => Err(v)
        }
    }
}

use reqwest::RequestBuilder;
use url::Url;

pub mod error;
pub mod explorer;
pub mod assets;
pub mod environment;

use error::ApiClientError;

pub struct Info {
    pub url: Url
}

pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) info: Info
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: Url::parse("http://localhost/").unwrap(),
            agent: None
        }
    }

    pub fn url(&self) -> &Url {
        &self.info.url
    }

    pub(crate) fn get<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>,
    {
        let url = self.info.url.join(path.as_ref()).unwrap();

        self.client.get(url)
    }

    pub(crate) fn post<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>
    {
        let url = self.info.url.join(path.as_ref()).unwrap();

        self.client.post(url)
    }

    pub(crate) fn patch<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>
    {
        let url = self.info.url.join(path.as_ref()).unwrap();

        self.client.patch(url)
    }

    pub(crate) fn delete<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>
    {
        let url = self.info.url.join(path.as_ref()).unwrap();

        self.client.delete(url)
    }
}

pub struct ApiClientBuilder {
    url: Url,
    agent: Option<String>
}

impl ApiClientBuilder {
    pub fn secure(&mut self, is_secure: bool) {
        if is_secure {
            self.url.set_scheme("https").unwrap();
        } else {
            self.url.set_scheme("http").unwrap();
        }
    }

    pub fn host<H>(&mut self, host: H) -> bool
    where
        H: AsRef<str>
    {
        self.url.set_host(Some(host.as_ref())).is_ok()
    }

    pub fn port(&mut self, port: Option<u16>) {
        self.url.set_port(port).unwrap()
    }

    pub fn user_agent<U>(&mut self, user_agent: U)
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let user_agent = self.agent.unwrap_or("ras-api-client/0.1.0".into());
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            client,
            info: Info {
                url: self.url
            }
        })
    }
}

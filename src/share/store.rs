use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::ShareConfig;
use crate::share::types::ShareError;

/// Remote key-value store holding shared annotation sets.
///
/// Last write wins; ids are generated client-side and there is no auth.
#[async_trait]
pub trait ShareStore: Send + Sync {
    async fn save(&self, id: &str, payload: &Value) -> Result<(), ShareError>;
    async fn load(&self, id: &str) -> Result<Value, ShareError>;
}

/// [`ShareStore`] talking to the HTTP endpoint: `POST {base}{id}` stores a
/// JSON body, `GET {base}{id}` returns it.
pub struct HttpShareStore {
    client: Client,
    base: String,
}

impl HttpShareStore {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, ShareError> {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pagemark/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &ShareConfig) -> Result<Self, ShareError> {
        Self::new(
            config.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self, id: &str) -> String {
        format!("{}{}", self.base, id)
    }
}

#[async_trait]
impl ShareStore for HttpShareStore {
    async fn save(&self, id: &str, payload: &Value) -> Result<(), ShareError> {
        let url = self.endpoint(id);
        log::debug!("Saving shared annotations to {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!("Error saving annotations: HTTP {}", status);
            return Err(ShareError::Status(status.as_u16()));
        }
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Value, ShareError> {
        let url = self.endpoint(id);
        log::debug!("Loading shared annotations from {}", url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ShareError::NotFound(id.to_string())),
            status if !status.is_success() => {
                log::error!("Error loading annotations: HTTP {}", status);
                Err(ShareError::Status(status.as_u16()))
            }
            _ => Ok(response.json::<Value>().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_id_to_base() {
        let store = HttpShareStore::new("https://store.example.com/sets", Duration::from_secs(5)).unwrap();
        assert_eq!(store.endpoint("abc"), "https://store.example.com/sets/abc");

        let store = HttpShareStore::from_config(&ShareConfig::default()).unwrap();
        assert_eq!(
            store.endpoint("k3j9"),
            "https://annotateweb.maximsurfly.workers.dev/k3j9"
        );
    }
}

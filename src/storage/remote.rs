use super::{AppError, Contact, ContactBackend, ContactId, UserId};
use crate::domain::ContactFields;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

/// Backend talking to an HTTP document store.
///
/// Contacts live under `{base}/users/{user}/contacts`. When an API key is
/// configured it travels as the `apiKey` query parameter on every request.
pub struct RemoteBackend {
    pub base_url: Url,
    api_key: Option<String>,
    client: Client,
}

impl RemoteBackend {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "{} cannot be used as a base url",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// `{base}/users/{user}/contacts[/{id}]`, each segment percent-encoded.
    pub fn contacts_url(&self, user: &UserId, id: Option<&ContactId>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config("remote url cannot be a base".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["users", user.as_str(), "contacts"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("apiKey", key);
        }
        Ok(url)
    }

    async fn send<T: serde::de::DeserializeOwned>(request: RequestBuilder) -> Result<T, AppError> {
        // Non-success statuses become `reqwest::Error`, i.e. `AppError::FailedRequest`
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ContactBackend for RemoteBackend {
    async fn list(&self, user: &UserId) -> Result<Vec<Contact>, AppError> {
        let url = self.contacts_url(user, None)?;
        Self::send(self.client.get(url)).await
    }

    async fn create(
        &self,
        user: &UserId,
        name: &str,
        phone_number: &str,
    ) -> Result<Contact, AppError> {
        let url = self.contacts_url(user, None)?;
        let body = ContactFields {
            name: name.to_string(),
            phone_number: phone_number.to_string(),
        };
        Self::send(self.client.post(url).json(&body)).await
    }

    async fn update(
        &self,
        user: &UserId,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, AppError> {
        let url = self.contacts_url(user, Some(id))?;
        let body = ContactFields {
            name: name.to_string(),
            phone_number: phone_number.to_string(),
        };
        Self::send(self.client.put(url).json(&body)).await
    }

    async fn delete(&self, user: &UserId, id: &ContactId) -> Result<Vec<Contact>, AppError> {
        let url = self.contacts_url(user, Some(id))?;
        Self::send(self.client.delete(url)).await
    }

    fn get_medium(&self) -> &str {
        "remote"
    }
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| !u.cannot_be_a_base())
}

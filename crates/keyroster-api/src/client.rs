//! Accounts resource client.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{Account, AccountId};

/// Operations offered by the accounts resource.
///
/// Each call is a single request with no local side effects. Failures are
/// returned as-is; nothing is retried.
pub trait AccountApi {
    /// Fetch every account, in server order.
    fn list(&self) -> impl Future<Output = Result<Vec<Account>>> + Send;

    /// Create an account and return the server's representation of it.
    fn create(&self, account: &Account) -> impl Future<Output = Result<Account>> + Send;

    /// Replace the account identified by `account.id`.
    fn update(&self, account: &Account) -> impl Future<Output = Result<()>> + Send;

    /// Delete the account with the given id.
    fn delete(&self, id: &AccountId) -> impl Future<Output = Result<()>> + Send;
}

/// Connection settings for [`AccountsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root; the resource lives at `{base_url}/accounts`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Backend root used when nothing else is configured.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3001";

    /// Request timeout used when nothing else is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given backend root.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the `/accounts` resource.
#[derive(Debug, Clone)]
pub struct AccountsClient {
    base_url: Url,
    http_client: Client,
}

impl AccountsClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        let client = Self {
            base_url: config.base_url.clone(),
            http_client,
        };

        // Reject unusable base URLs up front rather than on first request.
        client.resource_url(None)?;
        Ok(client)
    }

    /// Backend root this client talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/accounts` or `{base}/accounts/{id}`.
    fn resource_url(&self, id: Option<&AccountId>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("accounts");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

impl AccountApi for AccountsClient {
    async fn list(&self) -> Result<Vec<Account>> {
        let url = self.resource_url(None)?;
        debug!(%url, "GET accounts");

        let response = self.http_client.get(url).send().await?;
        decode(check_status(response).await?).await
    }

    async fn create(&self, account: &Account) -> Result<Account> {
        let url = self.resource_url(None)?;
        debug!(%url, login = %account.login, "POST account");

        let response = self.http_client.post(url).json(account).send().await?;
        decode(check_status(response).await?).await
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let id = account.id.as_ref().ok_or(Error::MissingId)?;
        let url = self.resource_url(Some(id))?;
        debug!(%url, "PUT account");

        let response = self.http_client.put(url).json(account).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<()> {
        let url = self.resource_url(Some(id))?;
        debug!(%url, "DELETE account");

        let response = self.http_client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turns non-2xx responses into [`Error::Status`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

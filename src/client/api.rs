use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::{
    TransactionId,
    endpoints::{self, format_endpoint},
    transaction::{Transaction, TransactionFields},
};

/// The errors the API client can run into.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("{message} ({status})")]
    Api {
        /// The HTTP status code of the response.
        status: u16,
        /// The error message from the response body.
        message: String,
    },
}

/// The operations the transactions view needs from the API.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Fetch every transaction, newest first.
    async fn list(&self) -> Result<Vec<Transaction>, ClientError>;

    /// Fetch a single transaction.
    async fn get(&self, id: TransactionId) -> Result<Transaction, ClientError>;

    /// Create a transaction from a complete set of fields.
    async fn create(&self, fields: &TransactionFields) -> Result<Transaction, ClientError>;

    /// Change only the fields that are set in `fields`.
    async fn update(
        &self,
        id: TransactionId,
        fields: &TransactionFields,
    ) -> Result<Transaction, ClientError>;

    /// Delete a transaction.
    async fn delete(&self, id: TransactionId) -> Result<(), ClientError>;
}

/// Talks to the transactions API over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`, e.g.
    /// "http://localhost:3000".
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn transaction_url(&self, id: TransactionId) -> String {
        self.url(&format_endpoint(endpoints::TRANSACTION, id))
    }
}

/// Turn an error status into [ClientError::Api], using the API's error
/// message when the body has one.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TransactionApi for ApiClient {
    async fn list(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self
            .client
            .get(self.url(endpoints::TRANSACTIONS))
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn get(&self, id: TransactionId) -> Result<Transaction, ClientError> {
        let response = self.client.get(self.transaction_url(id)).send().await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn create(&self, fields: &TransactionFields) -> Result<Transaction, ClientError> {
        let response = self
            .client
            .post(self.url(endpoints::TRANSACTIONS))
            .json(fields)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn update(
        &self,
        id: TransactionId,
        fields: &TransactionFields,
    ) -> Result<Transaction, ClientError> {
        let response = self
            .client
            .patch(self.transaction_url(id))
            .json(fields)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn delete(&self, id: TransactionId) -> Result<(), ClientError> {
        let response = self.client.delete(self.transaction_url(id)).send().await?;
        check_status(response).await?;

        Ok(())
    }
}

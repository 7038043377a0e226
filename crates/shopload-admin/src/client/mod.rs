//! HTTP transport for the Shopify GraphQL Admin API.

mod lookup;
mod mutations;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::AdminError;
use crate::retry::{is_transient, retry_transient, Attempt, RetryPolicy};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one store's GraphQL Admin endpoint.
///
/// Every call goes through [`AdminClient::execute`], which owns the retry
/// policy; callers never retry on their own.
pub struct AdminClient {
    client: Client,
    endpoint: Url,
    access_token: String,
    retry: RetryPolicy,
}

impl AdminClient {
    /// Creates a client for the endpoint and credentials in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AdminError::InvalidEndpoint`] if the
    /// derived endpoint is not a valid URL.
    pub fn new(config: &shopload_core::ImportConfig) -> Result<Self, AdminError> {
        Self::with_endpoint(
            &config.endpoint(),
            &config.access_token,
            config.request_timeout_secs,
            &config.user_agent,
            RetryPolicy::from_config(config),
        )
    }

    /// Creates a client against an explicit endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AdminError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| AdminError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
            retry,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Executes one GraphQL operation and returns its `data` object.
    ///
    /// Statuses 429/500/502/503/504 are retried with exponential backoff up
    /// to the configured attempt cap.
    ///
    /// # Errors
    ///
    /// - [`AdminError::GraphQl`]: HTTP 200 whose body has an `errors` key (not retried).
    /// - [`AdminError::TransportExhausted`]: every attempt got a transient status.
    /// - [`AdminError::Transport`]: any other non-200 status (not retried).
    /// - [`AdminError::Http`]: network or TLS failure (not retried).
    /// - [`AdminError::Deserialize`]: the 200 body is not valid JSON.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, AdminError> {
        let payload = json!({ "query": query, "variables": variables });

        retry_transient(&self.retry, || {
            let payload = &payload;
            async move {
                tracing::debug!(endpoint = %self.endpoint, "sending Admin API request");
                let response = self
                    .client
                    .post(self.endpoint.clone())
                    .header(ACCESS_TOKEN_HEADER, &self.access_token)
                    .json(payload)
                    .send()
                    .await?;

                let status = response.status();
                if status == StatusCode::OK {
                    let body = response.text().await?;
                    return Self::parse_body(&body).map(Attempt::Done);
                }
                if is_transient(status) {
                    return Ok(Attempt::Transient(status));
                }

                let body = response.text().await.unwrap_or_default();
                Err(AdminError::Transport {
                    status: status.as_u16(),
                    body,
                })
            }
        })
        .await
    }

    /// Executes an operation and decodes its `data` object into `T`.
    pub(crate) async fn execute_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        context: &str,
    ) -> Result<T, AdminError> {
        let data = self.execute(query, variables).await?;
        serde_json::from_value(data).map_err(|e| AdminError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Splits a 200 response body into `data` or a GraphQL error list.
    fn parse_body(body: &str) -> Result<Value, AdminError> {
        let mut envelope: Value =
            serde_json::from_str(body).map_err(|e| AdminError::Deserialize {
                context: "Admin API response body".to_owned(),
                source: e,
            })?;

        if let Some(errors) = envelope
            .get_mut("errors")
            .map(Value::take)
            .filter(|errors| !errors.is_null())
        {
            let errors = match errors {
                Value::Array(list) => list,
                other => vec![other],
            };
            return Err(AdminError::GraphQl { errors });
        }

        Ok(envelope.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;

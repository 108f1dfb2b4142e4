use actix_broker::{Broker, SystemBroker};
use once_cell::sync::OnceCell;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::*;

use tuneforge_api::error::ErrorEnvelope;
use tuneforge_api::ApiError;

use crate::credentials::TokenCell;
use crate::session::NotifyAuthExpired;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

pub fn get_http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(reqwest::Client::new)
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    tokens:   TokenCell,
}

impl ApiClient {
    pub fn new(mut base_url: Url, tokens: TokenCell) -> Self {
        // endpoint paths are joined relative to the base, which only works
        // with a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { base_url, tokens }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenCell {
        &self.tokens
    }

    pub(crate) async fn get<R>(&self, path: &str) -> Result<R, ApiError>
        where R: DeserializeOwned
    {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
        where B: Serialize,
              R: DeserializeOwned
    {
        self.request(Method::POST, path, Some(to_body(body)?)).await
    }

    pub(crate) async fn post_empty<R>(&self, path: &str) -> Result<R, ApiError>
        where R: DeserializeOwned
    {
        self.request(Method::POST, path, None).await
    }

    pub(crate) async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
        where B: Serialize,
              R: DeserializeOwned
    {
        self.request(Method::PUT, path, Some(to_body(body)?)).await
    }

    pub(crate) async fn delete<R>(&self, path: &str) -> Result<R, ApiError>
        where R: DeserializeOwned
    {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<R>(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<R, ApiError>
        where R: DeserializeOwned
    {
        let url = self.base_url
                      .join(path)
                      .map_err(|err| ApiError::Network(err.to_string()))?;

        let mut builder = get_http_client().request(method, url);

        if let Some(token) = self.tokens.access_token() {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send()
                              .await
                              .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<R>()
                           .await
                           .map_err(|err| ApiError::Network(err.to_string()));
        }

        let message = response.json::<ErrorEnvelope>().await.ok().map(|envelope| envelope.error);
        let error = ApiError::from_status(status.as_u16(), message);

        // global policy, not per-call: an expired or invalid token signs the
        // whole client out exactly once
        if status == StatusCode::UNAUTHORIZED {
            debug!(%path, "unauthorized response, forcing sign-out");
            Broker::<SystemBroker>::issue_async(NotifyAuthExpired);
        }

        Err(error)
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Network(err.to_string()))
}

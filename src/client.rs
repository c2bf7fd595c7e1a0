use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::{GiftGenixError, Result};
use crate::interfaces::service::{
    ApiKeyUpdate, Credentials, GenerateRequest, GenerateResponse, GenerationService,
    LoginResponse, UpdateKeyResponse,
};

pub const GENERATE_PATH: &str = "/generate";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const UPDATE_KEY_PATH: &str = "/admin/update-key";

/// JSON-over-HTTP client for the generation service.
#[derive(Clone, Debug)]
pub struct HttpGenerationClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpGenerationClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GiftGenixError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POSTs `body` and decodes the reply. Non-2xx statuses are errors.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "sending request");
        let response = self
            .client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| GiftGenixError::Http(format!("POST {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GiftGenixError::Http(format!(
                "POST {path} returned {status}: {}",
                detail.trim()
            )));
        }

        let payload = response.json::<R>().await.map_err(|e| {
            GiftGenixError::Serialization(format!("POST {path} returned invalid json: {e}"))
        })?;
        info!(path, status = status.as_u16(), "request completed");
        Ok(payload)
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.post_json(GENERATE_PATH, request).await
    }

    async fn admin_login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.post_json(ADMIN_LOGIN_PATH, credentials).await
    }

    async fn update_key(&self, update: &ApiKeyUpdate) -> Result<UpdateKeyResponse> {
        self.post_json(UPDATE_KEY_PATH, update).await
    }
}

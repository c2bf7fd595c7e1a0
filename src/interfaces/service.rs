use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Body of a `/generate` reply. The service answers HTTP 200 for its own
/// failures and puts the reason in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyUpdate {
    pub new_key: String,
}

impl ApiKeyUpdate {
    pub fn new(new_key: impl Into<String>) -> Self {
        Self {
            new_key: new_key.into(),
        }
    }
}

impl fmt::Debug for ApiKeyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyUpdate")
            .field("new_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateKeyResponse {
    #[serde(default)]
    pub message: String,
}

/// The remote generation service. Any `Err` is a transport-level failure;
/// service-level failures arrive inside the response bodies.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
    async fn admin_login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    async fn update_key(&self, update: &ApiKeyUpdate) -> Result<UpdateKeyResponse>;
}

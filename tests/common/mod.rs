#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use giftgenix::error::{GiftGenixError, Result};
use giftgenix::interfaces::notice::RecordingNotifier;
use giftgenix::interfaces::service::{
    ApiKeyUpdate, Credentials, GenerateRequest, GenerateResponse, GenerationService,
    LoginResponse, UpdateKeyResponse,
};

#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Fail,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Fail => Err(GiftGenixError::Http("connection refused".to_string())),
        }
    }
}

/// In-memory service with canned replies. When gated, each call signals
/// `started` and then waits for `release`.
pub struct ScriptedService {
    generate: Reply<GenerateResponse>,
    login: Reply<LoginResponse>,
    update: Reply<UpdateKeyResponse>,
    gated: bool,
    pub started: Notify,
    pub release: Notify,
    generate_calls: AtomicUsize,
    login_calls: AtomicUsize,
    update_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    keys: Mutex<Vec<String>>,
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self {
            generate: Reply::Ok(GenerateResponse::default()),
            login: Reply::Ok(LoginResponse { success: true }),
            update: Reply::Ok(UpdateKeyResponse {
                message: "API key updated".to_string(),
            }),
            gated: false,
            started: Notify::new(),
            release: Notify::new(),
            generate_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, result: &str) -> Self {
        self.generate = Reply::Ok(GenerateResponse {
            result: Some(result.to_string()),
            error: None,
        });
        self
    }

    pub fn with_service_error(mut self, error: &str) -> Self {
        self.generate = Reply::Ok(GenerateResponse {
            result: None,
            error: Some(error.to_string()),
        });
        self
    }

    pub fn with_generate_failure(mut self) -> Self {
        self.generate = Reply::Fail;
        self
    }

    pub fn with_login(mut self, reply: Reply<LoginResponse>) -> Self {
        self.login = reply;
        self
    }

    pub fn with_update(mut self, reply: Reply<UpdateKeyResponse>) -> Self {
        self.update = reply;
        self
    }

    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.generate_calls() + self.login_calls() + self.update_calls()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    async fn wait_for_release(&self) {
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.wait_for_release().await;
        self.generate.clone().into_result()
    }

    async fn admin_login(&self, _credentials: &Credentials) -> Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        self.login.clone().into_result()
    }

    async fn update_key(&self, update: &ApiKeyUpdate) -> Result<UpdateKeyResponse> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(update.new_key.clone());
        self.wait_for_release().await;
        self.update.clone().into_result()
    }
}

pub fn service(service: ScriptedService) -> (Arc<ScriptedService>, Arc<RecordingNotifier>) {
    (Arc::new(service), Arc::new(RecordingNotifier::new()))
}

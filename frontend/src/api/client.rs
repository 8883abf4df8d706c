use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{cell::RefCell, rc::Rc};

use crate::{
    api::types::*,
    config,
    utils::{navigation, return_url, storage},
};

const SESSION_STORAGE_KEY: &str = "training_center_session";

/// HTTP client for the hosted backend. Clones share the signed-in session.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    session: Rc<RefCell<Option<Session>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            api_key: None,
            session: Rc::new(RefCell::new(load_stored_session())),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            api_key: None,
            session: Rc::new(RefCell::new(None)),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub(crate) fn store_session(&self, session: Session) {
        if let Ok(json) = serde_json::to_string(&session) {
            if let Err(err) = storage::write_item(SESSION_STORAGE_KEY, &json) {
                log::warn!("Session not persisted: {}", err);
            }
        }
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn clear_session(&self) {
        storage::remove_item(SESSION_STORAGE_KEY);
        *self.session.borrow_mut() = None;
    }

    async fn resolved_config(&self) -> (String, Option<String>) {
        match &self.base_url {
            Some(base) => (
                base.trim_end_matches('/').to_string(),
                self.api_key.clone(),
            ),
            None => {
                let runtime = config::await_runtime_config().await;
                let key = self.api_key.clone().or(runtime.api_key.clone());
                (runtime.base_url().to_string(), key)
            }
        }
    }

    /// Builds a request against `{base}{path}` carrying the api key and, when
    /// signed in, the bearer token.
    pub(crate) async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> RequestBuilder {
        let (base_url, api_key) = self.resolved_config().await;
        let mut builder = self.client.request(method, format!("{}{}", base_url, path));
        if let Some(key) = api_key {
            builder = builder.header("apikey", key);
        }
        if let Some(session) = self.session.borrow().as_ref() {
            builder = builder.bearer_auth(&session.access_token);
        }
        builder
    }

    pub(crate) fn require_session(&self) -> Result<(), ApiError> {
        if self.session.borrow().is_some() {
            Ok(())
        } else {
            Err(ApiError::unauthorized("Not signed in"))
        }
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.clear_session();
            Self::redirect_to_login_if_needed();
        }
    }

    fn redirect_to_login_if_needed() {
        if let Some(path) = navigation::current_path() {
            if path.starts_with("/login") {
                return;
            }
            navigation::navigate_to(&return_url::login_url_for(&path));
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        self.handle_unauthorized_status(status);
        Err(error_from_response(response).await)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::malformed_response(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await.map(|_| ())
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let fallback = format!("Request failed ({})", status.as_u16());
    let mut error = match response.json::<RemoteErrorBody>().await {
        Ok(body) => body.into_api_error(&fallback),
        Err(_) => ApiError::request_failed(fallback),
    };
    if status == StatusCode::UNAUTHORIZED {
        error.code = "UNAUTHORIZED".to_string();
    }
    error
}

fn load_stored_session() -> Option<Session> {
    let raw = storage::read_item(SESSION_STORAGE_KEY)?;
    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            log::warn!("Discarding unreadable stored session: {}", err);
            storage::remove_item(SESSION_STORAGE_KEY);
            None
        }
    }
}

use crate::api::{ApiClient, ApiError, Session, SessionUser, SignInRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl Default for LoginRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn has_session(&self) -> bool {
        self.client.session().is_some()
    }

    pub async fn sign_in(&self, request: SignInRequest) -> Result<Session, ApiError> {
        self.client.sign_in(request).await
    }

    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.client.current_user().await
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.client.sign_out().await
    }
}

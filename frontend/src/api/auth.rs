use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, Session, SessionUser, SignInRequest},
};

impl ApiClient {
    pub async fn sign_in(&self, request: SignInRequest) -> Result<Session, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/v1/token")
            .await
            .query(&[("grant_type", "password")])
            .json(&request);
        let session: Session = self.send_json(builder).await?;
        self.store_session(session.clone());
        Ok(session)
    }

    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.require_session()?;
        let builder = self.request(Method::GET, "/auth/v1/user").await;
        self.send_json(builder).await
    }

    /// Revokes the session remotely. The local session is dropped even when
    /// the remote call fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if self.require_session().is_err() {
            return Ok(());
        }
        let builder = self.request(Method::POST, "/auth/v1/logout").await;
        let result = self.send_empty(builder).await;
        self.clear_session();
        result
    }
}

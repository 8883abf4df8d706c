//! Process-wide authentication state.
//!
//! `AuthProvider` creates the state once per page load and checks any stored
//! session; components subscribe through the signals returned by `use_auth`.
//! Signing out tears the state back down to anonymous.

use crate::{
    api::{ApiClient, ApiError, SessionUser, SignInRequest},
    pages::login::repository::LoginRepository,
};
use leptos::*;
use std::rc::Rc;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    fn signed_in(&mut self, user: SessionUser) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.loading = false;
    }

    fn signed_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.loading = false;
    }
}

fn repository_from_context() -> LoginRepository {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    LoginRepository::new_with_client(Rc::new(api))
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    let repo = repository_from_context();
    if !repo.has_session() {
        return (auth_state, set_auth_state);
    }

    set_auth_state.update(|state| state.loading = true);
    spawn_local(async move {
        match check_auth_status(&repo).await {
            Ok(user) => set_auth_state.update(|state| state.signed_in(user)),
            Err(err) => {
                log::info!("Stored session rejected: {}", err);
                set_auth_state.update(AuthState::signed_out);
            }
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

async fn check_auth_status(repo: &LoginRepository) -> Result<SessionUser, ApiError> {
    repo.current_user().await
}

pub async fn login_request(
    request: SignInRequest,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match repo.sign_in(request).await {
        Ok(session) => {
            log::info!("Signed in as {}", session.user.id);
            set_auth_state.update(|state| state.signed_in(session.user));
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn logout(
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = repo.sign_out().await;
    if let Err(err) = &result {
        log::warn!("Remote sign-out failed: {}", err);
    }
    set_auth_state.update(AuthState::signed_out);
    result
}

pub fn use_login_action() -> Action<SignInRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = repository_from_context();

    create_action(move |request: &SignInRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = repository_from_context();

    create_action(move |_: &()| {
        let repo = repo.clone();
        async move { logout(&repo, set_auth).await }
    })
}

use super::utils::validate_credentials;
use crate::{
    api::{ApiError, SignInRequest},
    state::auth,
    utils::{navigation, return_url::sanitize_return_url},
};
use leptos::*;
use leptos_router::use_query_map;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    /// Where to go after signing in, already sanitized.
    pub destination: Memo<String>,
    pub login_action: Action<SignInRequest, Result<(), ApiError>>,
}

pub fn use_login_view_model() -> LoginViewModel {
    let query = use_query_map();
    let raw_return = Signal::derive(move || query.with(|q| q.get("returnUrl").cloned()));
    let vm = LoginViewModel::new(raw_return);
    let (auth_state, _set_auth) = auth::use_auth();

    // Covers both an existing session on arrival and a fresh sign-in.
    create_effect(move |_| {
        if auth_state.with(|state| state.is_authenticated) {
            let target = vm.destination.get_untracked();
            log::debug!("Authenticated, continuing to {}", target);
            navigation::navigate_to(&target);
        }
    });

    create_effect(move |_| {
        if let Some(Err(err)) = vm.login_action.value().get() {
            vm.error.set(Some(err));
        }
    });

    vm
}

impl LoginViewModel {
    pub fn new(raw_return: Signal<Option<String>>) -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            error: create_rw_signal(None),
            destination: create_memo(move |_| {
                raw_return.with(|raw| sanitize_return_url(raw.as_deref()))
            }),
            login_action: auth::use_login_action(),
        }
    }

    /// Returns `false` when validation failed or a sign-in is in flight.
    pub fn submit(&self) -> bool {
        if self.login_action.pending().get_untracked() {
            return false;
        }
        let email = self.email.get_untracked();
        let password = self.password.get_untracked();
        if let Err(message) = validate_credentials(&email, &password) {
            self.error.set(Some(ApiError::validation(message)));
            return false;
        }
        self.error.set(None);
        self.login_action.dispatch(SignInRequest {
            email: email.trim().to_string(),
            password,
        });
        true
    }
}

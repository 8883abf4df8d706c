use crate::{
    components::layout::LoadingSpinner,
    state::auth::use_auth,
    utils::{navigation, return_url},
};
use leptos::*;

/// Renders `children` only for signed-in users. Anonymous visitors are sent to
/// the login page with the current path as `returnUrl`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        let current = navigation::current_path().unwrap_or_else(|| "/".to_string());
        navigation::navigate_to(&return_url::login_url_for(&current));
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::RequireAuth,
    pages::{LoginPage, TeachersPage},
    state::auth::AuthProvider,
};

pub const HOME_PATH: &str = "/teachers";

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/teachers"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/teachers"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomeRedirect/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/teachers" view=ProtectedTeachers/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn HomeRedirect() -> impl IntoView {
    view! { <Redirect path=HOME_PATH/> }
}

#[component]
fn ProtectedTeachers() -> impl IntoView {
    view! { <RequireAuth><TeachersPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_include_roster() {
        assert!(ROUTE_PATHS.contains(&"/teachers"));
        assert!(ROUTE_PATHS.contains(&HOME_PATH));
    }

    #[test]
    fn protected_and_public_routes_partition_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        let protected: HashSet<&str> = PROTECTED_ROUTE_PATHS.iter().copied().collect();
        let public: HashSet<&str> = PUBLIC_ROUTE_PATHS.iter().copied().collect();
        assert!(protected.is_disjoint(&public));
        let union: HashSet<&str> = protected.union(&public).copied().collect();
        assert_eq!(union, all);
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}

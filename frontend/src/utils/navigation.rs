//! Full-page navigation helpers. Outside the browser these are no-ops so that
//! view models can be exercised on the host.

#[cfg(target_arch = "wasm32")]
pub fn navigate_to(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(href) {
            log::error!("Navigation to {} failed: {:?}", href, err);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_to(href: &str) {
    log::debug!("navigate_to({}) ignored outside the browser", href);
}

/// Path plus query of the current page, e.g. `/teachers?q=ann`.
#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Option<String> {
    let location = web_sys::window()?.location();
    let pathname = location.pathname().ok()?;
    let search = location.search().unwrap_or_default();
    Some(format!("{}{}", pathname, search))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Option<String> {
    None
}

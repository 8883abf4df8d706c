use leptos::spawn_local;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

/// Browser entry point: logging, runtime config, then the app itself.
pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger was already initialized".into());
    }
    log::info!("Starting Training Center frontend");

    // window.__TRAINING_CENTER_ENV (env.js) wins over ./config.json.
    spawn_local(config::init());

    router::mount_app();
}

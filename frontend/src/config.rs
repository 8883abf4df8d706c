use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "API_KEY")]
    pub api_key: Option<String>,
}

impl RuntimeConfig {
    fn or_default_base_url(mut self) -> Self {
        if self
            .api_base_url
            .as_deref()
            .map(|url| url.trim().is_empty())
            .unwrap_or(true)
        {
            self.api_base_url = Some(DEFAULT_API_BASE_URL.to_string());
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    // Expected shape: window.<name> = { api_base_url: "...", api_key: "..." }
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let lookup = |keys: [&str; 2]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&any, &(*key).into())
                .ok()
                .and_then(|v| v.as_string())
        })
    };
    let config = RuntimeConfig {
        api_base_url: lookup(["API_BASE_URL", "api_base_url"]),
        api_key: lookup(["API_KEY", "api_key"]),
    };
    if config.api_base_url.is_none() && config.api_key.is_none() {
        None
    } else {
        Some(config)
    }
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // env.js takes precedence over the config written by a previous load.
    read_global("__TRAINING_CENTER_ENV").or_else(|| read_global("__TRAINING_CENTER_CONFIG"))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn cache(config: RuntimeConfig) -> RuntimeConfig {
    let config = config.or_default_base_url();
    let _ = RUNTIME_CONFIG.set(config.clone());
    RUNTIME_CONFIG.get().cloned().unwrap_or(config)
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache(existing);
    }
    if let Some(fetched) = fetch_runtime_config().await {
        log::info!("Loaded runtime config from config.json");
        return cache(fetched);
    }
    log::warn!(
        "No runtime config found; falling back to {}",
        DEFAULT_API_BASE_URL
    );
    cache(RuntimeConfig::default())
}

pub async fn init() {
    let config = await_runtime_config().await;
    log::info!("Runtime config initialized (api: {})", config.base_url());
}

//! Browser Storage
//!
//! Token persistence and config overrides in `localStorage`, plus the
//! location bar.

use taskboard_sync::{ConfigError, SyncConfig, TokenStore, View};
use wasm_bindgen::JsValue;

const TOKEN_KEY: &str = "token";
const CONFIG_KEY: &str = "taskboard.config";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Session token kept under `localStorage["token"]`
pub struct LocalStorageTokens;

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.set_item(TOKEN_KEY, token) {
                log::warn!("[STORAGE] token not persisted, session ends on reload: {:?}", err);
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.remove_item(TOKEN_KEY) {
                log::warn!("[STORAGE] stored token not removed: {:?}", err);
            }
        }
    }
}

/// Stored JSON override, or the defaults when none is set
pub fn load_config() -> Result<SyncConfig, ConfigError> {
    match local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten()) {
        Some(raw) => SyncConfig::from_json(&raw),
        None => Ok(SyncConfig::default()),
    }
}

/// View matching the current address, if any
pub fn current_location() -> Option<View> {
    let path = web_sys::window()?.location().pathname().ok()?;
    View::from_path(&path)
}

pub fn push_location(view: View) {
    let Some(window) = web_sys::window() else { return };
    let path = view.path();
    if window.location().pathname().ok().as_deref() == Some(path.as_str()) {
        return;
    }
    if let Ok(history) = window.history() {
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(path.as_str())) {
            log::warn!("[STORAGE] location not updated to {}: {:?}", path, err);
        }
    }
}

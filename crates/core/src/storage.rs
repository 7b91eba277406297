//! Cross-platform key/value storage.
//!
//! - Web: `localStorage`
//! - Desktop: one file per key in the platform-appropriate config directory:
//!   - Linux: `~/.config/agora/`
//!   - macOS: `~/Library/Application Support/agora/`
//!   - Windows: `%APPDATA%\agora\`
//!
//! Values are stored as plain strings so the browser keys stay readable
//! (`token`, `username`, `userId`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Minimal string store the session layer persists into.
pub trait KeyValueStore {
    /// Returns `true` if the write succeeded.
    fn set(&self, key: &str, value: &str) -> bool;
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

/// The platform's persistent store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformStorage;

impl KeyValueStore for PlatformStorage {
    fn set(&self, key: &str, value: &str) -> bool {
        save_raw(key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        load_raw(key)
    }

    fn remove(&self, key: &str) {
        remove_raw(key)
    }
}

/// Process-local store for tests and for running without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn set(&self, key: &str, value: &str) -> bool {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn save_raw(key: &str, value: &str) -> bool {
    local_storage()
        .map(|storage| storage.set_item(key, value).is_ok())
        .unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

// =========================================
// Desktop (native) implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
fn get_config_dir() -> Option<std::path::PathBuf> {
    let app_dir = dirs::config_dir()?.join("agora");
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir).ok()?;
    }
    Some(app_dir)
}

#[cfg(not(target_arch = "wasm32"))]
fn get_file_path(key: &str) -> Option<std::path::PathBuf> {
    let config_dir = get_config_dir()?;
    // Sanitize key to be a valid filename
    let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    Some(config_dir.join(safe_key))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_raw(key: &str, value: &str) -> bool {
    let Some(path) = get_file_path(key) else {
        return false;
    };
    std::fs::write(path, value).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_raw(key: &str) -> Option<String> {
    let path = get_file_path(key)?;
    std::fs::read_to_string(path).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(key: &str) {
    if let Some(path) = get_file_path(key) {
        let _ = std::fs::remove_file(path);
    }
}

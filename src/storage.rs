//! LocalStorage access shared by settings, tuning and high scores
//!
//! Values are JSON strings. On native targets nothing is ever stored and
//! every read comes back empty.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Raw stored string for `key`
#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read(_key: &str) -> Option<String> {
    None
}

/// Store a raw string; returns whether the browser accepted it (quota, privacy mode)
#[cfg(target_arch = "wasm32")]
pub fn write(key: &str, value: &str) -> bool {
    local_storage().is_some_and(|s| s.set_item(key, value).is_ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(_key: &str, _value: &str) -> bool {
    false
}

/// Decode the JSON stored under `key`; unreadable data counts as absent
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = read(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding stored {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => write(key, &json),
        Err(e) => {
            log::error!("Could not encode {}: {}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_native_storage_is_empty() {
        assert!(!save_json("sphere_catch_test", &Settings::default()));
        assert_eq!(load_json::<Settings>("sphere_catch_test"), None);
    }
}

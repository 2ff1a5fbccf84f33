// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed per-camera configuration record.

use crate::host::Storage;

/// Storage keys recognized by the cameras.
pub mod keys {
    /// Stream URL of a generic camera.
    pub const URL: &str = "url";
    /// Stream username.
    pub const USERNAME: &str = "username";
    /// Stream password.
    pub const PASSWORD: &str = "password";
    /// `"true"` disables the audio track.
    pub const NO_AUDIO: &str = "noAudio";
    /// Camera address.
    pub const IP: &str = "ip";
    /// HTTP port override.
    pub const HTTP_PORT: &str = "httpPort";
    /// RTSP port override. No settings entry writes this key.
    pub const RTSP_PORT: &str = "rtspPort";
    /// `"true"` marks a camera reached through an NVR channel.
    pub const IS_ANALOGUE_CAMERA: &str = "isAnalogueCamera";
    /// Replacement for the constructed stream URL.
    pub const RTSP_URL_OVERRIDE: &str = "rtspUrlOverride";
    /// NVR channel of an analogue camera.
    pub const RTSP_CHANNEL: &str = "rtspChannel";
    /// Query suffix appended to an analogue camera URL.
    pub const RTSP_URL_PARAMS: &str = "rtspUrlParams";
}

/// Default HTTP port when none is configured.
pub const DEFAULT_HTTP_PORT: &str = "80";

/// Default RTSP port when none is configured.
pub const DEFAULT_RTSP_PORT: &str = "554";

/// Configuration of one camera, decoded from its string key/value store.
///
/// Absent keys and empty strings both decode to `None` (or `false` for
/// toggles). Toggles decode as `true` only from the literal string `"true"`.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::config::CameraConfig;
/// use rtspcam_lib::host::MemoryStorage;
///
/// let storage = MemoryStorage::with_items([
///     ("ip", "192.168.1.20"),
///     ("noAudio", "true"),
/// ]);
///
/// let config = CameraConfig::load(&storage);
/// assert_eq!(config.ip.as_deref(), Some("192.168.1.20"));
/// assert!(config.no_audio);
/// assert_eq!(config.http_address(), "192.168.1.20:80");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
// Each toggle maps to an independent storage key.
#[allow(clippy::struct_excessive_bools)]
pub struct CameraConfig {
    /// Stream URL of a generic camera.
    pub url: Option<String>,
    /// Stream username.
    pub username: Option<String>,
    /// Stream password.
    pub password: Option<String>,
    /// Audio track disabled.
    pub no_audio: bool,
    /// Camera address.
    pub ip: Option<String>,
    /// HTTP port override, kept as the stored string.
    pub http_port: Option<String>,
    /// RTSP port override, kept as the stored string.
    pub rtsp_port: Option<String>,
    /// Camera reached through an NVR channel.
    pub is_analogue_camera: bool,
    /// Replacement for the constructed stream URL.
    pub rtsp_url_override: Option<String>,
    /// NVR channel of an analogue camera.
    pub rtsp_channel: Option<String>,
    /// Query suffix appended to an analogue camera URL.
    pub rtsp_url_params: Option<String>,
}

impl CameraConfig {
    /// Decodes the configuration from a device store.
    #[must_use]
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            url: read_text(storage, keys::URL),
            username: read_text(storage, keys::USERNAME),
            password: read_text(storage, keys::PASSWORD),
            no_audio: read_flag(storage, keys::NO_AUDIO),
            ip: read_text(storage, keys::IP),
            http_port: read_text(storage, keys::HTTP_PORT),
            rtsp_port: read_text(storage, keys::RTSP_PORT),
            is_analogue_camera: read_flag(storage, keys::IS_ANALOGUE_CAMERA),
            rtsp_url_override: read_text(storage, keys::RTSP_URL_OVERRIDE),
            rtsp_channel: read_text(storage, keys::RTSP_CHANNEL),
            rtsp_url_params: read_text(storage, keys::RTSP_URL_PARAMS),
        }
    }

    /// Encodes the configuration into a device store.
    ///
    /// Fields set to `None` are removed from the store; toggles are written
    /// as `"true"` or `"false"`.
    pub fn store(&self, storage: &dyn Storage) {
        write_text(storage, keys::URL, self.url.as_deref());
        write_text(storage, keys::USERNAME, self.username.as_deref());
        write_text(storage, keys::PASSWORD, self.password.as_deref());
        storage.set_item(keys::NO_AUDIO, self.no_audio.to_string());
        write_text(storage, keys::IP, self.ip.as_deref());
        write_text(storage, keys::HTTP_PORT, self.http_port.as_deref());
        write_text(storage, keys::RTSP_PORT, self.rtsp_port.as_deref());
        storage.set_item(
            keys::IS_ANALOGUE_CAMERA,
            self.is_analogue_camera.to_string(),
        );
        write_text(
            storage,
            keys::RTSP_URL_OVERRIDE,
            self.rtsp_url_override.as_deref(),
        );
        write_text(storage, keys::RTSP_CHANNEL, self.rtsp_channel.as_deref());
        write_text(storage, keys::RTSP_URL_PARAMS, self.rtsp_url_params.as_deref());
    }

    /// Returns `{ip}:{httpPort}`, defaulting the port to 80.
    #[must_use]
    pub fn http_address(&self) -> String {
        format!(
            "{}:{}",
            self.ip.as_deref().unwrap_or_default(),
            self.http_port.as_deref().unwrap_or(DEFAULT_HTTP_PORT)
        )
    }

    /// Returns `{ip}:{rtspPort}`, defaulting the port to 554.
    #[must_use]
    pub fn rtsp_address(&self) -> String {
        format!(
            "{}:{}",
            self.ip.as_deref().unwrap_or_default(),
            self.rtsp_port.as_deref().unwrap_or(DEFAULT_RTSP_PORT)
        )
    }

    /// Returns the override URL, expanded for analogue cameras.
    ///
    /// An analogue camera with a channel is reached at
    /// `{rtspUrlOverride}/{channel}01/{rtspUrlParams}`: the channel is
    /// concatenated with the literal `01`, not incremented. Otherwise the
    /// raw override is returned, or an empty string.
    #[must_use]
    pub fn rtsp_url_override(&self) -> String {
        let base = self.rtsp_url_override.as_deref().unwrap_or_default();
        match self.rtsp_channel.as_deref() {
            Some(channel) if self.is_analogue_camera => format!(
                "{base}/{channel}01/{}",
                self.rtsp_url_params.as_deref().unwrap_or_default()
            ),
            _ => base.to_string(),
        }
    }
}

fn read_text(storage: &dyn Storage, key: &str) -> Option<String> {
    storage.get_item(key).filter(|value| !value.is_empty())
}

fn read_flag(storage: &dyn Storage, key: &str) -> bool {
    storage.get_item(key).is_some_and(|value| value == "true")
}

fn write_text(storage: &dyn Storage, key: &str, value: Option<&str>) {
    match value {
        Some(value) => storage.set_item(key, value.to_string()),
        None => storage.remove_item(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryStorage;

    #[test]
    fn empty_storage_decodes_to_defaults() {
        let config = CameraConfig::load(&MemoryStorage::new());
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn empty_strings_are_absent() {
        let storage = MemoryStorage::with_items([("url", ""), ("rtspChannel", "")]);
        let config = CameraConfig::load(&storage);

        assert!(config.url.is_none());
        assert!(config.rtsp_channel.is_none());
    }

    #[test]
    fn flags_require_literal_true() {
        for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("yes", false)] {
            let storage = MemoryStorage::with_items([("noAudio", raw)]);
            assert_eq!(CameraConfig::load(&storage).no_audio, expected, "{raw}");
        }
    }

    #[test]
    fn store_then_load_preserves_fields() {
        let config = CameraConfig {
            username: Some("admin".to_string()),
            ip: Some("10.0.0.5".to_string()),
            is_analogue_camera: true,
            rtsp_channel: Some("3".to_string()),
            ..CameraConfig::default()
        };
        let storage = MemoryStorage::new();
        config.store(&storage);

        assert_eq!(storage.get_item("isAnalogueCamera").as_deref(), Some("true"));
        assert_eq!(storage.get_item("noAudio").as_deref(), Some("false"));
        assert_eq!(CameraConfig::load(&storage), config);
    }

    #[test]
    fn store_removes_cleared_fields() {
        let storage = MemoryStorage::with_items([("password", "secret")]);
        CameraConfig::default().store(&storage);
        assert!(storage.get_item("password").is_none());
    }

    #[test]
    fn http_address_defaults_port() {
        let config = CameraConfig {
            ip: Some("192.168.1.9".to_string()),
            ..CameraConfig::default()
        };
        assert_eq!(config.http_address(), "192.168.1.9:80");

        let config = CameraConfig {
            http_port: Some("8080".to_string()),
            ..config
        };
        assert_eq!(config.http_address(), "192.168.1.9:8080");
    }

    #[test]
    fn rtsp_address_defaults_port() {
        let storage = MemoryStorage::with_items([("ip", "192.168.1.9")]);
        assert_eq!(CameraConfig::load(&storage).rtsp_address(), "192.168.1.9:554");

        let storage = MemoryStorage::with_items([("ip", "192.168.1.9"), ("rtspPort", "8554")]);
        assert_eq!(CameraConfig::load(&storage).rtsp_address(), "192.168.1.9:8554");
    }

    #[test]
    fn analogue_override_concatenates_channel_suffix() {
        let storage = MemoryStorage::with_items([
            ("isAnalogueCamera", "true"),
            ("rtspChannel", "2"),
            ("rtspUrlOverride", "rtsp://host"),
            ("rtspUrlParams", "?x=1"),
        ]);
        assert_eq!(
            CameraConfig::load(&storage).rtsp_url_override(),
            "rtsp://host/201/?x=1"
        );
    }

    #[test]
    fn analogue_override_without_params_ends_with_slash() {
        let storage = MemoryStorage::with_items([
            ("isAnalogueCamera", "true"),
            ("rtspChannel", "12"),
            ("rtspUrlOverride", "rtsp://nvr"),
        ]);
        assert_eq!(
            CameraConfig::load(&storage).rtsp_url_override(),
            "rtsp://nvr/1201/"
        );
    }

    #[test]
    fn override_is_raw_without_analogue_flag() {
        let storage = MemoryStorage::with_items([
            ("rtspChannel", "2"),
            ("rtspUrlOverride", "rtsp://host"),
            ("rtspUrlParams", "?x=1"),
        ]);
        assert_eq!(CameraConfig::load(&storage).rtsp_url_override(), "rtsp://host");
    }

    #[test]
    fn override_is_raw_without_channel() {
        let storage = MemoryStorage::with_items([
            ("isAnalogueCamera", "true"),
            ("rtspUrlOverride", "rtsp://host"),
        ]);
        assert_eq!(CameraConfig::load(&storage).rtsp_url_override(), "rtsp://host");
    }

    #[test]
    fn override_is_empty_when_unset() {
        assert_eq!(CameraConfig::default().rtsp_url_override(), "");
    }
}

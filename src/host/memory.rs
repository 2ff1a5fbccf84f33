// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host platform.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{HostPlatform, Storage};
use crate::error::{HostError, Result, StreamError};
use crate::types::{DeviceManifest, FFMPEG_INPUT_MIME_TYPE, FfmpegInput, MediaObject, NativeId};

/// Key/value store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    #[must_use]
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        self.items.write().insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.items.write().remove(key);
    }
}

/// One operator alert call recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEntry {
    /// An alert was raised.
    Raised {
        /// Alert text.
        text: String,
        /// When the alert was raised.
        at: DateTime<Utc>,
    },
    /// An alert was cleared.
    Cleared {
        /// Alert text.
        text: String,
        /// When the alert was cleared.
        at: DateTime<Utc>,
    },
}

impl AlertEntry {
    /// Returns the alert text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Raised { text, .. } | Self::Cleared { text, .. } => text,
        }
    }

    /// Returns true for a raise.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        matches!(self, Self::Raised { .. })
    }
}

/// Host platform kept entirely in process memory.
///
/// Every discovery registration, alert and media object request is recorded
/// so it can be inspected afterwards. Devices registered through
/// [`on_device_discovered`](HostPlatform::on_device_discovered) become part
/// of [`device_ids`](HostPlatform::device_ids).
#[derive(Debug, Default)]
pub struct MemoryHost {
    devices: RwLock<BTreeMap<NativeId, Arc<MemoryStorage>>>,
    discovered: RwLock<Vec<DeviceManifest>>,
    alerts: RwLock<Vec<AlertEntry>>,
    media_requests: RwLock<Vec<FfmpegInput>>,
}

impl MemoryHost {
    /// Creates a host with no devices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a previously known device with the given stored settings.
    #[must_use]
    pub fn with_device<K, V>(
        self,
        native_id: impl Into<NativeId>,
        items: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.devices.write().insert(
            native_id.into(),
            Arc::new(MemoryStorage::with_items(items)),
        );
        self
    }

    /// Returns every discovery notification received, oldest first.
    #[must_use]
    pub fn discovered(&self) -> Vec<DeviceManifest> {
        self.discovered.read().clone()
    }

    /// Returns every alert call received, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<AlertEntry> {
        self.alerts.read().clone()
    }

    /// Returns the texts of alerts raised and not yet cleared.
    #[must_use]
    pub fn active_alerts(&self) -> Vec<String> {
        let mut active: Vec<String> = Vec::new();
        for entry in self.alerts.read().iter() {
            match entry {
                AlertEntry::Raised { text, .. } => active.push(text.clone()),
                AlertEntry::Cleared { text, .. } => active.retain(|t| t != text),
            }
        }
        active
    }

    /// Returns every transport descriptor handed to the media pipeline.
    #[must_use]
    pub fn media_requests(&self) -> Vec<FfmpegInput> {
        self.media_requests.read().clone()
    }

    fn device_storage(&self, native_id: &NativeId) -> Arc<MemoryStorage> {
        if let Some(storage) = self.devices.read().get(native_id) {
            return Arc::clone(storage);
        }
        Arc::clone(
            self.devices
                .write()
                .entry(native_id.clone())
                .or_default(),
        )
    }
}

impl HostPlatform for MemoryHost {
    fn device_ids(&self) -> Vec<NativeId> {
        self.devices.read().keys().cloned().collect()
    }

    fn storage(&self, native_id: &NativeId) -> Arc<dyn Storage> {
        self.device_storage(native_id)
    }

    fn on_device_discovered(&self, manifest: DeviceManifest) -> std::result::Result<(), HostError> {
        tracing::debug!(native_id = %manifest.native_id, name = %manifest.name, "Device discovered");
        self.device_storage(&manifest.native_id);
        self.discovered.write().push(manifest);
        Ok(())
    }

    fn raise_alert(&self, text: &str) {
        self.alerts.write().push(AlertEntry::Raised {
            text: text.to_string(),
            at: Utc::now(),
        });
    }

    fn clear_alert(&self, text: &str) {
        self.alerts.write().push(AlertEntry::Cleared {
            text: text.to_string(),
            at: Utc::now(),
        });
    }

    fn create_ffmpeg_media_object(&self, input: &FfmpegInput) -> Result<MediaObject> {
        let data = serde_json::to_vec(input).map_err(StreamError::from)?;
        self.media_requests.write().push(input.clone());
        Ok(MediaObject::new(FFMPEG_INPUT_MIME_TYPE, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interface;

    #[test]
    fn storage_absent_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("url").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn storage_set_and_remove() {
        let storage = MemoryStorage::new();
        storage.set_item("ip", "192.168.1.10".to_string());
        assert_eq!(storage.get_item("ip").as_deref(), Some("192.168.1.10"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("ip");
        assert!(storage.get_item("ip").is_none());
    }

    #[test]
    fn host_lists_preloaded_devices() {
        let host = MemoryHost::new()
            .with_device("b", [("url", "rtsp://b")])
            .with_device("a", [("url", "rtsp://a")]);

        assert_eq!(host.device_ids(), vec![NativeId::new("a"), NativeId::new("b")]);
        let storage = host.storage(&NativeId::new("a"));
        assert_eq!(storage.get_item("url").as_deref(), Some("rtsp://a"));
    }

    #[test]
    fn storage_is_shared_per_device() {
        let host = MemoryHost::new();
        let id = NativeId::new("cam");

        host.storage(&id).set_item("username", "admin".to_string());
        assert_eq!(host.storage(&id).get_item("username").as_deref(), Some("admin"));
    }

    #[test]
    fn discovery_registers_device() {
        let host = MemoryHost::new();
        let manifest =
            DeviceManifest::camera(NativeId::new("new"), "Garage", vec![Interface::VideoCamera]);

        host.on_device_discovered(manifest.clone()).unwrap();

        assert_eq!(host.discovered(), vec![manifest]);
        assert!(host.device_ids().contains(&NativeId::new("new")));
    }

    #[test]
    fn cleared_alert_is_not_active() {
        let host = MemoryHost::new();
        host.raise_alert("hello");
        host.raise_alert("world");
        host.clear_alert("hello");

        assert_eq!(host.active_alerts(), vec!["world".to_string()]);
        assert_eq!(host.alerts().len(), 3);
        assert!(host.alerts()[0].is_raised());
        assert_eq!(host.alerts()[2].text(), "hello");
    }

    #[test]
    fn media_object_wraps_ffmpeg_input() {
        let host = MemoryHost::new();
        let input = FfmpegInput {
            input_arguments: vec!["-i".to_string(), "rtsp://cam/".to_string()],
            media_stream_options: None,
        };

        let object = host.create_ffmpeg_media_object(&input).unwrap();

        assert_eq!(object.mime_type(), FFMPEG_INPUT_MIME_TYPE);
        assert_eq!(object.ffmpeg_input(), Some(input.clone()));
        assert_eq!(host.media_requests(), vec![input]);
    }
}

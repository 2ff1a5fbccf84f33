// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host platform contract.
//!
//! Cameras and the provider never talk to the outside world directly. Every
//! side effect goes through the traits in this module:
//!
//! - [`Storage`] - Persisted key/value store owned by the host, one per device
//! - [`HostPlatform`] - Device registry, operator alerts and the media pipeline
//!
//! [`MemoryStorage`] and [`MemoryHost`] are in-process implementations that
//! record every call, suitable for embedding and for tests.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use rtspcam_lib::host::{HostPlatform, MemoryHost, Storage};
//! use rtspcam_lib::types::NativeId;
//!
//! let host = Arc::new(MemoryHost::new());
//! let storage = host.storage(&NativeId::new("cam1"));
//! storage.set_item("url", "rtsp://192.168.1.100/stream".to_string());
//!
//! assert_eq!(storage.get_item("url").as_deref(), Some("rtsp://192.168.1.100/stream"));
//! ```

mod memory;

use std::sync::Arc;

pub use memory::{AlertEntry, MemoryHost, MemoryStorage};

use crate::error::{HostError, Result};
use crate::types::{DeviceManifest, FfmpegInput, MediaObject, NativeId};

/// Persisted string key/value store of a single device.
///
/// Reading a key that was never written returns `None`; callers treat that
/// as an empty value, never as an error.
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: String);

    /// Removes the value stored under `key`.
    fn remove_item(&self, key: &str);
}

/// Services the host platform offers to the provider and its cameras.
pub trait HostPlatform: Send + Sync {
    /// Returns the identifiers of every device previously registered.
    fn device_ids(&self) -> Vec<NativeId>;

    /// Returns the persisted store of a device.
    fn storage(&self, native_id: &NativeId) -> Arc<dyn Storage>;

    /// Registers a newly discovered device.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::RegistrationRejected`] if the host refuses the
    /// registration.
    fn on_device_discovered(&self, manifest: DeviceManifest) -> std::result::Result<(), HostError>;

    /// Shows an operator-visible alert.
    fn raise_alert(&self, text: &str);

    /// Removes an operator-visible alert.
    fn clear_alert(&self, text: &str);

    /// Materializes a transport descriptor as a playable media object.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be encoded or the media
    /// pipeline refuses it.
    fn create_ffmpeg_media_object(&self, input: &FfmpegInput) -> Result<MediaObject>;
}

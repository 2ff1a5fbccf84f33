// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic RTSP camera adapter.

use std::sync::Arc;

use super::{Camera, UrlSource, stream};
use crate::config::{CameraConfig, keys};
use crate::error::Result;
use crate::host::{HostPlatform, Storage};
use crate::types::{MediaObject, MediaStreamOptions, NativeId, Setting, SettingType, SettingValue};

/// URL source of a generic camera: the stream URL is stored verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredUrl;

impl UrlSource for StoredUrl {
    fn stream_url(&self, config: &CameraConfig) -> String {
        config.url.clone().unwrap_or_default()
    }

    fn url_settings(&self, config: &CameraConfig) -> Vec<Setting> {
        vec![
            Setting::new(keys::URL, "RTSP Stream URL")
                .with_placeholder("rtsp://192.168.1.100[:554]/channel/101")
                .with_optional_value(config.url.clone()),
        ]
    }
}

/// Camera adapter translating stored settings into a playable stream.
///
/// The URL side of the adapter is pluggable through [`UrlSource`]; the
/// credentials, audio toggle and stream descriptor are shared by every
/// camera kind.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rtspcam_lib::camera::{Camera, RtspCamera};
/// use rtspcam_lib::host::{HostPlatform, MemoryHost};
/// use rtspcam_lib::types::NativeId;
///
/// # fn main() -> rtspcam_lib::Result<()> {
/// let host: Arc<dyn HostPlatform> = Arc::new(MemoryHost::new());
/// let camera = RtspCamera::new(NativeId::new("cam1"), Arc::clone(&host));
///
/// camera.put_setting("url", "rtsp://192.168.1.100/live".into());
/// camera.put_setting("username", "admin".into());
///
/// let media = camera.video_stream()?;
/// let input = media.ffmpeg_input().unwrap();
/// assert_eq!(input.url(), Some("rtsp://admin@192.168.1.100/live"));
/// # Ok(())
/// # }
/// ```
pub struct RtspCamera<U = StoredUrl> {
    native_id: NativeId,
    storage: Arc<dyn Storage>,
    host: Arc<dyn HostPlatform>,
    url_source: U,
}

impl RtspCamera<StoredUrl> {
    /// Creates a generic camera backed by the host's store for `native_id`.
    #[must_use]
    pub fn new(native_id: NativeId, host: Arc<dyn HostPlatform>) -> Self {
        Self::with_url_source(native_id, host, StoredUrl)
    }
}

impl<U: UrlSource> RtspCamera<U> {
    /// Creates a camera whose URL handling is provided by `url_source`.
    #[must_use]
    pub fn with_url_source(native_id: NativeId, host: Arc<dyn HostPlatform>, url_source: U) -> Self {
        let storage = host.storage(&native_id);
        Self {
            native_id,
            storage,
            host,
            url_source,
        }
    }

    /// Decodes the current configuration from storage.
    #[must_use]
    pub fn config(&self) -> CameraConfig {
        CameraConfig::load(self.storage.as_ref())
    }

    /// Returns the persisted store of this camera.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Returns the URL source.
    #[must_use]
    pub fn url_source(&self) -> &U {
        &self.url_source
    }
}

impl<U: UrlSource> Camera for RtspCamera<U> {
    fn native_id(&self) -> &NativeId {
        &self.native_id
    }

    fn video_stream_options(&self) -> Vec<MediaStreamOptions> {
        stream::stream_options(&self.config())
    }

    fn stream_url(&self) -> String {
        self.url_source.stream_url(&self.config())
    }

    fn video_stream(&self) -> Result<MediaObject> {
        let config = self.config();
        let url = self.url_source.stream_url(&config);
        let options = stream::stream_options(&config).into_iter().next();
        let input = stream::ffmpeg_input(&url, &config, options)?;
        self.host.create_ffmpeg_media_object(&input)
    }

    fn settings(&self) -> Vec<Setting> {
        let config = self.config();
        let mut settings = self.url_source.url_settings(&config);
        settings.push(
            Setting::new(keys::USERNAME, "Username").with_optional_value(config.username.clone()),
        );
        settings.push(
            Setting::new(keys::PASSWORD, "Password")
                .with_type(SettingType::Password)
                .with_optional_value(config.password.clone()),
        );
        settings.push(
            Setting::new(keys::NO_AUDIO, "No Audio")
                .with_description(
                    "Enable this setting if the stream does not have audio or to mute audio.",
                )
                .with_type(SettingType::Boolean)
                .with_value(config.no_audio.to_string()),
        );
        settings
    }

    fn put_setting(&self, key: &str, value: SettingValue) {
        self.storage.set_item(key, value.to_string());
    }
}

impl<U> std::fmt::Debug for RtspCamera<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtspCamera")
            .field("native_id", &self.native_id)
            .finish_non_exhaustive()
    }
}

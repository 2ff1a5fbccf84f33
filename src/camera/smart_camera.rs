// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Address-aware camera adapter with a self-healing event subscription.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};

use super::listen_loop::{ListenLoop, Listener};
use super::{Camera, CameraFamily, ListenerStatus, RtspCamera, UrlSource};
use crate::config::{CameraConfig, DEFAULT_HTTP_PORT, ListenPolicy, keys};
use crate::error::{Error, Result};
use crate::event::CameraEvent;
use crate::host::HostPlatform;
use crate::types::{MediaObject, MediaStreamOptions, NativeId, Setting, SettingType, SettingValue};

/// URL source of a smart camera.
///
/// The stream URL is the override when one is set, otherwise the URL the
/// camera family constructs from the camera's address.
#[derive(Debug)]
pub struct SmartUrl<F> {
    family: Arc<F>,
}

impl<F> SmartUrl<F> {
    /// Creates a URL source for `family`.
    #[must_use]
    pub fn new(family: Arc<F>) -> Self {
        Self { family }
    }
}

impl<F: CameraFamily> UrlSource for SmartUrl<F> {
    fn stream_url(&self, config: &CameraConfig) -> String {
        let url_override = config.rtsp_url_override();
        if url_override.is_empty() {
            self.family.constructed_stream_url(config)
        } else {
            url_override
        }
    }

    fn url_settings(&self, config: &CameraConfig) -> Vec<Setting> {
        let constructed = self.family.constructed_stream_url(config);
        vec![
            Setting::new(keys::IP, "Address")
                .with_placeholder("192.168.1.100")
                .with_optional_value(config.ip.clone()),
            Setting::new(keys::HTTP_PORT, "HTTP Port Override")
                .with_placeholder(DEFAULT_HTTP_PORT)
                .with_optional_value(config.http_port.clone()),
            Setting::new(keys::IS_ANALOGUE_CAMERA, "Analogue Camera")
                .with_description("Enable this setting if the camera is connected to an NVR channel.")
                .with_type(SettingType::Boolean)
                .with_value(config.is_analogue_camera.to_string()),
            Setting::new(keys::RTSP_URL_OVERRIDE, "RTSP URL Override")
                .with_description(format!(
                    "Override the RTSP URL if your camera is using a non default port, channel, \
                     or rebroadcasted through an NVR. Default: {constructed}"
                ))
                .with_placeholder(constructed)
                .with_optional_value(config.rtsp_url_override.clone()),
            Setting::new(keys::RTSP_CHANNEL, "Channel Number")
                .with_description("The NVR channel of an analogue camera.")
                .with_placeholder("1")
                .with_optional_value(config.rtsp_channel.clone()),
            Setting::new(keys::RTSP_URL_PARAMS, "RTSP URL Parameters")
                .with_description("Appended to the URL of an analogue camera.")
                .with_placeholder("?transportmode=unicast")
                .with_optional_value(config.rtsp_url_params.clone()),
        ]
    }
}

/// Camera adapter for discoverable cameras.
///
/// On top of [`RtspCamera`], a smart camera derives its stream URL from the
/// camera address through a [`CameraFamily`], and keeps an event
/// subscription alive for its whole lifetime. Construction acquires the first
/// subscription and spawns the listen loop on the current tokio runtime.
/// Every [`put_setting`](Camera::put_setting) forces the loop to discard the
/// live subscription and acquire a new one with the new settings, after the
/// policy's restart delay.
pub struct SmartCamera<F> {
    base: RtspCamera<SmartUrl<F>>,
    family: Arc<F>,
    listener: Arc<Listener>,
}

impl<F: CameraFamily> SmartCamera<F> {
    /// Creates a smart camera with the default listen policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] if called outside a tokio runtime.
    pub fn new(native_id: NativeId, host: Arc<dyn HostPlatform>, family: Arc<F>) -> Result<Self> {
        Self::with_policy(native_id, host, family, ListenPolicy::default())
    }

    /// Creates a smart camera with a custom listen policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] if called outside a tokio runtime.
    pub fn with_policy(
        native_id: NativeId,
        host: Arc<dyn HostPlatform>,
        family: Arc<F>,
        policy: ListenPolicy,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let base = RtspCamera::with_url_source(
            native_id.clone(),
            host,
            SmartUrl::new(Arc::clone(&family)),
        );
        let listener = Arc::new(Listener::new(native_id));

        ListenLoop::new(
            Arc::clone(&family),
            Arc::clone(base.storage()),
            Arc::clone(&listener),
            policy,
        )
        .start(&runtime);

        Ok(Self {
            base,
            family,
            listener,
        })
    }

    /// Decodes the current configuration from storage.
    #[must_use]
    pub fn config(&self) -> CameraConfig {
        self.base.config()
    }

    /// Returns the camera family.
    #[must_use]
    pub fn family(&self) -> &Arc<F> {
        &self.family
    }

    /// Returns `{ip}:{httpPort}`, defaulting the port to 80.
    #[must_use]
    pub fn http_address(&self) -> String {
        self.config().http_address()
    }

    /// Returns `{ip}:{rtspPort}`, defaulting the port to 554.
    #[must_use]
    pub fn rtsp_address(&self) -> String {
        self.config().rtsp_address()
    }

    /// Returns the override URL, expanded for analogue cameras.
    #[must_use]
    pub fn rtsp_url_override(&self) -> String {
        self.config().rtsp_url_override()
    }

    /// Returns the URL the family builds when no override is set.
    #[must_use]
    pub fn constructed_stream_url(&self) -> String {
        self.family.constructed_stream_url(&self.config())
    }

    /// Returns a snapshot of the listen loop.
    #[must_use]
    pub fn listener_status(&self) -> ListenerStatus {
        self.listener.status()
    }

    /// Returns a receiver notified on every listen loop transition.
    #[must_use]
    pub fn watch_listener(&self) -> watch::Receiver<ListenerStatus> {
        self.listener.watch()
    }

    /// Subscribes to listener lifecycle events and forwarded notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CameraEvent> {
        self.listener.subscribe()
    }
}

impl<F: CameraFamily> Camera for SmartCamera<F> {
    fn native_id(&self) -> &NativeId {
        self.base.native_id()
    }

    fn video_stream_options(&self) -> Vec<MediaStreamOptions> {
        self.base.video_stream_options()
    }

    fn stream_url(&self) -> String {
        self.base.stream_url()
    }

    fn video_stream(&self) -> Result<MediaObject> {
        self.base.video_stream()
    }

    fn settings(&self) -> Vec<Setting> {
        self.base.settings()
    }

    fn put_setting(&self, key: &str, value: SettingValue) {
        self.base.put_setting(key, value);
        self.listener.signal_config_changed();
    }
}

impl<F> std::fmt::Debug for SmartCamera<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartCamera")
            .field("base", &self.base)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

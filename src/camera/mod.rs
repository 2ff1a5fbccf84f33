// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera adapters.
//!
//! An adapter turns a camera's stored settings into a settings schema for
//! the host UI and a playable stream descriptor for the host media pipeline.
//!
//! # Adapters
//!
//! - [`RtspCamera`] - Generic camera whose stream URL is entered verbatim
//! - [`SmartCamera`] - Discoverable camera whose URL is derived from its
//!   address by a [`CameraFamily`], with a self-healing event subscription
//!
//! Both implement [`Camera`], the surface the provider and the host use.
//! Specialization is by composition: [`RtspCamera`] is generic over a
//! [`UrlSource`], and [`SmartCamera`] plugs in a [`SmartUrl`] backed by its
//! family instead of overriding base behavior.
//!
//! # Listen Loop
//!
//! A smart camera supervises its event subscription through three states:
//!
//! ```text
//! Idle --construct--> Listening --fault / settings change--> Restarting
//!                         ^                                     |
//!                         +--------- restart delay elapsed -----+
//! ```
//!
//! Faults and settings changes are separate [`ListenEvent`](crate::event::ListenEvent)
//! tags handled by one policy: discard the subscription, wait for the
//! [`ListenPolicy`](crate::config::ListenPolicy) delay (10 s by default),
//! acquire a new one.

mod listen_loop;
mod rtsp_camera;
mod smart_camera;
pub mod stream;

pub use listen_loop::{ListenState, ListenerStatus};
pub use rtsp_camera::{RtspCamera, StoredUrl};
pub use smart_camera::{SmartCamera, SmartUrl};

use crate::config::CameraConfig;
use crate::error::Result;
use crate::event::EventSubscription;
use crate::types::{Interface, MediaObject, MediaStreamOptions, NativeId, Setting, SettingValue};

/// Operations the host platform invokes on a camera adapter.
pub trait Camera: Send + Sync {
    /// Returns the camera's identifier.
    fn native_id(&self) -> &NativeId;

    /// Returns the capability descriptors of the stream.
    ///
    /// Exactly one descriptor is returned. Video is always declared; audio is
    /// declared unless `noAudio` is `"true"`.
    fn video_stream_options(&self) -> Vec<MediaStreamOptions>;

    /// Returns the stream URL without credentials.
    fn stream_url(&self) -> String;

    /// Builds the stream descriptor and has the host materialize it.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream URL is absent or malformed, or if the
    /// host media pipeline fails.
    fn video_stream(&self) -> Result<MediaObject>;

    /// Returns the settings schema with current values.
    fn settings(&self) -> Vec<Setting>;

    /// Stores `value` under `key`. Unknown keys are stored as well.
    fn put_setting(&self, key: &str, value: SettingValue);
}

/// URL-related behavior of a camera kind.
pub trait UrlSource: Send + Sync {
    /// Derives the stream URL from the configuration.
    fn stream_url(&self, config: &CameraConfig) -> String;

    /// Returns the URL-related settings shown ahead of the credentials.
    fn url_settings(&self, config: &CameraConfig) -> Vec<Setting>;
}

/// Vendor-specific part of a smart camera.
///
/// A family knows how its cameras lay out their default stream URL and how
/// to open an event subscription against them.
pub trait CameraFamily: Send + Sync + 'static {
    /// Builds the default stream URL from the camera address and credentials.
    fn constructed_stream_url(&self, config: &CameraConfig) -> String;

    /// Opens a live event subscription.
    ///
    /// The family keeps the [`EventSender`](crate::event::EventSender) paired
    /// with the returned subscription and must eventually report a
    /// [`NetworkFault`](crate::event::ListenEvent::NetworkFault) through it
    /// (or drop it) when the connection fails. Each call must return a new
    /// subscription; the previous one has already been discarded.
    ///
    /// Runs synchronously, from camera construction and from the listen
    /// loop. It must not create cameras through the provider that owns it.
    ///
    /// # Errors
    ///
    /// An error is handled like a network fault: it is logged and the
    /// acquisition is retried after the restart delay.
    fn listen_events(&self, native_id: &NativeId, config: &CameraConfig)
    -> Result<EventSubscription>;

    /// Interfaces declared in addition to `VideoCamera` and `Settings`.
    fn additional_interfaces(&self) -> Vec<Interface> {
        Vec::new()
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera event types.

use std::time::Duration;

use crate::types::NativeId;

use super::RestartCause;

/// Events emitted by a smart camera.
///
/// These events report the lifecycle of the camera's event subscription and
/// forward notifications the subscription delivers. All events include the
/// camera's identifier for targeted handling.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::event::{CameraEvent, RestartCause};
/// use rtspcam_lib::types::NativeId;
///
/// let native_id = NativeId::new("cam1");
///
/// let started = CameraEvent::listener_started(native_id.clone(), 1);
/// let restarting = CameraEvent::ListenerRestarting {
///     native_id,
///     cause: RestartCause::ConfigChanged,
///     delay: std::time::Duration::from_secs(10),
/// };
/// assert!(started.is_lifecycle());
/// assert!(restarting.is_lifecycle());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// A new subscription was acquired.
    ListenerStarted {
        /// The camera.
        native_id: NativeId,
        /// Number of subscriptions acquired so far, this one included.
        generation: u64,
    },

    /// The subscription was discarded and a new one is scheduled.
    ListenerRestarting {
        /// The camera.
        native_id: NativeId,
        /// Why the subscription was discarded.
        cause: RestartCause,
        /// Delay before the next acquisition.
        delay: Duration,
    },

    /// The restart budget is exhausted; no further subscription will be
    /// acquired.
    ListenerStopped {
        /// The camera.
        native_id: NativeId,
        /// The failure that ended the last subscription.
        cause: RestartCause,
    },

    /// A notification delivered by the subscription.
    Notification {
        /// The camera.
        native_id: NativeId,
        /// Notification payload as delivered by the camera family.
        payload: String,
    },
}

impl CameraEvent {
    /// Returns the camera identifier associated with this event.
    #[must_use]
    pub fn native_id(&self) -> &NativeId {
        match self {
            Self::ListenerStarted { native_id, .. }
            | Self::ListenerRestarting { native_id, .. }
            | Self::ListenerStopped { native_id, .. }
            | Self::Notification { native_id, .. } => native_id,
        }
    }

    /// Returns `true` if this is a listener lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, Self::Notification { .. })
    }

    /// Creates a listener started event.
    #[must_use]
    pub fn listener_started(native_id: NativeId, generation: u64) -> Self {
        Self::ListenerStarted {
            native_id,
            generation,
        }
    }

    /// Creates a notification event.
    #[must_use]
    pub fn notification(native_id: NativeId, payload: impl Into<String>) -> Self {
        Self::Notification {
            native_id,
            payload: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_id_extraction() {
        let id = NativeId::new("cam");

        assert_eq!(CameraEvent::listener_started(id.clone(), 1).native_id(), &id);
        assert_eq!(CameraEvent::notification(id.clone(), "motion").native_id(), &id);

        let stopped = CameraEvent::ListenerStopped {
            native_id: id.clone(),
            cause: RestartCause::NetworkFault("gone".to_string()),
        };
        assert_eq!(stopped.native_id(), &id);
    }

    #[test]
    fn notifications_are_not_lifecycle() {
        let id = NativeId::new("cam");
        assert!(!CameraEvent::notification(id.clone(), "motion").is_lifecycle());
        assert!(CameraEvent::listener_started(id, 3).is_lifecycle());
    }
}

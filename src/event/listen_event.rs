// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events delivered over a camera event subscription.

use std::fmt;

/// An item produced by a live event subscription.
///
/// Network faults and configuration changes are distinct tags, yet the listen
/// loop reacts to both the same way: the subscription is discarded and a new
/// one is acquired after the restart delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenEvent {
    /// A camera event, forwarded to observers unchanged.
    Notification(String),
    /// The subscription lost its connection to the camera.
    NetworkFault(String),
    /// Camera settings changed, so the subscription must be re-resolved.
    ConfigChanged,
}

impl ListenEvent {
    /// Returns the restart cause if this event ends the subscription.
    #[must_use]
    pub fn restart_cause(&self) -> Option<RestartCause> {
        match self {
            Self::Notification(_) => None,
            Self::NetworkFault(details) => Some(RestartCause::NetworkFault(details.clone())),
            Self::ConfigChanged => Some(RestartCause::ConfigChanged),
        }
    }
}

/// Reason the listen loop discarded a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartCause {
    /// Network-level failure, including a failed acquisition.
    NetworkFault(String),
    /// Forced restart after a settings change.
    ConfigChanged,
}

impl fmt::Display for RestartCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFault(details) => write!(f, "network fault: {details}"),
            Self::ConfigChanged => f.write_str("new settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_does_not_end_subscription() {
        assert!(ListenEvent::Notification("motion".to_string())
            .restart_cause()
            .is_none());
    }

    #[test]
    fn fault_and_config_change_end_subscription() {
        assert_eq!(
            ListenEvent::NetworkFault("reset by peer".to_string()).restart_cause(),
            Some(RestartCause::NetworkFault("reset by peer".to_string()))
        );
        assert_eq!(
            ListenEvent::ConfigChanged.restart_cause(),
            Some(RestartCause::ConfigChanged)
        );
    }

    #[test]
    fn cause_display() {
        assert_eq!(RestartCause::ConfigChanged.to_string(), "new settings");
        assert_eq!(
            RestartCause::NetworkFault("timeout".to_string()).to_string(),
            "network fault: timeout"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Restart policy of the smart camera listen loop.

use std::time::Duration;

/// Delay before a failed subscription is re-acquired.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(10);

/// Shortest delay the loop waits between two acquisitions.
pub const MIN_RESTART_DELAY: Duration = Duration::from_millis(1);

/// Configuration for restarting an event subscription.
///
/// The default restarts forever with a fixed 10 second delay, for network
/// faults and configuration changes alike.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rtspcam_lib::config::ListenPolicy;
///
/// // Default policy (fixed 10 s delay, unbounded restarts)
/// let policy = ListenPolicy::default();
/// assert!(policy.should_restart(1_000_000));
///
/// // Custom policy
/// let policy = ListenPolicy::new()
///     .with_restart_delay(Duration::from_secs(2))
///     .with_max_restarts(5);
/// assert!(!policy.should_restart(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenPolicy {
    /// Delay between losing a subscription and acquiring the next one.
    pub restart_delay: Duration,
    /// Maximum number of restarts before the loop stops (None = infinite).
    pub max_restarts: Option<u32>,
}

impl ListenPolicy {
    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the restart delay, raised to [`MIN_RESTART_DELAY`] if shorter.
    #[must_use]
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay.max(MIN_RESTART_DELAY);
        self
    }

    /// Sets the maximum number of restarts.
    #[must_use]
    pub fn with_max_restarts(mut self, max_restarts: u32) -> Self {
        self.max_restarts = Some(max_restarts);
        self
    }

    /// Sets infinite restarts.
    #[must_use]
    pub fn with_infinite_restarts(mut self) -> Self {
        self.max_restarts = None;
        self
    }

    /// Returns the delay to wait before the next acquisition.
    ///
    /// Never shorter than [`MIN_RESTART_DELAY`], so a family failing every
    /// acquisition cannot make the loop spin.
    #[must_use]
    pub fn delay_for_restart(&self) -> Duration {
        self.restart_delay.max(MIN_RESTART_DELAY)
    }

    /// Returns true if another restart should be attempted after `restarts`
    /// restarts have already happened.
    #[must_use]
    pub fn should_restart(&self, restarts: u32) -> bool {
        self.max_restarts.is_none_or(|max| restarts < max)
    }
}

impl Default for ListenPolicy {
    fn default() -> Self {
        Self {
            restart_delay: DEFAULT_RESTART_DELAY,
            max_restarts: None,
        }
    }
}

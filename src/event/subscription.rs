// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cancelable event subscription channel.
//!
//! A camera family hands the listen loop an [`EventSubscription`] and keeps
//! the matching [`EventSender`] to feed it. Dropping the subscription cancels
//! it: every sender observes [`is_closed`](EventSender::is_closed) and
//! [`closed`](EventSender::closed) resolves, which is the family's cue to
//! tear down whatever connection backs it.

use tokio::sync::mpsc;

use super::ListenEvent;

/// Creates a connected sender/subscription pair.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::event::{ListenEvent, subscription_channel};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (sender, mut subscription) = subscription_channel();
/// sender.notify("motion started");
///
/// assert_eq!(
///     subscription.next().await,
///     Some(ListenEvent::Notification("motion started".to_string()))
/// );
///
/// drop(subscription);
/// assert!(sender.is_closed());
/// # }
/// ```
#[must_use]
pub fn subscription_channel() -> (EventSender, EventSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    let signal = tx.downgrade();
    (
        EventSender { inner: tx },
        EventSubscription {
            receiver: rx,
            signal,
        },
    )
}

/// Producer side of a subscription, held by the camera family.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<ListenEvent>,
}

impl EventSender {
    /// Delivers an event. Returns false if the subscription was discarded.
    pub fn send(&self, event: ListenEvent) -> bool {
        self.inner.send(event).is_ok()
    }

    /// Delivers a camera notification.
    pub fn notify(&self, payload: impl Into<String>) -> bool {
        self.send(ListenEvent::Notification(payload.into()))
    }

    /// Reports a network fault, ending the subscription.
    pub fn fault(&self, details: impl Into<String>) -> bool {
        self.send(ListenEvent::NetworkFault(details.into()))
    }

    /// Returns true once the subscription has been discarded.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Completes when the subscription is discarded.
    pub async fn closed(&self) {
        self.inner.closed().await;
    }
}

/// Consumer side of a subscription, owned by the listen loop.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: mpsc::UnboundedReceiver<ListenEvent>,
    signal: mpsc::WeakUnboundedSender<ListenEvent>,
}

impl EventSubscription {
    /// Receives the next event.
    ///
    /// Returns `None` once every [`EventSender`] has been dropped.
    pub async fn next(&mut self) -> Option<ListenEvent> {
        self.receiver.recv().await
    }

    /// Receives the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<ListenEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns a handle able to inject events without keeping the
    /// subscription alive.
    #[must_use]
    pub(crate) fn signal(&self) -> SubscriptionSignal {
        SubscriptionSignal {
            inner: self.signal.clone(),
        }
    }
}

/// Weak handle to a live subscription.
///
/// Signals sent after the subscription has been discarded are dropped.
#[derive(Debug, Clone)]
pub(crate) struct SubscriptionSignal {
    inner: mpsc::WeakUnboundedSender<ListenEvent>,
}

impl SubscriptionSignal {
    /// Injects an event. Returns false if the subscription is gone.
    pub(crate) fn send(&self, event: ListenEvent) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|sender| sender.send(event).is_ok())
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Self-healing event subscription supervisor.
//!
//! The loop owns at most one [`EventSubscription`] at a time. When that
//! subscription ends, for a network fault or a forced restart alike, it is
//! dropped before the restart delay starts and a fresh one is acquired once
//! the delay has elapsed. A dropped subscription receives no further
//! callback, and signals aimed at it are discarded.
//!
//! A settings change that finds no live subscription is remembered. If it
//! lands while an acquisition is in flight, that acquisition may have read
//! the old settings, so the new subscription is restarted as soon as it is
//! installed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};

use super::CameraFamily;
use crate::config::{CameraConfig, ListenPolicy};
use crate::event::{
    CameraEvent, EventBus, EventSubscription, ListenEvent, RestartCause, SubscriptionSignal,
};
use crate::host::Storage;
use crate::types::NativeId;

/// State of a listen loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenState {
    /// No subscription has been requested yet.
    Idle,
    /// A subscription is live.
    Listening,
    /// The last subscription ended; the next one is pending the delay.
    Restarting,
    /// The restart budget is exhausted.
    Stopped,
}

/// Snapshot of a listen loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerStatus {
    /// Current state.
    pub state: ListenState,
    /// Number of subscriptions acquired so far.
    pub generation: u64,
    /// Number of restarts scheduled so far.
    pub restarts: u32,
    /// Cause of the most recent restart.
    pub last_cause: Option<RestartCause>,
    /// When the loop entered its current state.
    pub since: DateTime<Utc>,
}

impl ListenerStatus {
    fn idle() -> Self {
        Self {
            state: ListenState::Idle,
            generation: 0,
            restarts: 0,
            last_cause: None,
            since: Utc::now(),
        }
    }
}

/// Restart signal of the live subscription.
#[derive(Debug, Default)]
struct SignalSlot {
    signal: Option<SubscriptionSignal>,
    /// Settings changed while no subscription was live.
    pending_change: bool,
}

/// State shared between a smart camera and its loop task.
#[derive(Debug)]
pub(crate) struct Listener {
    native_id: NativeId,
    slot: Mutex<SignalSlot>,
    status: watch::Sender<ListenerStatus>,
    bus: EventBus,
}

impl Listener {
    pub(crate) fn new(native_id: NativeId) -> Self {
        let (status, _) = watch::channel(ListenerStatus::idle());
        Self {
            native_id,
            slot: Mutex::new(SignalSlot::default()),
            status,
            bus: EventBus::new(),
        }
    }

    pub(crate) fn status(&self) -> ListenerStatus {
        self.status.borrow().clone()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<ListenerStatus> {
        self.status.subscribe()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CameraEvent> {
        self.bus.subscribe()
    }

    /// Forces the live subscription to end with [`ListenEvent::ConfigChanged`].
    ///
    /// Returns false if no subscription is live. The change is then kept
    /// pending until the next subscription is installed.
    pub(crate) fn signal_config_changed(&self) -> bool {
        let delivered = {
            let mut slot = self.slot.lock();
            let delivered = slot
                .signal
                .as_ref()
                .is_some_and(|signal| signal.send(ListenEvent::ConfigChanged));
            if !delivered {
                slot.pending_change = true;
            }
            delivered
        };
        if delivered {
            tracing::debug!(native_id = %self.native_id, "Settings changed, forcing listener restart");
        } else {
            tracing::debug!(native_id = %self.native_id, "Settings changed with no live subscription");
        }
        delivered
    }

    /// Stores the signal of a new subscription.
    ///
    /// A change recorded since `begin_acquisition` may have been missed by
    /// the configuration the subscription was opened with; it is delivered
    /// right away.
    fn install(&self, signal: SubscriptionSignal) {
        let mut slot = self.slot.lock();
        if std::mem::take(&mut slot.pending_change) {
            tracing::debug!(native_id = %self.native_id, "Settings changed during acquisition");
            signal.send(ListenEvent::ConfigChanged);
        }
        slot.signal = Some(signal);
    }

    /// Forgets pending changes; the configuration is about to be read.
    fn begin_acquisition(&self) {
        self.slot.lock().pending_change = false;
    }

    fn clear_signal(&self) {
        self.slot.lock().signal = None;
    }

    fn record_restart(&self, cause: &RestartCause) {
        self.status.send_modify(|status| {
            status.restarts = status.restarts.saturating_add(1);
            status.last_cause = Some(cause.clone());
            status.state = ListenState::Restarting;
            status.since = Utc::now();
        });
    }

    fn set_state(&self, state: ListenState) {
        self.status.send_modify(|status| {
            status.state = state;
            status.since = Utc::now();
        });
    }
}

/// The supervising task of one smart camera.
pub(crate) struct ListenLoop<F> {
    family: Arc<F>,
    storage: Arc<dyn Storage>,
    listener: Arc<Listener>,
    policy: ListenPolicy,
}

impl<F: CameraFamily> ListenLoop<F> {
    pub(crate) fn new(
        family: Arc<F>,
        storage: Arc<dyn Storage>,
        listener: Arc<Listener>,
        policy: ListenPolicy,
    ) -> Self {
        Self {
            family,
            storage,
            listener,
            policy,
        }
    }

    /// Acquires the first subscription and spawns the loop on `runtime`.
    pub(crate) fn start(self, runtime: &Handle) {
        let first = self.acquire();
        runtime.spawn(self.run(first));
    }

    fn acquire(&self) -> Result<EventSubscription, RestartCause> {
        let native_id = &self.listener.native_id;
        self.listener.begin_acquisition();
        let config = CameraConfig::load(self.storage.as_ref());

        let subscription = self
            .family
            .listen_events(native_id, &config)
            .map_err(|e| RestartCause::NetworkFault(e.to_string()))?;

        self.listener.install(subscription.signal());
        let mut generation = 0;
        self.listener.status.send_modify(|status| {
            status.generation += 1;
            status.state = ListenState::Listening;
            status.since = Utc::now();
            generation = status.generation;
        });
        tracing::debug!(%native_id, generation, "Event subscription acquired");
        self.listener
            .bus
            .publish(CameraEvent::listener_started(native_id.clone(), generation));

        Ok(subscription)
    }

    async fn run(self, first: Result<EventSubscription, RestartCause>) {
        let native_id = self.listener.native_id.clone();
        let mut next = first;

        loop {
            let cause = match next {
                Ok(subscription) => self.listen(subscription).await,
                Err(cause) => cause,
            };
            self.listener.clear_signal();

            let restarts = self.listener.status.borrow().restarts;
            if !self.policy.should_restart(restarts) {
                tracing::warn!(%native_id, %cause, restarts, "Listen loop stopped");
                self.listener.status.send_modify(|status| {
                    status.last_cause = Some(cause.clone());
                });
                self.listener.set_state(ListenState::Stopped);
                self.listener
                    .bus
                    .publish(CameraEvent::ListenerStopped { native_id, cause });
                return;
            }

            let delay = self.policy.delay_for_restart();
            tracing::warn!(
                %native_id,
                %cause,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Listen loop error, restarting"
            );
            self.listener.record_restart(&cause);
            self.listener.bus.publish(CameraEvent::ListenerRestarting {
                native_id: native_id.clone(),
                cause,
                delay,
            });

            tokio::time::sleep(delay).await;
            next = self.acquire();
        }
    }

    /// Forwards notifications until the subscription ends, consuming it.
    async fn listen(&self, mut subscription: EventSubscription) -> RestartCause {
        while let Some(event) = subscription.next().await {
            if let Some(cause) = event.restart_cause() {
                return cause;
            }
            if let ListenEvent::Notification(payload) = event {
                self.listener.bus.publish(CameraEvent::notification(
                    self.listener.native_id.clone(),
                    payload,
                ));
            }
        }
        RestartCause::NetworkFault("event stream closed".to_string())
    }
}

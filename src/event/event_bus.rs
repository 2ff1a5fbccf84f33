// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-camera broadcast of listener events.

use tokio::sync::broadcast;

use super::CameraEvent;

/// Number of events kept for a slow observer before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// Broadcasts the [`CameraEvent`]s of one smart camera.
///
/// Observers subscribe through
/// [`SmartCamera::subscribe`](crate::camera::SmartCamera::subscribe) and
/// receive every event published afterwards. An observer falling more than
/// 64 events behind loses the oldest ones and receives
/// `RecvError::Lagged` instead.
#[derive(Debug)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<CameraEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CameraEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Without observers the event is dropped.
    pub(crate) fn publish(&self, event: CameraEvent) {
        let _ = self.sender.send(event);
    }
}

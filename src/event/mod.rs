// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event subscriptions and camera event broadcasting.
//!
//! Two layers live here:
//!
//! - The subscription channel between a camera family and the listen loop:
//!   [`subscription_channel`] yields an [`EventSender`] for the family and an
//!   [`EventSubscription`] for the loop, carrying tagged [`ListenEvent`]s.
//! - The observer side: each smart camera broadcasts [`CameraEvent`]s about
//!   its listener lifecycle and forwarded notifications.

mod camera_event;
mod event_bus;
mod listen_event;
mod subscription;

pub use camera_event::CameraEvent;
pub(crate) use event_bus::EventBus;
pub use listen_event::{ListenEvent, RestartCause};
pub(crate) use subscription::SubscriptionSignal;
pub use subscription::{EventSender, EventSubscription, subscription_channel};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device provider.
//!
//! The provider is the host's entry point into the plugin. It exposes an
//! "add camera" setting, announces cameras created by the operator, and
//! keeps one adapter per known device.
//!
//! Which adapter the provider builds is decided by a [`CameraFactory`]:
//! [`RtspCameraFactory`] for generic cameras, [`SmartCameraFactory`] for a
//! [`CameraFamily`](crate::camera::CameraFamily).

mod factory;
mod rtsp_provider;

pub use factory::{CameraFactory, RtspCameraFactory, SmartCameraFactory};
pub use rtsp_provider::{NEW_CAMERA_KEY, RtspProvider};

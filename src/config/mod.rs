// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera configuration.
//!
//! The host persists camera settings as untyped string pairs. This module
//! maps them to a typed [`CameraConfig`] at the boundary, so the rest of the
//! crate never parses strings:
//!
//! - [`CameraConfig`] - Decoded per-camera settings and address derivation
//! - [`keys`] - Storage keys recognized by the cameras
//! - [`ListenPolicy`] - Restart policy of the smart camera listen loop

mod camera_config;
mod listen_policy;

pub use camera_config::{CameraConfig, DEFAULT_HTTP_PORT, DEFAULT_RTSP_PORT, keys};
pub use listen_policy::{DEFAULT_RESTART_DELAY, ListenPolicy, MIN_RESTART_DELAY};

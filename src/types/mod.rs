// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the host/adapter boundary.
//!
//! # Types
//!
//! - [`NativeId`] - Opaque device identifier
//! - [`Interface`], [`DeviceType`], [`DeviceManifest`] - Discovery payloads
//! - [`Setting`], [`SettingType`], [`SettingValue`] - Settings schema
//! - [`MediaStreamOptions`], [`FfmpegInput`], [`MediaObject`] - Stream descriptors

mod device;
mod media;
mod native_id;
mod setting;

pub use device::{DeviceManifest, DeviceType, Interface};
pub use media::{
    AudioStreamOptions, FFMPEG_INPUT_MIME_TYPE, FfmpegInput, MediaObject, MediaStreamOptions,
    VideoStreamOptions,
};
pub use native_id::NativeId;
pub use setting::{Setting, SettingType, SettingValue};

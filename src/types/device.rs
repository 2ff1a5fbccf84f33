// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device descriptions reported to the host platform.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NativeId;

/// Capability interface a device declares to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interface {
    /// Produces a playable video stream.
    VideoCamera,
    /// Exposes an editable settings schema.
    Settings,
    /// Produces still images.
    Camera,
    /// Reports motion events.
    MotionSensor,
    /// Reports audio events.
    AudioSensor,
    /// Registers child devices.
    DeviceProvider,
}

impl Interface {
    /// Returns the interface name as known to the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VideoCamera => "VideoCamera",
            Self::Settings => "Settings",
            Self::Camera => "Camera",
            Self::MotionSensor => "MotionSensor",
            Self::AudioSensor => "AudioSensor",
            Self::DeviceProvider => "DeviceProvider",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a device as shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceType {
    /// A camera.
    #[default]
    Camera,
    /// A device that manages other devices.
    DeviceProvider,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("Camera"),
            Self::DeviceProvider => f.write_str("DeviceProvider"),
        }
    }
}

/// Discovery notification payload.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::types::{DeviceManifest, DeviceType, Interface, NativeId};
///
/// let manifest = DeviceManifest::camera(
///     NativeId::new("cam1"),
///     "Back Yard",
///     vec![Interface::VideoCamera, Interface::Settings],
/// );
/// assert_eq!(manifest.device_type, DeviceType::Camera);
/// assert!(manifest.has_interface(Interface::Settings));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceManifest {
    /// Identifier of the new device.
    pub native_id: NativeId,
    /// Display name chosen by the operator.
    pub name: String,
    /// Declared capability interfaces.
    pub interfaces: Vec<Interface>,
    /// Device category.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

impl DeviceManifest {
    /// Creates a manifest for a camera device.
    #[must_use]
    pub fn camera(native_id: NativeId, name: impl Into<String>, interfaces: Vec<Interface>) -> Self {
        Self {
            native_id,
            name: name.into(),
            interfaces,
            device_type: DeviceType::Camera,
        }
    }

    /// Returns true if the manifest declares the given interface.
    #[must_use]
    pub fn has_interface(&self, interface: Interface) -> bool {
        self.interfaces.contains(&interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_serializes_type_field() {
        let manifest = DeviceManifest::camera(
            NativeId::new("cam1"),
            "Front Door",
            vec![Interface::VideoCamera],
        );
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["nativeId"], "cam1");
        assert_eq!(json["type"], "Camera");
        assert_eq!(json["interfaces"], serde_json::json!(["VideoCamera"]));
    }

    #[test]
    fn interface_display_matches_host_name() {
        assert_eq!(Interface::VideoCamera.to_string(), "VideoCamera");
        assert_eq!(Interface::MotionSensor.to_string(), "MotionSensor");
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera registry and operator-driven camera creation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use super::CameraFactory;
use crate::error::Result;
use crate::host::HostPlatform;
use crate::types::{DeviceManifest, Interface, NativeId, Setting, SettingValue};

/// Settings key of the provider's "add camera" field.
pub const NEW_CAMERA_KEY: &str = "new-camera";

type IdGenerator = Box<dyn Fn() -> NativeId + Send + Sync>;

/// Registry of camera adapters.
///
/// Adapters are created on first lookup through the [`CameraFactory`] and
/// cached for the provider's lifetime, so repeated lookups of one identifier
/// return the same instance. Construction warms the registry with every
/// device the host already knows.
///
/// Adapters are created one at a time, outside the registry lock: a slow
/// factory never delays lookups of cameras that already exist. A factory
/// (or a camera family it runs) may look up existing cameras of the same
/// provider, but must not create new ones from within `create_camera`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rtspcam_lib::host::{HostPlatform, MemoryHost};
/// use rtspcam_lib::provider::{RtspCameraFactory, RtspProvider};
///
/// # fn main() -> rtspcam_lib::Result<()> {
/// let host = Arc::new(MemoryHost::new());
/// let provider = RtspProvider::new(Arc::clone(&host) as Arc<dyn HostPlatform>, RtspCameraFactory)?;
///
/// // Operator adds a camera by name
/// let native_id = provider.put_setting("new-camera", "Back Yard".into())?;
///
/// let camera = provider.get_device(&native_id)?;
/// assert!(Arc::ptr_eq(&camera, &provider.get_device(&native_id)?));
/// assert_eq!(host.discovered()[0].name, "Back Yard");
/// # Ok(())
/// # }
/// ```
pub struct RtspProvider<F: CameraFactory> {
    host: Arc<dyn HostPlatform>,
    factory: F,
    devices: RwLock<HashMap<NativeId, Arc<F::Camera>>>,
    creation: Mutex<()>,
    id_generator: IdGenerator,
}

impl<F: CameraFactory> RtspProvider<F> {
    /// Creates a provider and instantiates every device known to the host.
    ///
    /// # Errors
    ///
    /// Returns the first adapter construction failure.
    pub fn new(host: Arc<dyn HostPlatform>, factory: F) -> Result<Self> {
        let provider = Self {
            host,
            factory,
            devices: RwLock::new(HashMap::new()),
            creation: Mutex::new(()),
            id_generator: Box::new(NativeId::random),
        };

        for native_id in provider.host.device_ids() {
            provider.get_device(&native_id)?;
        }
        tracing::debug!(count = provider.len(), "Camera registry warmed");

        Ok(provider)
    }

    /// Replaces the generator of identifiers for operator-created cameras.
    #[must_use]
    pub fn with_id_generator<G>(mut self, generator: G) -> Self
    where
        G: Fn() -> NativeId + Send + Sync + 'static,
    {
        self.id_generator = Box::new(generator);
        self
    }

    /// Returns the camera factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Returns the interfaces declared for every camera of this provider.
    #[must_use]
    pub fn interfaces(&self) -> Vec<Interface> {
        let mut interfaces = vec![Interface::VideoCamera, Interface::Settings];
        interfaces.extend(self.factory.additional_interfaces());
        interfaces
    }

    /// Returns the provider's settings schema: a single "add camera" field.
    #[must_use]
    pub fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new(NEW_CAMERA_KEY, "Add RTSP Camera")
                .with_placeholder("Camera name, e.g.: Back Yard Camera, Baby Camera, etc"),
        ]
    }

    /// Registers a new camera named `value` with the host.
    ///
    /// The key is ignored. A fresh identifier is generated, the host is
    /// notified of the new device, and an alert asking the operator to
    /// complete setup is raised then cleared at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the registration.
    pub fn put_setting(&self, _key: &str, value: SettingValue) -> Result<NativeId> {
        let name = value.to_string();
        let native_id = (self.id_generator)();

        self.host.on_device_discovered(DeviceManifest::camera(
            native_id.clone(),
            name.clone(),
            self.interfaces(),
        ))?;
        tracing::info!(%native_id, %name, "Camera added");

        let text = format!("New Camera {name} ready. Check the notification area to complete setup.");
        self.host.raise_alert(&text);
        self.host.clear_alert(&text);

        Ok(native_id)
    }

    /// Asks the factory to search for cameras. The default factory does
    /// nothing; cameras are registered manually.
    ///
    /// # Errors
    ///
    /// Returns an error if the factory's discovery fails.
    pub fn discover_devices(&self, duration: Duration) -> Result<()> {
        self.factory.discover_devices(&self.host, duration)
    }

    /// Returns the adapter for `native_id`, creating it on first lookup.
    ///
    /// # Errors
    ///
    /// Returns the factory's error if the adapter cannot be created. Nothing
    /// is cached in that case.
    pub fn get_device(&self, native_id: &NativeId) -> Result<Arc<F::Camera>> {
        if let Some(camera) = self.devices.read().get(native_id) {
            return Ok(Arc::clone(camera));
        }

        let _creating = self.creation.lock();
        if let Some(camera) = self.devices.read().get(native_id) {
            return Ok(Arc::clone(camera));
        }

        let camera = Arc::new(self.factory.create_camera(native_id.clone(), &self.host)?);
        self.devices
            .write()
            .insert(native_id.clone(), Arc::clone(&camera));
        tracing::debug!(%native_id, "Camera created");

        Ok(camera)
    }

    /// Returns the identifiers of every instantiated camera.
    #[must_use]
    pub fn device_ids(&self) -> Vec<NativeId> {
        self.devices.read().keys().cloned().collect()
    }

    /// Returns the number of instantiated cameras.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns true if no camera has been instantiated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

impl<F: CameraFactory> std::fmt::Debug for RtspProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtspProvider")
            .field("devices", &self.device_ids())
            .finish_non_exhaustive()
    }
}

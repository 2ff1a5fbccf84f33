// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera factories used by the provider.

use std::sync::Arc;
use std::time::Duration;

use crate::camera::{Camera, CameraFamily, RtspCamera, SmartCamera};
use crate::config::ListenPolicy;
use crate::error::Result;
use crate::host::HostPlatform;
use crate::types::{Interface, NativeId};

/// Creates the camera adapters a provider manages.
pub trait CameraFactory: Send + Sync {
    /// Adapter type produced by this factory.
    type Camera: Camera + 'static;

    /// Creates the adapter for `native_id`.
    ///
    /// # Errors
    ///
    /// Any error is propagated to the caller of the provider unchanged.
    fn create_camera(&self, native_id: NativeId, host: &Arc<dyn HostPlatform>)
    -> Result<Self::Camera>;

    /// Interfaces declared in addition to `VideoCamera` and `Settings`.
    fn additional_interfaces(&self) -> Vec<Interface> {
        Vec::new()
    }

    /// Actively searches for cameras.
    ///
    /// The default registers nothing: cameras are added by the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails.
    fn discover_devices(&self, _host: &Arc<dyn HostPlatform>, _duration: Duration) -> Result<()> {
        Ok(())
    }
}

/// Factory of generic [`RtspCamera`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtspCameraFactory;

impl CameraFactory for RtspCameraFactory {
    type Camera = RtspCamera;

    fn create_camera(&self, native_id: NativeId, host: &Arc<dyn HostPlatform>) -> Result<RtspCamera> {
        Ok(RtspCamera::new(native_id, Arc::clone(host)))
    }
}

/// Factory of [`SmartCamera`]s of one family.
#[derive(Debug)]
pub struct SmartCameraFactory<F> {
    family: Arc<F>,
    policy: ListenPolicy,
}

impl<F: CameraFamily> SmartCameraFactory<F> {
    /// Creates a factory using the default listen policy.
    #[must_use]
    pub fn new(family: F) -> Self {
        Self {
            family: Arc::new(family),
            policy: ListenPolicy::default(),
        }
    }

    /// Sets the listen policy of the cameras created from now on.
    #[must_use]
    pub fn with_policy(mut self, policy: ListenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the shared camera family.
    #[must_use]
    pub fn family(&self) -> &Arc<F> {
        &self.family
    }
}

impl<F: CameraFamily> CameraFactory for SmartCameraFactory<F> {
    type Camera = SmartCamera<F>;

    fn create_camera(
        &self,
        native_id: NativeId,
        host: &Arc<dyn HostPlatform>,
    ) -> Result<SmartCamera<F>> {
        SmartCamera::with_policy(
            native_id,
            Arc::clone(host),
            Arc::clone(&self.family),
            self.policy.clone(),
        )
    }

    fn additional_interfaces(&self) -> Vec<Interface> {
        self.family.additional_interfaces()
    }
}

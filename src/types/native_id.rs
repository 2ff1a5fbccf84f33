// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Native device identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a camera device within the host platform.
///
/// The host owns the identifier space: identifiers loaded from the host are
/// kept verbatim, and identifiers minted by this library are random UUIDs in
/// their simple (unhyphenated) form.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::types::NativeId;
///
/// let known = NativeId::new("0.8127361");
/// assert_eq!(known.as_str(), "0.8127361");
///
/// let fresh = NativeId::random();
/// assert_ne!(fresh, NativeId::random());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeId(String);

impl NativeId {
    /// Wraps an identifier supplied by the host platform.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeId({})", self.0)
    }
}

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NativeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NativeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NativeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_creates_unique_ids() {
        let id1 = NativeId::random();
        let id2 = NativeId::random();
        assert_ne!(id1, id2);
    }

    #[test]
    fn random_id_is_simple_uuid() {
        let id = NativeId::random();
        assert_eq!(id.as_str().len(), 32);
        assert!(!id.as_str().contains('-'));
    }

    #[test]
    fn host_ids_are_kept_verbatim() {
        let id = NativeId::from("0.123456789");
        assert_eq!(id.to_string(), "0.123456789");
    }

    #[test]
    fn debug_format() {
        let id = NativeId::new("cam1");
        assert_eq!(format!("{id:?}"), "NativeId(cam1)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = NativeId::new("cam1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cam1\"");
    }

    #[test]
    fn hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        let id = NativeId::random();
        set.insert(id.clone());
        assert!(set.contains(&id));
    }
}

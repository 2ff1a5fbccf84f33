// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings schema exposed to the host UI.
//!
//! A [`Setting`] describes one editable field: its storage key, a title, an
//! optional placeholder and description, an optional [`SettingType`] and the
//! current value. Values written back by the operator arrive as a
//! [`SettingValue`] and are always stored as strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Explicit field type of a setting.
///
/// A setting without a type is rendered as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// Masked text input.
    Password,
    /// Toggle whose value is the string `"true"` or `"false"`.
    Boolean,
    /// Numeric input.
    Number,
}

/// One entry of a settings schema.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::types::{Setting, SettingType};
///
/// let setting = Setting::new("password", "Password")
///     .with_type(SettingType::Password)
///     .with_value("hunter2");
///
/// assert_eq!(setting.key, "password");
/// assert_eq!(setting.value.as_deref(), Some("hunter2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Storage key written by `put_setting`.
    pub key: String,
    /// Human readable title.
    pub title: String,
    /// Hint shown in an empty field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Longer explanation shown beneath the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field type; `None` means free text.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub setting_type: Option<SettingType>,
    /// Current value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Setting {
    /// Creates a free text setting with no value.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            placeholder: None,
            description: None,
            setting_type: None,
            value: None,
        }
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the field type.
    #[must_use]
    pub fn with_type(mut self, setting_type: SettingType) -> Self {
        self.setting_type = Some(setting_type);
        self
    }

    /// Sets the current value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the current value if one is present.
    #[must_use]
    pub fn with_optional_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }
}

/// A value submitted for a setting.
///
/// The host UI may submit text, booleans or numbers. Every variant is stored
/// through its [`Display`](fmt::Display) form, which renders booleans as
/// `true`/`false` and integral numbers without a fractional part.
///
/// # Examples
///
/// ```
/// use rtspcam_lib::types::SettingValue;
///
/// assert_eq!(SettingValue::from(true).to_string(), "true");
/// assert_eq!(SettingValue::from(80.0).to_string(), "80");
/// assert_eq!(SettingValue::from(1.5).to_string(), "1.5");
/// assert_eq!(SettingValue::from("Back Yard").to_string(), "Back Yard");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A boolean toggle value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SettingValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_setting_is_free_text() {
        let setting = Setting::new("url", "RTSP Stream URL");
        assert!(setting.setting_type.is_none());
        assert!(setting.value.is_none());
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let setting = Setting::new("new-camera", "Add RTSP Camera");
        let json = serde_json::to_value(&setting).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key": "new-camera", "title": "Add RTSP Camera" })
        );
    }

    #[test]
    fn serialization_renames_type() {
        let setting = Setting::new("noAudio", "No Audio")
            .with_type(SettingType::Boolean)
            .with_value("false");
        let json = serde_json::to_value(&setting).unwrap();
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["value"], "false");
    }

    #[test]
    fn integer_number_displays_without_fraction() {
        assert_eq!(SettingValue::from(554_i64).to_string(), "554");
    }

    #[test]
    fn bool_displays_lowercase() {
        assert_eq!(SettingValue::from(false).to_string(), "false");
    }

    #[test]
    fn untagged_deserialization() {
        let value: SettingValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, SettingValue::Bool(true));

        let value: SettingValue = serde_json::from_str("\"rtsp://cam\"").unwrap();
        assert_eq!(value, SettingValue::Text("rtsp://cam".to_string()));
    }
}

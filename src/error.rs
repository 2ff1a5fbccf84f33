// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `RtspCam` library.
//!
//! This module provides the error hierarchy for the failures that can cross
//! the host/adapter boundary: stream URL construction, host platform calls,
//! and adapter construction.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while building a video stream.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// The host platform rejected or failed a request.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// A camera family could not open an event subscription.
    #[error("event subscription failed: {0}")]
    Subscription(String),

    /// A smart camera was constructed outside of a tokio runtime.
    ///
    /// The listen loop is spawned at construction time and needs a runtime
    /// handle to run on.
    #[error("no tokio runtime available to run the listen loop")]
    NoRuntime,
}

/// Errors related to stream URL handling.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stored stream URL is absent or cannot be parsed.
    #[error("invalid stream URL {url:?}: {source}")]
    InvalidUrl {
        /// The URL string that failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The stream URL has no host, so credentials cannot be embedded in it.
    #[error("stream URL {0:?} cannot carry credentials")]
    CannotCarryCredentials(String),

    /// The transport descriptor could not be encoded for the media pipeline.
    #[error("failed to encode media descriptor: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors reported by the host platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused to register a discovered device.
    #[error("device registration rejected: {0}")]
    RegistrationRejected(String),

    /// The media pipeline could not materialize a media object.
    #[error("media object creation failed: {0}")]
    MediaObject(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display_includes_url() {
        let source = url::Url::parse("").unwrap_err();
        let err = StreamError::InvalidUrl {
            url: String::new(),
            source,
        };
        assert!(err.to_string().starts_with("invalid stream URL \"\""));
    }

    #[test]
    fn error_from_stream_error() {
        let stream_err = StreamError::CannotCarryCredentials("rtsp:foo".to_string());
        let err: Error = stream_err.into();
        assert!(matches!(
            err,
            Error::Stream(StreamError::CannotCarryCredentials(_))
        ));
    }

    #[test]
    fn host_error_display() {
        let err = HostError::RegistrationRejected("duplicate id".to_string());
        assert_eq!(
            err.to_string(),
            "device registration rejected: duplicate id"
        );
    }

    #[test]
    fn error_from_host_error() {
        let err: Error = HostError::MediaObject("pipeline offline".to_string()).into();
        assert_eq!(
            err.to_string(),
            "host error: media object creation failed: pipeline offline"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stream descriptor construction.

use url::Url;

use crate::config::CameraConfig;
use crate::error::StreamError;
use crate::types::{AudioStreamOptions, FfmpegInput, MediaStreamOptions, VideoStreamOptions};

/// Transport tuning passed to the media pipeline ahead of the stream URL.
///
/// Forces RTSP over TCP and widens the probe, reorder and delay windows so
/// slow or bursty cameras are analyzed correctly.
pub const TRANSPORT_ARGUMENTS: [&str; 10] = [
    "-rtsp_transport",
    "tcp",
    "-analyzeduration",
    "15000000",
    "-probesize",
    "10000000",
    "-reorder_queue_size",
    "1024",
    "-max_delay",
    "20000000",
];

/// Returns the capability descriptors of a camera stream.
///
/// Video is always present without constraints; audio is present unless it
/// has been disabled.
#[must_use]
pub fn stream_options(config: &CameraConfig) -> Vec<MediaStreamOptions> {
    vec![MediaStreamOptions {
        video: Some(VideoStreamOptions::default()),
        audio: (!config.no_audio).then(AudioStreamOptions::default),
    }]
}

/// Parses `stream_url` and embeds the configured credentials as userinfo.
///
/// With neither username nor password stored the URL is left untouched.
/// Otherwise the userinfo is replaced, an absent username becoming empty.
///
/// # Errors
///
/// Returns [`StreamError::InvalidUrl`] if the URL is absent or malformed, and
/// [`StreamError::CannotCarryCredentials`] if credentials are stored but the
/// URL has no host.
pub fn authenticated_url(stream_url: &str, config: &CameraConfig) -> Result<Url, StreamError> {
    let mut url = Url::parse(stream_url).map_err(|source| StreamError::InvalidUrl {
        url: stream_url.to_string(),
        source,
    })?;

    let password = config.password.as_deref().filter(|p| !p.is_empty());
    if config.username.is_none() && password.is_none() {
        return Ok(url);
    }

    let username = config.username.as_deref().unwrap_or_default();
    url.set_username(username)
        .and_then(|()| url.set_password(password))
        .map_err(|()| StreamError::CannotCarryCredentials(stream_url.to_string()))?;

    Ok(url)
}

/// Builds the transport descriptor for `stream_url`.
///
/// The argument list is [`TRANSPORT_ARGUMENTS`] followed by `-i` and the
/// encoded URL with credentials, which is always the last argument.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or cannot carry credentials.
pub fn ffmpeg_input(
    stream_url: &str,
    config: &CameraConfig,
    options: Option<MediaStreamOptions>,
) -> Result<FfmpegInput, StreamError> {
    let url = authenticated_url(stream_url, config)?;

    let mut input_arguments: Vec<String> =
        TRANSPORT_ARGUMENTS.iter().map(ToString::to_string).collect();
    input_arguments.push("-i".to_string());
    input_arguments.push(url.to_string());

    Ok(FfmpegInput {
        input_arguments,
        media_stream_options: options,
    })
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Media descriptors handed to the host media pipeline.

use serde::{Deserialize, Serialize};

/// Mime type of a media object wrapping an [`FfmpegInput`].
pub const FFMPEG_INPUT_MIME_TYPE: &str = "x-scrypted/x-ffmpeg-input";

/// Video capability of a stream. No field set means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStreamOptions {
    /// Video codec, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Frame width in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Frame height in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Audio capability of a stream. No field set means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStreamOptions {
    /// Audio codec, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
}

/// Audio/video capability descriptor of a stream.
///
/// A stream without audio has `audio` set to `None`, which is omitted
/// entirely from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStreamOptions {
    /// Video capability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoStreamOptions>,
    /// Audio capability; absent when audio is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioStreamOptions>,
}

impl MediaStreamOptions {
    /// Returns true if the stream declares an audio track.
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Transport descriptor consumed by the media pipeline.
///
/// `input_arguments` is an ordered ffmpeg argument list terminated by the
/// fully qualified stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FfmpegInput {
    /// Ordered input arguments.
    pub input_arguments: Vec<String>,
    /// Capability descriptor of the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_stream_options: Option<MediaStreamOptions>,
}

impl FfmpegInput {
    /// Returns the stream URL, which is always the last argument.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.input_arguments.last().map(String::as_str)
    }
}

/// Opaque playable media handle returned by the host media pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    mime_type: String,
    data: Vec<u8>,
}

impl MediaObject {
    /// Creates a media object from its mime type and payload.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Returns the mime type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes the payload as an [`FfmpegInput`].
    ///
    /// Returns `None` if the object does not wrap an ffmpeg input.
    #[must_use]
    pub fn ffmpeg_input(&self) -> Option<FfmpegInput> {
        if self.mime_type != FFMPEG_INPUT_MIME_TYPE {
            return None;
        }
        serde_json::from_slice(&self.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_is_omitted_when_absent() {
        let options = MediaStreamOptions {
            video: Some(VideoStreamOptions::default()),
            audio: None,
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({ "video": {} }));
    }

    #[test]
    fn ffmpeg_input_uses_camel_case() {
        let input = FfmpegInput {
            input_arguments: vec!["-i".to_string(), "rtsp://cam/".to_string()],
            media_stream_options: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "inputArguments": ["-i", "rtsp://cam/"] })
        );
        assert_eq!(input.url(), Some("rtsp://cam/"));
    }

    #[test]
    fn media_object_decodes_ffmpeg_input() {
        let input = FfmpegInput {
            input_arguments: vec!["rtsp://cam/".to_string()],
            media_stream_options: Some(MediaStreamOptions::default()),
        };
        let object = MediaObject::new(FFMPEG_INPUT_MIME_TYPE, serde_json::to_vec(&input).unwrap());
        assert_eq!(object.ffmpeg_input(), Some(input));
    }

    #[test]
    fn media_object_with_other_mime_is_not_ffmpeg_input() {
        let object = MediaObject::new("image/jpeg", vec![0xff, 0xd8]);
        assert!(object.ffmpeg_input().is_none());
    }
}

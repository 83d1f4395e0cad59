//! Fixed-stride parser for the usher multi-variant playlist.
//!
//! Twitch's master playlists are rigidly shaped: two session header lines,
//! then repeating three-line records of `#EXT-X-MEDIA` (quality label),
//! `#EXT-X-STREAM-INF` (resolution, bandwidth), and the media playlist URL.
//! The scan exploits that shape instead of doing general M3U8 parsing.

use crate::error::{Result, UsherError};

/// One quality rendition of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamVariant {
    /// Human-readable quality label, e.g. `"1080p60 (source)"` or `"audio_only"`.
    pub quality: String,
    /// `WIDTHxHEIGHT` string; `None` for audio-only renditions.
    pub resolution: Option<String>,
    /// Playable media-playlist URL.
    pub url: String,
}

/// Parse manifest text into variants, in manifest order (upstream emits
/// highest quality first).
///
/// Records start at split-line index 4 and repeat every 3 lines. The upper
/// bound excludes the final split-line (the empty remainder of the trailing
/// newline) when the manifest is long enough to hold records; manifests of
/// 4 or fewer lines yield an empty vec, not an error.
pub fn parse_playlist(playlist: &str) -> Result<Vec<StreamVariant>> {
    let lines: Vec<&str> = playlist.split('\n').collect();
    let limit = if lines.len() > 4 {
        lines.len() - 1
    } else {
        lines.len()
    };

    let mut variants = Vec::new();
    for i in (4..limit).step_by(3) {
        let quality = lines[i - 2]
            .split_once("NAME=\"")
            .and_then(|(_, rest)| rest.split_once('"'))
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| {
                UsherError::MalformedResponse(format!(
                    "no NAME attribute in media line: {}",
                    lines[i - 2]
                ))
            })?;
        let resolution = lines[i - 1]
            .split_once("RESOLUTION=")
            .and_then(|(_, rest)| rest.split(',').next())
            .map(str::to_string);
        variants.push(StreamVariant {
            quality,
            resolution,
            url: lines[i].to_string(),
        });
    }
    Ok(variants)
}

//! Error types for the playback manifest pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by token exchange, playlist fetch, and parsing.
#[derive(Error, Debug)]
pub enum UsherError {
    /// Non-success status from an upstream endpoint. `message` carries the
    /// body's `message` field when the body was JSON, the raw body otherwise.
    #[error("Twitch returned status code {status}: {message}")]
    Upstream {
        status: StatusCode,
        message: String,
    },

    /// Upstream answered 200 but an expected field was absent.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The manifest endpoint answered 404. Twitch serves no transcode for
    /// channels that are not broadcasting, so this usually means offline.
    #[error("Transcode does not exist - the stream is probably offline")]
    StreamOffline,

    /// Transport-level failure (DNS, TLS, connect, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, UsherError>;

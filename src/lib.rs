//! `usher` - Twitch playback manifest client
//!
//! Exchanges a channel login or VOD id for a short-lived playback access
//! token, then exchanges the token for the HLS multi-variant playlist behind
//! it. The playlist can be returned raw or parsed into quality variants.
//!
//! # Example
//!
//! ```rust,no_run
//! use usher::Usher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let twitch = Usher::new(usher::DEFAULT_CLIENT_ID)?;
//!     for variant in twitch.get_stream("mizkif").await? {
//!         println!("{:16} {}", variant.quality, variant.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod playlist;
pub mod token;

pub use client::{Usher, DEFAULT_CLIENT_ID};
pub use error::{Result, UsherError};
pub use playlist::{parse_playlist, StreamVariant};
pub use token::AccessToken;

/// Version of usher
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

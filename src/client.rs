//! Client facade over the token and usher endpoints.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, UsherError};
use crate::playlist::{parse_playlist, StreamVariant};
use crate::token::{AccessToken, GqlPacket, GqlResponse, GQL_URL};

/// Client id of the public Twitch web player. Works for anonymous playback;
/// registered applications should pass their own id instead.
pub const DEFAULT_CLIENT_ID: &str = "kimne78kx3ncx6brgo4mv6wki5h1ko";

const USHER_URL: &str = "https://usher.ttvnw.net";

/// Twitch playback manifest client.
///
/// Holds the client id and a pooled HTTP client; carries no other state, so
/// one instance can serve concurrent [`get_stream`](Self::get_stream) /
/// [`get_vod`](Self::get_vod) calls, each with its own single-use token.
pub struct Usher {
    client: Client,
    client_id: String,
    gql_url: String,
    usher_url: String,
}

impl Usher {
    /// Create a client authenticated by `client_id`.
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .tcp_nodelay(true)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            client_id: client_id.into(),
            gql_url: GQL_URL.to_string(),
            usher_url: USHER_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoints(client_id: &str, gql_url: &str, usher_url: &str) -> Result<Self> {
        let mut usher = Self::new(client_id)?;
        usher.gql_url = gql_url.to_string();
        usher.usher_url = usher_url.to_string();
        Ok(usher)
    }

    /// Fetch and parse the variant playlist for a live channel.
    ///
    /// Variants come back in manifest order, highest quality first.
    #[instrument(skip(self))]
    pub async fn get_stream(&self, channel: &str) -> Result<Vec<StreamVariant>> {
        let playlist = self.get_stream_raw(channel).await?;
        parse_playlist(&playlist)
    }

    /// Fetch the live variant playlist as raw manifest text.
    #[instrument(skip(self))]
    pub async fn get_stream_raw(&self, channel: &str) -> Result<String> {
        let token = self.access_token(channel, false, "").await?;
        self.playlist(channel, &token, false).await
    }

    /// Fetch and parse the variant playlist for an archived video.
    #[instrument(skip(self))]
    pub async fn get_vod(&self, id: &str) -> Result<Vec<StreamVariant>> {
        let playlist = self.get_vod_raw(id).await?;
        parse_playlist(&playlist)
    }

    /// Fetch the VOD variant playlist as raw manifest text.
    #[instrument(skip(self))]
    pub async fn get_vod_raw(&self, id: &str) -> Result<String> {
        let token = self.access_token("", true, id).await?;
        self.playlist(id, &token, true).await
    }

    async fn access_token(&self, channel: &str, vod: bool, id: &str) -> Result<AccessToken> {
        let packet = if vod {
            GqlPacket::vod(id)
        } else {
            GqlPacket::live(channel)
        };

        debug!(vod, "requesting playback access token");
        let response = self
            .client
            .post(&self.gql_url)
            .header("Client-ID", &self.client_id)
            .json(&packet)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(UsherError::Upstream {
                status,
                message: upstream_message(&body),
            });
        }

        let responses: Vec<GqlResponse> = serde_json::from_str(&body)
            .map_err(|e| UsherError::MalformedResponse(format!("invalid token response: {e}")))?;
        let first = responses
            .into_iter()
            .next()
            .ok_or_else(|| UsherError::MalformedResponse("empty response array".into()))?;
        first.into_token(vod)
    }

    async fn playlist(&self, id: &str, token: &AccessToken, vod: bool) -> Result<String> {
        let path = if vod { "vod" } else { "api/channel/hls" };
        let url = format!("{}/{path}/{id}.m3u8", self.usher_url);

        debug!(vod, "fetching variant playlist");
        let response = self
            .client
            .get(&url)
            .header("Client-ID", &self.client_id)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("token", token.value.as_str()),
                ("sig", token.signature.as_str()),
                ("allow_source", "true"),
                ("allow_audio_only", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(UsherError::StreamOffline),
            _ => Err(UsherError::Upstream {
                status,
                message: upstream_message(&response.text().await.unwrap_or_default()),
            }),
        }
    }
}

/// Pull the `message` field out of an error body, falling back to the body
/// itself. Twitch error bodies look like `{"error":"...","status":404,
/// "message":"..."}`.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

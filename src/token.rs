//! Playback access-token exchange.
//!
//! Twitch gates manifest requests behind a short-lived signed token obtained
//! from the GraphQL `PlaybackAccessToken_Template` operation. A token is
//! scoped to exactly one channel (live) or one video id (VOD) and is spent on
//! the manifest request that follows it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UsherError};

pub(crate) const GQL_URL: &str = "https://gql.twitch.tv/gql";

const OPERATION_NAME: &str = "PlaybackAccessToken_Template";
const PLAYER_TYPE: &str = "site";
const QUERY: &str = r#"query PlaybackAccessToken_Template(
    $login: String!
    $isLive: Boolean!
    $vodID: ID!
    $isVod: Boolean!
    $playerType: String!
  ) {
    streamPlaybackAccessToken(
      channelName: $login
      params: {
        platform: "web"
        playerBackend: "mediaplayer"
        playerType: $playerType
      }
    ) @include(if: $isLive) {
      value
      signature
      __typename
    }
    videoPlaybackAccessToken(
      id: $vodID
      params: {
        platform: "web"
        playerBackend: "mediaplayer"
        playerType: $playerType
      }
    ) @include(if: $isVod) {
      value
      signature
      __typename
    }
  }"#;

/// Short-lived signed credential for one manifest request.
///
/// `value` is an opaque JSON blob describing what the holder may watch;
/// `signature` authenticates it. Both go into the usher query string verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub value: String,
    pub signature: String,
}

/// One entry of the batched GraphQL request body.
#[derive(Debug, Serialize)]
pub(crate) struct GqlPacket {
    #[serde(rename = "operationName")]
    operation_name: &'static str,
    variables: GqlVariables,
    query: &'static str,
}

#[derive(Debug, Serialize)]
struct GqlVariables {
    #[serde(rename = "isLive")]
    is_live: bool,
    #[serde(rename = "isVod")]
    is_vod: bool,
    login: String,
    #[serde(rename = "playerType")]
    player_type: &'static str,
    #[serde(rename = "vodID")]
    vod_id: String,
}

impl GqlPacket {
    /// Live-mode packet: requests only the stream token shape.
    pub(crate) fn live(channel: &str) -> [Self; 1] {
        Self::build(true, channel.to_string(), String::new())
    }

    /// VOD-mode packet: requests only the video token shape.
    pub(crate) fn vod(id: &str) -> [Self; 1] {
        Self::build(false, String::new(), id.to_string())
    }

    fn build(live: bool, login: String, vod_id: String) -> [Self; 1] {
        [Self {
            operation_name: OPERATION_NAME,
            variables: GqlVariables {
                is_live: live,
                is_vod: !live,
                login,
                player_type: PLAYER_TYPE,
                vod_id,
            },
            query: QUERY,
        }]
    }
}

/// One entry of the batched GraphQL response body.
#[derive(Debug, Deserialize)]
pub(crate) struct GqlResponse {
    data: Option<GqlData>,
}

#[derive(Debug, Deserialize)]
struct GqlData {
    #[serde(rename = "streamPlaybackAccessToken")]
    stream_playback_access_token: Option<AccessToken>,
    #[serde(rename = "videoPlaybackAccessToken")]
    video_playback_access_token: Option<AccessToken>,
}

impl GqlResponse {
    /// Extract the token matching the requested mode.
    ///
    /// The `@include` directives mean a live request carries only
    /// `streamPlaybackAccessToken` and a VOD request only
    /// `videoPlaybackAccessToken`; the other field is absent, not null-valued.
    pub(crate) fn into_token(self, vod: bool) -> Result<AccessToken> {
        let data = self
            .data
            .ok_or_else(|| UsherError::MalformedResponse("data missing from response".into()))?;
        let (token, field) = if vod {
            (data.video_playback_access_token, "videoPlaybackAccessToken")
        } else {
            (data.stream_playback_access_token, "streamPlaybackAccessToken")
        };
        token.ok_or_else(|| UsherError::MalformedResponse(format!("{field} missing from data")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn variables(packet: &[GqlPacket; 1]) -> Value {
        serde_json::to_value(packet).unwrap()[0]["variables"].clone()
    }

    #[test]
    fn test_live_packet_never_sets_vod_fields() {
        let vars = variables(&GqlPacket::live("mizkif"));
        assert_eq!(vars["isLive"], json!(true));
        assert_eq!(vars["isVod"], json!(false));
        assert_eq!(vars["login"], json!("mizkif"));
        assert_eq!(vars["vodID"], json!(""));
    }

    #[test]
    fn test_vod_packet_never_sets_live_fields() {
        let vars = variables(&GqlPacket::vod("872482730"));
        assert_eq!(vars["isLive"], json!(false));
        assert_eq!(vars["isVod"], json!(true));
        assert_eq!(vars["login"], json!(""));
        assert_eq!(vars["vodID"], json!("872482730"));
    }

    #[test]
    fn test_packet_shape() {
        let body = serde_json::to_value(GqlPacket::live("mizkif")).unwrap();
        assert!(body.is_array());
        assert_eq!(body[0]["operationName"], json!("PlaybackAccessToken_Template"));
        assert_eq!(body[0]["variables"]["playerType"], json!("site"));
        assert!(body[0]["query"]
            .as_str()
            .unwrap()
            .contains("streamPlaybackAccessToken"));
    }

    #[test]
    fn test_into_token_picks_mode_field() {
        let resp: GqlResponse = serde_json::from_value(json!({
            "data": {
                "streamPlaybackAccessToken": { "value": "{}", "signature": "deadbeef" }
            }
        }))
        .unwrap();
        let token = resp.into_token(false).unwrap();
        assert_eq!(token.signature, "deadbeef");
    }

    #[test]
    fn test_into_token_missing_field_is_malformed() {
        let resp: GqlResponse = serde_json::from_value(json!({
            "data": {
                "streamPlaybackAccessToken": { "value": "{}", "signature": "deadbeef" }
            }
        }))
        .unwrap();
        let err = resp.into_token(true).unwrap_err();
        assert!(err.to_string().contains("videoPlaybackAccessToken"));
    }

    #[test]
    fn test_into_token_missing_data_is_malformed() {
        let resp: GqlResponse = serde_json::from_value(json!({})).unwrap();
        let err = resp.into_token(false).unwrap_err();
        assert!(err.to_string().contains("data missing"));
    }
}

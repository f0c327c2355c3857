//! Response models for the relationship endpoints.
//!
//! # Design
//! Every field defaults when missing and unknown fields are ignored, so a
//! partial body such as `{"screen_name":"golang"}` decodes into a `User`
//! with only that field set. A JSON `null` in a scalar field (Twitter sends
//! one for an empty `description` or `location`) decodes as the default too.
//! Numeric ids come with a string twin because
//! JSON consumers that parse numbers as doubles lose precision above 2^53.

use serde::{Deserialize, Deserializer, Serialize};

/// An account, as returned by create/destroy and inside `CursoredUsers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub protected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub friends_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub statuses_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub favourites_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    pub blocking: Option<bool>,
    pub muting: Option<bool>,
    /// Most recent status; absent when `skip_status` was requested.
    pub status: Option<Box<Tweet>>,
}

/// A status, as nested in `User::status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tweet {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub retweet_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_count: u64,
    pub in_reply_to_status_id: Option<u64>,
    pub in_reply_to_screen_name: Option<String>,
    /// Present unless `include_entities=false` was requested.
    pub entities: Option<Entities>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entities {
    pub hashtags: Vec<HashtagEntity>,
    pub urls: Vec<UrlEntity>,
    pub user_mentions: Vec<MentionEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagEntity {
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expanded_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionEntity {
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
}

/// Decodes `null` as `T::default()`. Missing fields are covered by the
/// container-level `#[serde(default)]`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

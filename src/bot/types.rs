//! Bot API wire types
//!
//! Encoding tags, the response envelope and the few records the client
//! decodes itself.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How a request payload is put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Parameters appended to the request path, no body
    #[serde(rename = "querystring")]
    QueryString,
    /// `application/x-www-form-urlencoded` body
    #[serde(rename = "urlencoded")]
    UrlEncoded,
    /// `application/json` body (default)
    #[default]
    Json,
    /// `multipart/form-data` body
    #[serde(rename = "formdata")]
    FormData,
}

impl RequestType {
    /// The tag used to name this encoding
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::QueryString => "querystring",
            RequestType::UrlEncoded => "urlencoded",
            RequestType::Json => "json",
            RequestType::FormData => "formdata",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "querystring" => Ok(RequestType::QueryString),
            "urlencoded" => Ok(RequestType::UrlEncoded),
            "json" => Ok(RequestType::Json),
            "formdata" => Ok(RequestType::FormData),
            other => Err(Error::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// The `{ok, result | error_code + description}` wrapper of every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update kinds a bot can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedUpdate {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
}

/// A Telegram user or bot, as returned by `getMe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_join_groups: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_read_all_group_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_inline_queries: Option<bool>,
}

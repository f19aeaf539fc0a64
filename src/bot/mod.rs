//! Bot API client module
//!
//! Dispatches Bot API method calls over HTTP.
//!
//! # Features
//!
//! - **Four Encodings**: Query string, url-encoded, JSON and multipart
//! - **Envelope Decoding**: `ok: true` yields the result, everything else an error value
//! - **Pure Preparation**: Requests can be built and inspected without sending them

mod client;
mod request;
mod types;

pub use client::{Bot, BotConfig, BotConfigBuilder, DEFAULT_BASE_URL, TOKEN_PREFIX};
pub use request::{
    decode_envelope, stringify, Payload, PreparedRequest, RequestArgs, DEFAULT_CONTENT_TYPE,
};
pub use types::{AllowedUpdate, RequestType, ResponseEnvelope, User};

//! Bot API client
//!
//! Sends one HTTP request per call and decodes the response envelope.
//! There are no retries, no rate limiting and no client-side timeout: a
//! failed call is reported once and retrying is left to the caller.

use super::request::{decode_envelope, PreparedRequest, RequestArgs};
use super::types::User;
use crate::error::{Error, Result};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Default Bot API host
pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Prefix conventionally carried by bot tokens in paths
pub const TOKEN_PREFIX: &str = "bot";

/// Configuration for the Bot API client
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Scheme and host of the Bot API server
    pub base_url: String,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers: HashMap::new(),
            user_agent: format!("telegram-bot-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BotConfig {
    /// Create a new config builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for Bot API client config
#[derive(Default)]
pub struct BotConfigBuilder {
    config: BotConfig,
}

impl BotConfigBuilder {
    /// Set the base URL (a local Bot API server, or a mock in tests)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        self.config
    }
}

/// Client for a single bot
pub struct Bot {
    client: Client,
    config: BotConfig,
    base_url: Url,
    token: String,
    prefix: String,
}

impl Bot {
    /// Create a client for the given token with default configuration
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(token, BotConfig::default())
    }

    /// Create a client with custom configuration.
    ///
    /// A leading `bot` on the token is dropped; it is added back when the
    /// request path is formed.
    pub fn with_config(token: &str, config: BotConfig) -> Result<Self> {
        let token = token.strip_prefix(TOKEN_PREFIX).unwrap_or(token).to_string();
        if token.is_empty() {
            return Err(Error::config("Bot token must not be empty"));
        }

        let mut base_url = Url::parse(&config.base_url)?;
        base_url.set_query(None);
        base_url.set_fragment(None);
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        let prefix = format!("/{TOKEN_PREFIX}{token}/");

        Ok(Self {
            client,
            config,
            base_url,
            token,
            prefix,
        })
    }

    /// Full URL of a request path, kept under the base URL's own path
    /// (`http://host/tg/` + `/bot<token>/getMe` → `http://host/tg/bot<token>/getMe`)
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// The token without its `bot` prefix
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Encode a call without sending it
    pub fn prepare(&self, method: &str, args: impl Into<RequestArgs>) -> Result<PreparedRequest> {
        if method.is_empty() {
            return Err(Error::config("Method name must not be empty"));
        }
        PreparedRequest::build(&self.prefix, method, args.into())
    }

    /// Call a Bot API method and decode its result
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        args: impl Into<RequestArgs>,
    ) -> Result<T> {
        let prepared = self.prepare(method, args)?;
        self.send(method, prepared).await
    }

    /// Call a Bot API method with a typed JSON payload
    pub async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<T> {
        let params = serde_json::to_value(params)?;
        self.request(method, params).await
    }

    /// Fetch the bot's own user record
    pub async fn me(&self) -> Result<User> {
        self.request("getMe", ()).await
    }

    /// Send a prepared request and decode the envelope
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        prepared: PreparedRequest,
    ) -> Result<T> {
        let url = self.endpoint(&prepared.path)?;
        let content_length = prepared.content_length();

        let mut req = self.client.request(prepared.method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = req
            .header(CONTENT_TYPE, prepared.content_type.as_str())
            .header(CONTENT_LENGTH, content_length);

        if let Some(body) = prepared.body {
            req = req.body(body);
        }

        debug!(
            "Calling {} via {} ({} bytes)",
            method, prepared.method, content_length
        );

        let response = req.send().await?;
        let status = response.status();
        let reason = reason_phrase(&response);
        let body = response.bytes().await?;

        debug!(
            "{} answered {} with {} bytes",
            method,
            status.as_u16(),
            body.len()
        );

        decode_envelope(status, reason.as_deref(), &body)
    }
}

/// Reason phrase from the status line, when it differs from the canonical one
fn reason_phrase(response: &reqwest::Response) -> Option<String> {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::to_string)
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("config", &self.config)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

//! Request preparation and response decoding
//!
//! Turns a method name plus call arguments into a [`PreparedRequest`] and a
//! buffered response body back into a result. Nothing here touches the
//! network, so every encoding rule can be exercised directly.

use super::types::{RequestType, ResponseEnvelope};
use crate::error::{Error, Result, TelegramError};
use crate::form::FormData;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Characters escaped in query strings and url-encoded bodies.
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Content type sent when a request has no body of its own
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Payload of a single call
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured parameters
    Params(Value),
    /// A prebuilt multipart form
    Form(FormData),
}

/// Arguments of a single call: an optional payload and an optional encoding.
///
/// Conversions exist for the common call shapes:
///
/// ```rust
/// use serde_json::json;
/// use telegram_bot_kit::bot::{RequestArgs, RequestType};
///
/// let none = RequestArgs::from(());
/// let tag_only = RequestArgs::from(RequestType::QueryString);
/// let params = RequestArgs::from(json!({"chat_id": 1}));
/// let both = RequestArgs::from((json!({"chat_id": 1}), RequestType::UrlEncoded));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestArgs {
    pub payload: Option<Payload>,
    pub request_type: Option<RequestType>,
}

impl RequestArgs {
    /// Arguments without payload or encoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload
    #[must_use]
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the encoding
    #[must_use]
    pub fn request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Decide the encoding and the payload actually sent.
    ///
    /// A multipart form always wins. Without an explicit encoding, a string
    /// payload naming an encoding tag is taken as that tag with no payload;
    /// any other string is rejected. Otherwise JSON is used.
    pub fn resolve(self) -> Result<(Option<Payload>, RequestType)> {
        match (self.payload, self.request_type) {
            (Some(Payload::Form(form)), _) => Ok((Some(Payload::Form(form)), RequestType::FormData)),
            (Some(Payload::Params(Value::String(tag))), None) => Ok((None, tag.parse()?)),
            (Some(Payload::Params(Value::Null)), request_type) => {
                Ok((None, request_type.unwrap_or_default()))
            }
            (payload, request_type) => Ok((payload, request_type.unwrap_or_default())),
        }
    }
}

impl From<()> for RequestArgs {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<RequestType> for RequestArgs {
    fn from(request_type: RequestType) -> Self {
        Self::new().request_type(request_type)
    }
}

impl From<Value> for RequestArgs {
    fn from(params: Value) -> Self {
        Self::new().payload(Payload::Params(params))
    }
}

impl From<Map<String, Value>> for RequestArgs {
    fn from(params: Map<String, Value>) -> Self {
        Self::from(Value::Object(params))
    }
}

impl From<(Value, RequestType)> for RequestArgs {
    fn from((params, request_type): (Value, RequestType)) -> Self {
        Self::from(params).request_type(request_type)
    }
}

impl From<FormData> for RequestArgs {
    fn from(form: FormData) -> Self {
        Self::new().payload(Payload::Form(form))
    }
}

impl From<(FormData, RequestType)> for RequestArgs {
    fn from((form, request_type): (FormData, RequestType)) -> Self {
        Self::from(form).request_type(request_type)
    }
}

/// A fully encoded request, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// GET without a body, POST with one
    pub method: Method,
    /// `/bot<token>/<method>[?query]`
    pub path: String,
    /// Value of the `Content-Type` header
    pub content_type: String,
    /// Serialized body, if any
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Encode a call for the given path prefix
    pub fn build(prefix: &str, method: &str, args: RequestArgs) -> Result<Self> {
        let (payload, request_type) = args.resolve()?;

        let mut path = format!("{prefix}{method}");
        let mut content_type = None;
        let mut body = None;

        match (payload, request_type) {
            (None, _) => {}
            (Some(Payload::Params(params)), RequestType::QueryString) => {
                let query = stringify(&params, request_type)?;
                if !query.is_empty() {
                    path.push('?');
                    path.push_str(&query);
                }
            }
            (Some(Payload::Params(params)), RequestType::UrlEncoded) => {
                content_type = Some("application/x-www-form-urlencoded".to_string());
                body = Some(stringify(&params, request_type)?.into_bytes());
            }
            (Some(Payload::Params(params)), RequestType::Json) => {
                content_type = Some(DEFAULT_CONTENT_TYPE.to_string());
                body = Some(serde_json::to_vec(&params)?);
            }
            (Some(Payload::Form(form)), _) => {
                let form = form.data();
                content_type = Some(form.content_type);
                body = Some(form.body);
            }
            (Some(Payload::Params(_)), RequestType::FormData) => {
                return Err(Error::invalid_payload(
                    request_type,
                    "multipart encoding requires a FormData payload",
                ));
            }
        }

        Ok(Self {
            method: if body.is_some() { Method::POST } else { Method::GET },
            path,
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            body,
        })
    }

    /// Length of the body, 0 without one
    pub fn content_length(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}

/// Encode a parameter object as `key=value` pairs joined by `&`.
///
/// Strings are sent as-is, numbers and booleans in their JSON form, nested
/// objects and arrays as JSON text and `null` as an empty value.
pub fn stringify(params: &Value, request_type: RequestType) -> Result<String> {
    let Value::Object(map) = params else {
        return Err(Error::invalid_payload(
            request_type,
            "parameters must be a JSON object",
        ));
    };

    let pairs: Vec<String> = map
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                    value.to_string()
                }
            };
            format!("{}={}", escape(key), escape(&value))
        })
        .collect();

    Ok(pairs.join("&"))
}

fn escape(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

/// Decode a buffered response body.
///
/// An empty body becomes a transport error built from the status line: the
/// reason phrase the server sent, else the canonical one, else `HTTP <code>`.
/// A non-empty body must be a JSON envelope: `ok: true` yields `result`,
/// `ok: false` yields a protocol error.
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    reason: Option<&str>,
    body: &[u8],
) -> Result<T> {
    if body.is_empty() {
        let reason = reason
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .or_else(|| status.canonical_reason())
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);
        return Err(TelegramError::transport(status.as_u16(), reason).into());
    }

    let envelope: ResponseEnvelope = serde_json::from_slice(body)?;
    if envelope.ok {
        let result = envelope.result.unwrap_or(Value::Null);
        return Ok(serde_json::from_value(result)?);
    }

    Err(TelegramError::protocol(envelope.error_code, envelope.description).into())
}

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Telegram Bot Kit
//!
//! A small Telegram Bot API client plus a generator that turns the public
//! API documentation into type declarations.
//!
//! ## Features
//!
//! - **Generic Dispatcher**: Call any Bot API method by name
//! - **Four Encodings**: JSON, urlencoded, query string and multipart payloads
//! - **Multipart Builder**: Text fields and binary file parts with random boundaries
//! - **Uniform Errors**: Transport and protocol failures share one error value
//! - **Schema Generator**: Docs page → TypeScript declarations or a JSON schema
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::{json, Value};
//! use telegram_bot_kit::{Bot, RequestType, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let bot = Bot::new("123456:ABC-DEF")?;
//!
//!     let me = bot.me().await?;
//!     println!("Running as @{}", me.username.unwrap_or_default());
//!
//!     let sent: Value = bot
//!         .request(
//!             "sendMessage",
//!             (json!({"chat_id": 42, "text": "hi"}), RequestType::UrlEncoded),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │            Bot               │   │          Generator           │
//! │  request(method, args) → T   │   │  fetch → extract → emit      │
//! └──────────────┬───────────────┘   └──────────────┬───────────────┘
//!                │                                  │
//! ┌──────────────┴───────────────┐   ┌──────────────┴───────────────┐
//! │ RequestArgs → PreparedRequest│   │ rewrite_type / infer_response│
//! │ json │ urlencoded │ query    │   │ Extractor (scraper)          │
//! │ FormData (multipart)         │   │ TypeScriptEmitter / JSON     │
//! └──────────────┬───────────────┘   └──────────────────────────────┘
//!                │
//!        decode_envelope → Result<T, Error>
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and the Telegram error value
pub mod error;

/// Bot API dispatcher
pub mod bot;

/// Multipart form-data builder
pub mod form;

/// Documentation scraper and type declaration generator
pub mod schema;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, TelegramError};

// Re-export commonly used types
pub use bot::{AllowedUpdate, Bot, BotConfig, RequestArgs, RequestType, User};
pub use form::{FileMeta, FormData};
pub use schema::{ApiSchema, Generator, GeneratorConfig, TypeExpr};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

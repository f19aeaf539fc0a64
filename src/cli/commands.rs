//! CLI commands and argument parsing

use crate::bot::DEFAULT_BASE_URL;
use crate::schema::{OutputFormat, DEFAULT_DOCS_URL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Telegram Bot API toolkit CLI
#[derive(Parser, Debug)]
#[command(name = "telegram-bot-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate type declarations from the Bot API documentation
    Generate {
        /// Documentation page to scrape
        #[arg(long, default_value = DEFAULT_DOCS_URL)]
        url: String,

        /// File to write
        #[arg(short, long, default_value = "Telegram.d.ts")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Typescript)]
        format: OutputFormat,

        /// Namespace wrapping the declarations
        #[arg(long, default_value = "Telegram")]
        namespace: String,
    },

    /// Call a Bot API method and print its result
    Call {
        /// Method name, e.g. sendMessage
        method: String,

        /// Bot token
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        token: String,

        /// Parameter as key=value (value parsed as JSON when it is valid JSON)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Parameters as a JSON object
        #[arg(long)]
        params_json: Option<String>,

        /// Payload encoding: json, urlencoded, querystring or formdata
        #[arg(short, long)]
        encoding: Option<String>,

        /// File upload as field=path (switches to multipart)
        #[arg(long = "file")]
        files: Vec<String>,

        /// Bot API server
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Show the bot's own user record
    Me {
        /// Bot token
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        token: String,

        /// Bot API server
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

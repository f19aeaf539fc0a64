//! CLI runner - executes commands

use crate::bot::{Bot, BotConfig, Payload, RequestArgs, RequestType};
use crate::cli::commands::{Cli, Commands};
use crate::error::{Error, Result};
use crate::form::{FileMeta, FormData};
use crate::schema::{Generator, GeneratorConfig, OutputFormat};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Generate {
                url,
                output,
                format,
                namespace,
            } => self.generate(url, output, *format, namespace).await,
            Commands::Call {
                method,
                token,
                params,
                params_json,
                encoding,
                files,
                base_url,
            } => {
                let bot = Self::bot(token, base_url)?;
                let params = parse_params(params_json.as_deref(), params)?;
                let encoding = encoding.as_deref().map(str::parse::<RequestType>).transpose()?;
                let args = build_args(params, encoding, files).await?;

                let result: Value = bot.request(method, args).await?;
                Self::print(&result)
            }
            Commands::Me { token, base_url } => {
                let bot = Self::bot(token, base_url)?;
                let me = bot.me().await?;
                Self::print(&me)
            }
        }
    }

    /// Scrape the documentation and write the declarations
    async fn generate(
        &self,
        url: &str,
        output: &Path,
        format: OutputFormat,
        namespace: &str,
    ) -> Result<()> {
        let config = GeneratorConfig::builder()
            .docs_url(url)
            .output(output)
            .format(format)
            .namespace(namespace)
            .build();

        let report = Generator::new(config)?.run().await?;
        info!(
            "Generated {} types, {} methods, {} unions ({} unknown names)",
            report.types,
            report.methods,
            report.unions,
            report.unknown_types.len()
        );
        Self::print(&report)
    }

    fn bot(token: &str, base_url: &str) -> Result<Bot> {
        let config = BotConfig::builder().base_url(base_url).build();
        Bot::with_config(token, config)
    }

    fn print<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Merge `--params-json` with `--param key=value` pairs; pairs win
fn parse_params(params_json: Option<&str>, pairs: &[String]) -> Result<Map<String, Value>> {
    let mut params = match params_json {
        Some(json) => match serde_json::from_str(json)? {
            Value::Object(map) => map,
            _ => return Err(Error::config("--params-json must be a JSON object")),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, raw) = split_pair(pair)?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }

    Ok(params)
}

/// Build call arguments; any `--file` switches the payload to multipart
async fn build_args(
    params: Map<String, Value>,
    encoding: Option<RequestType>,
    files: &[String],
) -> Result<RequestArgs> {
    if files.is_empty() && encoding != Some(RequestType::FormData) {
        let mut args = RequestArgs::new();
        if !params.is_empty() {
            args = args.payload(Payload::Params(Value::Object(params)));
        }
        if let Some(encoding) = encoding {
            args = args.request_type(encoding);
        }
        return Ok(args);
    }

    let mut form = FormData::new();
    for (key, value) in params {
        match value {
            Value::String(text) => form.append(key, text),
            Value::Null => form.append(key, ""),
            other => form.append(key, other),
        };
    }
    for file in files {
        let (field, path) = split_pair(file)?;
        let path = PathBuf::from(path);
        let meta = path
            .file_name()
            .map(|name| FileMeta::new().filename(name.to_string_lossy()));
        form.append_file_read(field, &path, meta).await?;
    }

    Ok(RequestArgs::new().payload(Payload::Form(form)))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(Error::config(format!("Expected key=value, got '{pair}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_params_merges_pairs() {
        let pairs = vec![
            "chat_id=42".to_string(),
            "text=hello world".to_string(),
            "limit=10".to_string(),
        ];
        let params = parse_params(Some(r#"{"limit": 5, "offset": 1}"#), &pairs).unwrap();

        assert_eq!(
            Value::Object(params),
            json!({"chat_id": 42, "limit": 10, "offset": 1, "text": "hello world"})
        );
    }

    #[test]
    fn test_parse_params_rejects_non_object() {
        assert!(matches!(
            parse_params(Some("[1, 2]"), &[]),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            parse_params(Some("{"), &[]),
            Err(Error::JsonParse(_))
        ));
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(split_pair("a=").unwrap(), ("a", ""));
        assert!(split_pair("novalue").is_err());
        assert!(split_pair("=x").is_err());
    }

    #[tokio::test]
    async fn test_build_args_json_by_default() {
        let mut params = Map::new();
        params.insert("a".to_string(), json!(1));

        let (payload, request_type) = build_args(params, None, &[])
            .await
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(request_type, RequestType::Json);
        assert!(matches!(payload, Some(Payload::Params(_))));
    }

    #[tokio::test]
    async fn test_build_args_without_params_has_no_payload() {
        let (payload, request_type) = build_args(Map::new(), Some(RequestType::QueryString), &[])
            .await
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(request_type, RequestType::QueryString);
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn test_build_args_files_switch_to_multipart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let mut params = Map::new();
        params.insert("chat_id".to_string(), json!(7));
        let files = vec![format!("photo={}", path.display())];

        let (payload, request_type) = build_args(params, None, &files)
            .await
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(request_type, RequestType::FormData);
        let Some(Payload::Form(form)) = payload else {
            panic!("expected a form payload");
        };
        assert_eq!(form.len(), 2);

        let body = form.data().body;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"chat_id\"\r\n\r\n7"));
        assert!(text.contains("name=\"photo\"; filename=\"photo.jpg\""));
    }
}

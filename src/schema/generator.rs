//! Documentation fetch and schema file generation

use super::emitter::TypeScriptEmitter;
use super::extractor::extract_schema;
use super::types::ApiSchema;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

/// Public Bot API documentation page
pub const DEFAULT_DOCS_URL: &str = "https://core.telegram.org/bots/api";

/// Format of the generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// TypeScript declaration module
    #[default]
    Typescript,
    /// The extracted schema as pretty JSON
    Json,
}

/// Configuration for the schema generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Documentation page to scrape
    pub docs_url: String,
    /// File to write
    pub output: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Namespace wrapping the TypeScript declarations
    pub namespace: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            output: PathBuf::from("Telegram.d.ts"),
            format: OutputFormat::Typescript,
            namespace: "Telegram".to_string(),
            user_agent: format!("telegram-bot-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }
}

/// Builder for generator config
#[derive(Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Set the documentation URL
    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.config.docs_url = url.into();
        self
    }

    /// Set the output path
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the TypeScript namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

/// Summary of one generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub bytes: usize,
    pub types: usize,
    pub methods: usize,
    pub unions: usize,
    pub unknown_types: Vec<String>,
}

/// Fetches the documentation page and writes the generated schema
#[derive(Debug)]
pub struct Generator {
    client: Client,
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Url::parse(&config.docs_url)?;
        if config.namespace.is_empty() {
            return Err(Error::config("Namespace must not be empty"));
        }

        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    /// The generator's configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Download the documentation page.
    ///
    /// A non-success status fails before the body is read.
    pub async fn fetch(&self) -> Result<String> {
        info!("Fetching {}", self.config.docs_url);

        let response = self.client.get(&self.config.docs_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes of documentation", html.len());
        Ok(html)
    }

    /// Render a schema in the configured format
    pub fn render(&self, schema: &ApiSchema) -> Result<String> {
        match self.config.format {
            OutputFormat::Typescript => {
                Ok(TypeScriptEmitter::new(&self.config.docs_url, &self.config.namespace).emit(schema))
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        }
    }

    /// Fetch, extract, render and write the output file
    pub async fn run(&self) -> Result<GenerateReport> {
        let html = self.fetch().await?;
        let schema = extract_schema(&html)?;
        let rendered = self.render(&schema)?;

        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.config.output, rendered.as_bytes()).await?;

        info!(
            "Wrote {} ({} bytes)",
            self.config.output.display(),
            rendered.len()
        );

        Ok(GenerateReport {
            output: self.config.output.clone(),
            bytes: rendered.len(),
            types: schema.types().count(),
            methods: schema.methods().count(),
            unions: schema.one_of_types.len(),
            unknown_types: schema.unknown_types.clone(),
        })
    }
}

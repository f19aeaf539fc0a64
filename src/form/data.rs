//! Multipart form assembly

use super::boundary::generate_boundary;
use crate::error::Result;
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

/// Optional metadata attached to a file part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    /// Filename reported in the `Content-Disposition` header
    pub filename: Option<String>,
    /// Value of the part's `Content-Type` header
    pub content_type: Option<String>,
}

impl FileMeta {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filename
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the content type
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PartContent {
    Text(String),
    File { bytes: Vec<u8>, meta: FileMeta },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    name: String,
    content: PartContent,
}

impl Part {
    /// Headers, blank line and content of this part
    fn render(&self) -> Vec<u8> {
        let mut header = format!("Content-Disposition: form-data; name=\"{}\"", self.name);
        let content: &[u8] = match &self.content {
            PartContent::Text(value) => value.as_bytes(),
            PartContent::File { bytes, meta } => {
                if let Some(filename) = &meta.filename {
                    header.push_str(&format!("; filename=\"{filename}\""));
                }
                if let Some(content_type) = &meta.content_type {
                    header.push_str(&format!("\r\nContent-Type: {content_type}"));
                }
                bytes
            }
        };

        let mut out = Vec::with_capacity(header.len() + 4 + content.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(b"\r\n\r\n");
        out.extend_from_slice(content);
        out
    }
}

/// A serialized multipart body and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBody {
    /// `multipart/form-data; boundary=<boundary>`
    pub content_type: String,
    /// The boundary used to delimit the parts
    pub boundary: String,
    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Builder for `multipart/form-data` request bodies.
///
/// Parts keep their insertion order. Calling [`FormData::data`] serializes
/// the parts with a freshly generated boundary, so two calls on the same
/// builder produce different bytes for the same content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<Part>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar field in its string form
    pub fn append(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.parts.push(Part {
            name: key.into(),
            content: PartContent::Text(value.to_string()),
        });
        self
    }

    /// Append a file field from raw bytes
    pub fn append_file(
        &mut self,
        key: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        meta: Option<FileMeta>,
    ) -> &mut Self {
        self.parts.push(Part {
            name: key.into(),
            content: PartContent::File {
                bytes: bytes.into(),
                meta: meta.unwrap_or_default(),
            },
        });
        self
    }

    /// Read a file from disk and append it as a file field
    pub async fn append_file_read(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
        meta: Option<FileMeta>,
    ) -> Result<&mut Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(self.append_file(key, bytes, meta))
    }

    /// Number of parts appended so far
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no parts were appended
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serialize the form with a new boundary.
    ///
    /// The body is an empty leading segment followed by every part, each
    /// introduced by `\r\n--<boundary>\r\n`, and closed by
    /// `\r\n--<boundary>--\r\n`.
    pub fn data(&self) -> FormBody {
        let rendered: Vec<Vec<u8>> = self.parts.iter().map(Part::render).collect();

        let mut boundary = generate_boundary();
        while rendered.iter().any(|part| contains(part, boundary.as_bytes())) {
            boundary = generate_boundary();
        }

        let delimiter = format!("\r\n--{boundary}\r\n");
        let closing = format!("\r\n--{boundary}--\r\n");
        let size = rendered.iter().map(Vec::len).sum::<usize>()
            + delimiter.len() * rendered.len()
            + closing.len();

        let mut body = Vec::with_capacity(size);
        for part in &rendered {
            body.extend_from_slice(delimiter.as_bytes());
            body.extend_from_slice(part);
        }
        body.extend_from_slice(closing.as_bytes());

        FormBody {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            boundary,
            body,
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

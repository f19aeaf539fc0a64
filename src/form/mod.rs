//! Multipart body builder
//!
//! Assembles `multipart/form-data` payloads for Bot API calls that upload
//! files.
//!
//! # Features
//!
//! - **Scalar Fields**: Any `Display` value is appended as its string form
//! - **File Fields**: Raw bytes with optional filename and content type
//! - **Fresh Boundaries**: Every serialization draws a new random boundary

mod boundary;
mod data;

pub use boundary::generate_boundary;
pub use data::{FileMeta, FormBody, FormData};

#[cfg(test)]
mod tests;

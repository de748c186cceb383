//! HTTP transport for form submissions.
//!
//! A controller describes what to send as an [`UploadRequest`]; the client
//! module turns it into a multipart request, runs it on its own task and
//! reports the decoded [`crate::form::result::UploadResult`] back to the event
//! loop.

pub mod client;

use crate::form::element::FormId;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name, the file input's id.
    pub field: String,
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub form: FormId,
    pub method: String,
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

//! Pre-submit checks on the selected upload file.

use crate::error::ValidationError;
use crate::form::element::SelectedFile;

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Reject a file strictly larger than `max_mb` megabytes. No file passes.
pub fn check_file_size(file: Option<&SelectedFile>, max_mb: u64) -> Result<(), ValidationError> {
    let Some(file) = file else { return Ok(()) };
    let max_bytes = max_mb.saturating_mul(BYTES_PER_MB);
    if file.size > max_bytes {
        return Err(ValidationError::FileTooLarge {
            size: file.size,
            max_mb,
        });
    }
    Ok(())
}

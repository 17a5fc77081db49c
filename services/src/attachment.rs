//! File attachments: selection checks, inlining as a data URL, and decoding
//! back to bytes for download.
//!
//! Two limits apply. Anything up to [`MAX_UPLOAD_BYTES`] may be selected, but
//! only files up to [`MAX_EMBED_BYTES`] are inlined into the ticket. Larger
//! files are accepted and the ticket is stored without them.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use db::models::ticket::Attachment;

/// Largest file that may be selected: 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// Largest file inlined into the stored ticket: 2 MiB.
pub const MAX_EMBED_BYTES: u64 = 2 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["pdf", "jpg", "jpeg", "png", "doc", "docx", "txt"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("File size exceeds 5MB limit ({})", format_file_size(*.0))]
    TooLarge(u64),

    #[error("File type not allowed: .{0} (supported: PDF, JPG, PNG, DOC, TXT)")]
    DisallowedType(String),

    #[error("Error reading file: {0}")]
    ReadFailed(String),

    #[error("Attachment data is corrupt")]
    Corrupt,
}

/// A file as received from the submitter, fully read into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    /// MIME type reported by the client; may be empty.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbedOutcome {
    Embedded(Attachment),
    /// Over [`MAX_EMBED_BYTES`]; the ticket is saved without the file.
    TooLargeToEmbed { size: u64 },
}

/// Lowercased text after the last `.`; the whole name if there is no dot.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Checks size against [`MAX_UPLOAD_BYTES`] and extension against
/// [`ALLOWED_EXTENSIONS`].
pub fn validate_selection(file_name: &str, size: u64) -> Result<(), AttachmentError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(AttachmentError::TooLarge(size));
    }
    let ext = extension_of(file_name);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AttachmentError::DisallowedType(ext));
    }
    Ok(())
}

/// Inlines `upload` as a `data:` URL, or reports that it is too large to keep.
///
/// A blank client MIME type is replaced by a guess from the file name.
pub fn embed(upload: &Upload) -> EmbedOutcome {
    let size = upload.size();
    if size > MAX_EMBED_BYTES {
        return EmbedOutcome::TooLargeToEmbed { size };
    }

    let mime_type = if upload.mime_type.trim().is_empty() {
        mime_guess::from_path(&upload.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned()
    } else {
        upload.mime_type.trim().to_owned()
    };

    let payload = format!("data:{};base64,{}", mime_type, STANDARD.encode(&upload.bytes));
    EmbedOutcome::Embedded(Attachment {
        name: upload.file_name.clone(),
        mime_type,
        size_bytes: size,
        payload,
    })
}

/// Recovers the file bytes from an embedded attachment.
pub fn decode(attachment: &Attachment) -> Result<Vec<u8>, AttachmentError> {
    let encoded = attachment
        .payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .ok_or(AttachmentError::Corrupt)?;
    STANDARD.decode(encoded).map_err(|_| AttachmentError::Corrupt)
}

/// Human-readable size in powers of 1024: `0 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

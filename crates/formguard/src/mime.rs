//! Static extension to MIME type table consulted by the file validator.

/// Extensions accepted by [`FileValidator::types`](crate::FileValidator::types).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "pdf", "txt", "doc", "docx"];

/// Get the MIME type for a file extension.
///
/// Matching ignores case and a leading dot. Returns `None` for extensions
/// outside the supported table.
pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(mime)
}

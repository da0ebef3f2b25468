//! Content-type detection from payload bytes

/// Fallback content type for payloads with no recognizable signature.
pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// Detects the content type of a payload from its leading magic bytes.
///
/// Recognizes the image formats the pipeline stores; anything else falls
/// back to `application/octet-stream`. Total for every input, including the
/// empty payload.
#[must_use]
pub fn detect_content_type(data: &[u8]) -> &'static str {
    if data.starts_with(b"\xFF\xD8\xFF") {
        "image/jpeg"
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else if data.starts_with(b"II*\x00") || data.starts_with(b"MM\x00*") {
        "image/tiff"
    } else if looks_like_svg(data) {
        "image/svg+xml"
    } else {
        OCTET_STREAM
    }
}

/// SVG has no binary signature; look for an `<svg` root in the first KiB.
fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let trimmed = text.trim_start();
    trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && trimmed.contains("<svg"))
}

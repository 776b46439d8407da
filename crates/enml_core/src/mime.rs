//! MIME type detection for embedded resources.
//!
//! Content sniffing runs first; the file extension of the URL is only
//! consulted when the magic bytes are not recognised.

/// Detect the MIME type of a resource from its bytes, then its URL.
pub fn detect_mime_type(url: &str, data: &[u8]) -> Option<&'static str> {
    sniff_mime_type(data).or_else(|| mime_type_from_extension(url))
}

/// Magic byte detection.
pub fn sniff_mime_type(data: &[u8]) -> Option<&'static str> {
    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    // RIFF container: WEBP or WAVE
    if data.len() >= 12 && data.starts_with(b"RIFF") {
        match &data[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/wav"),
            _ => {}
        }
    }
    if data.starts_with(b"BM") && data.len() >= 14 {
        return Some("image/bmp");
    }
    if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        return Some("image/tiff");
    }
    if data.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some("image/x-icon");
    }
    if data.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    if data.starts_with(b"ID3") || data.starts_with(&[0xFF, 0xFB]) {
        return Some("audio/mpeg");
    }
    None
}

/// Extension lookup on the last path segment of `url`, ignoring query and fragment.
pub fn mime_type_from_extension(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffing_wins_over_extension() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(detect_mime_type("http://x/pic.jpg", png), Some("image/png"));
    }

    #[test]
    fn extension_is_used_when_bytes_are_unknown() {
        assert_eq!(detect_mime_type("http://x/logo.SVG?v=2", b"<svg/>"), Some("image/svg+xml"));
        assert_eq!(detect_mime_type("file:///tmp/a.jpeg#frag", b"??"), Some("image/jpeg"));
    }

    #[test]
    fn unknown_bytes_and_extension_yield_none() {
        assert_eq!(detect_mime_type("http://x/download", b"plain text"), None);
        assert_eq!(detect_mime_type("http://x.example/", &[]), None);
    }

    #[test]
    fn magic_bytes_are_recognised() {
        assert_eq!(sniff_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff_mime_type(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime_type(b"%PDF-1.7"), Some("application/pdf"));
    }
}

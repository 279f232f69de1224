// src/images/sniff.rs
//! Image type detection from leading bytes.

/// File extension for the image format `bytes` starts with, if recognised.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n" as &[u8], "png"),
        (b"\xff\xd8\xff" as &[u8], "jpg"),
        (b"GIF87a" as &[u8], "gif"),
        (b"GIF89a" as &[u8], "gif"),
        (b"BM" as &[u8], "bmp"),
        (b"\x00\x00\x01\x00" as &[u8], "ico"),
        (b"II*\x00" as &[u8], "tif"),
        (b"MM\x00*" as &[u8], "tif"),
    ];

    if let Some((_, ext)) = SIGNATURES.iter().find(|(sig, _)| bytes.starts_with(sig)) {
        return Some(*ext);
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("webp");
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" && matches!(&bytes[8..12], b"avif" | b"avis") {
        return Some("avif");
    }
    if looks_like_svg(bytes) {
        return Some("svg");
    }
    None
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_formats_are_recognised() {
        assert_eq!(sniff_extension(b"\x89PNG\r\n\x1a\nrest"), Some("png"));
        assert_eq!(sniff_extension(b"\xff\xd8\xff\xe0"), Some("jpg"));
        assert_eq!(sniff_extension(b"GIF89a..."), Some("gif"));
        assert_eq!(sniff_extension(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("webp"));
        assert_eq!(
            sniff_extension(b"<?xml version=\"1.0\"?><svg xmlns=\"\"></svg>"),
            Some("svg")
        );
    }

    #[test]
    fn unknown_bytes_have_no_type() {
        assert_eq!(sniff_extension(b"hello world"), None);
        assert_eq!(sniff_extension(b""), None);
    }
}

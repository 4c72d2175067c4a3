//! MIME classification tables for camera payloads.
//!
//! Detection is a two-stage check: leading-byte signatures first (the
//! payload is authoritative), file-extension hints from the logical name
//! second. Both tables are plain static data so new formats are added by
//! extending a table, not by touching the detection logic.

/// A leading-byte signature. `None` positions are wildcards, matching any
/// byte (e.g. the JFIF length field between the SOI marker and the "JFIF"
/// tag).
pub(crate) struct Signature {
    pub mime: &'static str,
    pub magic: &'static [Option<u8>],
}

macro_rules! sig {
    ($mime:literal, [$($b:tt),+ $(,)?]) => {
        Signature { mime: $mime, magic: &[$(sig!(@byte $b)),+] }
    };
    (@byte _) => { None };
    (@byte $b:literal) => { Some($b) };
}

/// Signature table, checked in order. More specific patterns come before
/// their generic prefixes (JFIF before bare SOI).
pub(crate) const SIGNATURES: &[Signature] = &[
    // JPEG with a JFIF APP0 segment; bytes 4..6 are the segment length.
    sig!("image/jpeg", [0xff, 0xd8, 0xff, 0xe0, _, _, 0x4a, 0x46, 0x49, 0x46]),
    // JPEG with an Exif APP1 segment, the usual camera output.
    sig!("image/jpeg", [0xff, 0xd8, 0xff, 0xe1, _, _, 0x45, 0x78, 0x69, 0x66]),
    // Bare SOI marker.
    sig!("image/jpeg", [0xff, 0xd8, 0xff]),
    sig!("image/png", [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]),
    sig!("image/gif", [0x47, 0x49, 0x46, 0x38]),
    // TIFF, both byte orders; covers most camera raw containers too.
    sig!("image/tiff", [0x49, 0x49, 0x2a, 0x00]),
    sig!("image/tiff", [0x4d, 0x4d, 0x00, 0x2a]),
    sig!("image/bmp", [0x42, 0x4d]),
    sig!("audio/wav", [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x41, 0x56, 0x45]),
    sig!("video/x-msvideo", [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x41, 0x56, 0x49, 0x20]),
];

/// Extension hints, consulted only when no signature matches. Extensions
/// compare case-insensitively.
pub(crate) const EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("bmp", "image/bmp"),
    ("wav", "audio/wav"),
    ("avi", "video/x-msvideo"),
    ("mp4", "video/mp4"),
];

/// Classifies `payload` by leading bytes, falling back to the extension of
/// `name`. Returns `None` when nothing matches.
pub(crate) fn classify(payload: &[u8], name: &str) -> Option<&'static str> {
    for sig in SIGNATURES {
        if payload.len() >= sig.magic.len()
            && sig
                .magic
                .iter()
                .zip(payload)
                .all(|(want, got)| want.map_or(true, |b| b == *got))
        {
            return Some(sig.mime);
        }
    }

    let ext = name.rsplit_once('.').map(|(_, ext)| ext)?;
    EXTENSIONS
        .iter()
        .find(|(e, _)| ext.eq_ignore_ascii_case(e))
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jfif_signature_with_wildcards() {
        let data = [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(classify(&data, ""), Some("image/jpeg"));
        // Wildcard positions accept any length field.
        let data = [0xff, 0xd8, 0xff, 0xe0, 0xab, 0xcd, b'J', b'F', b'I', b'F'];
        assert_eq!(classify(&data, ""), Some("image/jpeg"));
    }

    #[test]
    fn test_signature_wins_over_extension() {
        let png = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
        assert_eq!(classify(&png, "mislabeled.jpg"), Some("image/png"));
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(classify(b"not a signature", "capt0001.JPG"), Some("image/jpeg"));
        assert_eq!(classify(b"", "clip.avi"), Some("video/x-msvideo"));
    }

    #[test]
    fn test_unknown_payload() {
        assert_eq!(classify(b"\x00\x01\x02\x03", "capture.xyz"), None);
        assert_eq!(classify(b"", ""), None);
    }

    #[test]
    fn test_short_payload_does_not_match() {
        // Shorter than every magic, must not panic or match.
        assert_eq!(classify(&[0xff], ""), None);
    }
}

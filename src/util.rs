//! Text decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 (a BOM is handled by encoding_rs)
/// 2. the hint encoding, usually from `<meta charset>`
/// 3. Windows-1252, a superset of ISO-8859-1
///
/// Returns `Cow::Borrowed` when the input is already valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a declared charset near the start of an HTML document.
///
/// Looks at the first 1024 bytes (the window browsers pre-scan) for
/// `charset=` as used by both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`,
/// or `encoding=` in an XML declaration.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let value_start = find_ignore_case(prefix, b"charset=")
        .map(|pos| pos + b"charset=".len())
        .or_else(|| find_ignore_case(prefix, b"encoding=").map(|pos| pos + b"encoding=".len()))?;

    let mut rest = &prefix[value_start..];
    if let Some(&quote) = rest.first()
        && (quote == b'"' || quote == b'\'')
    {
        rest = &rest[1..];
    }

    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    std::str::from_utf8(&rest[..end]).ok()
}

fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

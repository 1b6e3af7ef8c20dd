//! Text repair for strings pulled out of place pages.
//!
//! Upstream payloads mix encodings: some strings arrive as UTF-8 bytes that
//! were decoded as Latin-1, image URLs carry JavaScript-escaped slashes, and
//! some responses are double-escaped. Every function here is total and
//! returns its input unchanged when a repair does not apply.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unencoded in an image filename (RFC 3986 unreserved).
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Decodes `bytes` as UTF-8, dropping invalid sequences instead of replacing them.
#[must_use]
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Reverses UTF-8 text that was mis-decoded as Latin-1.
///
/// Applies only when every char is at most U+00FF; those chars are taken as
/// raw bytes and decoded as strict UTF-8. Anything else, including strings
/// that are already correct Korean text, is returned unchanged.
#[must_use]
pub fn fix_encoding(s: &str) -> String {
    let latin1: Option<Vec<u8>> = s.chars().map(|c| u8::try_from(c).ok()).collect();
    latin1
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| s.to_string())
}

/// Replaces JavaScript-escaped slashes (`\u002F`, `\/`) with `/`.
#[must_use]
pub fn clean_image_url(url: &str) -> String {
    url.replace("\\u002F", "/").replace("\\/", "/")
}

/// Percent-encodes the filename segment of an image URL.
///
/// Only the text after the last `/` is touched, and only up to an optional
/// `?`; the query string is kept verbatim. The filename is decoded first so
/// an already-encoded name comes out the same. When its escapes do not
/// decode to UTF-8 (legacy EUC-KR names), existing `%XX` triples are kept
/// and only the remaining characters are encoded.
#[must_use]
pub fn normalize_image_url(url: &str) -> String {
    let Some((base, last)) = url.rsplit_once('/') else {
        return url.to_string();
    };
    let (filename, query) = match last.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (last, None),
    };

    let encoded = match percent_decode_str(filename).decode_utf8() {
        Ok(decoded) => utf8_percent_encode(&decoded, FILENAME_ENCODE_SET).to_string(),
        Err(_) => encode_keeping_escapes(filename),
    };

    match query {
        Some(query) => format!("{base}/{encoded}?{query}"),
        None => format!("{base}/{encoded}"),
    }
}

fn encode_keeping_escapes(filename: &str) -> String {
    let mut out = String::with_capacity(filename.len());
    let mut rest = filename;
    while let Some(c) = rest.chars().next() {
        let bytes = rest.as_bytes();
        let len = if c == '%'
            && bytes.len() >= 3
            && bytes[1].is_ascii_hexdigit()
            && bytes[2].is_ascii_hexdigit()
        {
            out.push_str(&rest[..3]);
            3
        } else {
            let len = c.len_utf8();
            out.extend(utf8_percent_encode(&rest[..len], FILENAME_ENCODE_SET));
            len
        };
        rest = &rest[len..];
    }
    out
}

/// Percent-decodes `s`, replacing invalid UTF-8 in the result.
#[must_use]
pub fn percent_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Resolves one level of JSON-style backslash escapes.
///
/// Handles the short escapes and `\uXXXX`, joining surrogate pairs. Unknown
/// escapes and lone surrogates are kept verbatim.
#[must_use]
pub fn unescape_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escaped = &rest[pos..];
        let mut chars = escaped.chars();
        chars.next();

        let consumed = match chars.next() {
            Some('n') => push_char(&mut out, '\n', 2),
            Some('t') => push_char(&mut out, '\t', 2),
            Some('r') => push_char(&mut out, '\r', 2),
            Some('b') => push_char(&mut out, '\u{0008}', 2),
            Some('f') => push_char(&mut out, '\u{000C}', 2),
            Some('"') => push_char(&mut out, '"', 2),
            Some('\\') => push_char(&mut out, '\\', 2),
            Some('/') => push_char(&mut out, '/', 2),
            Some('u') => match unicode_escape(escaped) {
                Some((c, len)) => push_char(&mut out, c, len),
                None => push_char(&mut out, '\\', 1),
            },
            Some(other) => {
                out.push('\\');
                out.push(other);
                1 + other.len_utf8()
            }
            None => push_char(&mut out, '\\', 1),
        };
        rest = &escaped[consumed..];
    }

    out.push_str(rest);
    out
}

fn push_char(out: &mut String, c: char, consumed: usize) -> usize {
    out.push(c);
    consumed
}

/// Parses `\uXXXX` (or a `\uD8xx\uDCxx` surrogate pair) at the start of `s`.
/// Returns the char and the number of bytes consumed.
fn unicode_escape(s: &str) -> Option<(char, usize)> {
    let high = hex4(s.get(2..6)?)?;
    if (0xD800..0xDC00).contains(&high) {
        let low = s
            .get(6..8)
            .filter(|p| *p == "\\u")
            .and_then(|_| s.get(8..12))
            .and_then(hex4)
            .filter(|low| (0xDC00..0xE000).contains(low))?;
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined).map(|c| (c, 12));
    }
    char::from_u32(high).map(|c| (c, 6))
}

fn hex4(s: &str) -> Option<u32> {
    if s.len() != 4 {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

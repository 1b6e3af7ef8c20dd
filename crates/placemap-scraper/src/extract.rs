//! Balanced-bracket span recovery for JSON embedded in HTML or script text.
//!
//! Server-rendered pages inline their state as JavaScript object literals,
//! so a regex cannot reliably find where an array or object ends. These
//! scanners walk the text once, tracking nesting depth and quoted-string
//! state, and return the minimal balanced span as a borrowed slice.

/// Returns the first balanced JSON array at or after byte offset `start_pos`.
///
/// Brackets inside double-quoted strings (including after escaped quotes)
/// do not count toward depth. Returns `None` when no `[` follows
/// `start_pos`, when the array is unterminated, or when `start_pos` is out
/// of range or not on a char boundary.
#[must_use]
pub fn extract_array(text: &str, start_pos: usize) -> Option<&str> {
    extract_balanced(text, start_pos, b'[', b']')
}

/// Object counterpart of [`extract_array`], scanning `{`/`}`.
#[must_use]
pub fn extract_object(text: &str, start_pos: usize) -> Option<&str> {
    extract_balanced(text, start_pos, b'{', b'}')
}

fn extract_balanced(text: &str, start_pos: usize, open: u8, close: u8) -> Option<&str> {
    let tail = text.get(start_pos..)?;
    let begin = start_pos + tail.bytes().position(|b| b == open)?;

    // Delimiters are ASCII, so byte scanning never splits a multi-byte char.
    let mut depth = 0usize;
    let mut in_str = false;
    let mut esc = false;
    for (offset, b) in text.as_bytes()[begin..].iter().copied().enumerate() {
        if in_str {
            if esc {
                esc = false;
            } else if b == b'\\' {
                esc = true;
            } else if b == b'"' {
                in_str = false;
            }
            continue;
        }

        if b == b'"' {
            in_str = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[begin..=begin + offset]);
            }
        }
    }
    None
}

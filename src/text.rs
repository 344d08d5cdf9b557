//! Text normalization helpers used by the line classifier
//!
//! Trimming, comment stripping, line splitting and the UTF-8 ⇄ UTF-16/UTF-32
//! transcoders behind the string conversions.

use std::borrow::Cow;

/// Byte order mark as decoded into a `char`
pub const BOM: char = '\u{FEFF}';

/// Removes every leading occurrence of `c`
pub fn trim_leading(s: &str, c: char) -> &str {
    s.trim_start_matches(c)
}

/// Removes every trailing occurrence of `c`
pub fn trim_trailing(s: &str, c: char) -> &str {
    s.trim_end_matches(c)
}

/// Removes every leading and trailing occurrence of `c`
pub fn trim(s: &str, c: char) -> &str {
    trim_trailing(trim_leading(s, c), c)
}

/// Splits text into lines, treating `\n` and `\r` as independent delimiters
///
/// A `\r\n` pair therefore produces an empty line between the two real lines.
/// A trailing empty segment is not emitted.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split(['\n', '\r']).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Removes a leading byte order mark if present
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

fn is_comment_delimiter(c: char) -> bool {
    c == ';' || c == '#'
}

/// Strips a comment from a line
///
/// A `;` or `#` as the first non-space character blanks the whole line.
/// Elsewhere a delimiter only starts a comment when it directly follows a
/// space; the comment and that space are removed.
pub fn strip_comment(line: &str) -> &str {
    if trim_leading(line, ' ')
        .chars()
        .next()
        .is_some_and(is_comment_delimiter)
    {
        return "";
    }

    let bytes = line.as_bytes();
    for (i, c) in line.char_indices() {
        if is_comment_delimiter(c) && i > 0 && bytes[i - 1] == b' ' {
            return &line[..i - 1];
        }
    }

    line
}

/// Finds the first `target` not escaped by a backslash
///
/// `\\` is an escaped backslash, so the character after it is not escaped.
pub fn find_unescaped(s: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            c if c == target => return Some(i),
            _ => {}
        }
    }
    None
}

/// Replaces `\<target>` with `<target>` and `\\` with `\`
///
/// Any other backslash is kept as written.
pub fn unescape(s: &str, target: char) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == target || next == '\\' => result.push(next),
            Some(next) => {
                result.push('\\');
                result.push(next);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Prefixes every `target` and every backslash with a backslash
pub fn escape(s: &str, target: char) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if c == target || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

/// Strips one layer of surrounding double quotes
pub fn unquote(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Wraps a value in double quotes when reading it back would otherwise
/// change it: already quoted, or padded with spaces
pub fn quote(value: &str) -> Cow<'_, str> {
    if is_quoted(value) || value.starts_with(' ') || value.ends_with(' ') {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Number of bytes in a UTF-8 sequence, from its lead byte
fn sequence_length(lead: u8) -> usize {
    if lead & 0x80 == 0x00 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else {
        4
    }
}

/// Decodes UTF-8 into code points by unpacking the lead and continuation bits
pub fn decode_utf32(s: &str) -> Vec<char> {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(s.len());
    let mut i = 0;

    while i < bytes.len() {
        let lead = bytes[i];
        let len = sequence_length(lead);
        let cont = |n: usize| u32::from(bytes[i + n] & 0x3F);

        let code_point = match len {
            1 => u32::from(lead),
            2 => (u32::from(lead & 0x1F) << 6) | cont(1),
            3 => (u32::from(lead & 0x0F) << 12) | (cont(1) << 6) | cont(2),
            _ => (u32::from(lead & 0x07) << 18) | (cont(1) << 12) | (cont(2) << 6) | cont(3),
        };

        // `&str` is valid UTF-8, so every unpacked sequence is a scalar value
        decoded.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER));
        i += len;
    }

    decoded
}

/// Encodes code points as UTF-8 by packing them into lead and continuation bytes
pub fn encode_utf32(chars: &[char]) -> String {
    let capacity = chars.iter().map(|c| c.len_utf8()).sum();
    let mut utf8 = Vec::with_capacity(capacity);

    for &c in chars {
        let c = u32::from(c);
        if c < 0x80 {
            utf8.push(c as u8);
        } else if c < 0x800 {
            utf8.push(0xC0 | ((c >> 6) & 0x1F) as u8);
            utf8.push(0x80 | (c & 0x3F) as u8);
        } else if c < 0x10000 {
            utf8.push(0xE0 | ((c >> 12) & 0x0F) as u8);
            utf8.push(0x80 | ((c >> 6) & 0x3F) as u8);
            utf8.push(0x80 | (c & 0x3F) as u8);
        } else {
            utf8.push(0xF0 | ((c >> 18) & 0x07) as u8);
            utf8.push(0x80 | ((c >> 12) & 0x3F) as u8);
            utf8.push(0x80 | ((c >> 6) & 0x3F) as u8);
            utf8.push(0x80 | (c & 0x3F) as u8);
        }
    }

    // Every packed sequence came from a `char`, so the bytes are valid UTF-8
    String::from_utf8(utf8).unwrap_or_default()
}

/// Decodes UTF-8 into UTF-16 code units, splitting supplementary characters
/// into surrogate pairs
pub fn decode_utf16(s: &str) -> Vec<u16> {
    let mut units = Vec::with_capacity(s.len());
    for c in decode_utf32(s) {
        let mut buf = [0u16; 2];
        units.extend_from_slice(c.encode_utf16(&mut buf));
    }
    units
}

/// Encodes UTF-16 code units as UTF-8; unpaired surrogates become U+FFFD
pub fn encode_utf16(units: &[u16]) -> String {
    let chars: Vec<char> = char::decode_utf16(units.iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    encode_utf32(&chars)
}

//! Decoding of Go string literals.
//!
//! Mirrors Go's `strconv.Unquote` for the two string forms:
//! interpreted (`"..."`) and raw (`` `...` ``). Rune literals are not
//! string literals and are rejected.

use tree_sitter::Node;

use super::source::GoSource;

/// Decode `node` if it is a string literal.
///
/// Returns `None` for any other expression (identifiers, calls,
/// concatenations) and for literals that fail to decode.
pub fn string_literal(source: &GoSource, node: Node) -> Option<String> {
    match node.kind() {
        "interpreted_string_literal" | "raw_string_literal" => unquote(source.node_text(node)),
        _ => None,
    }
}

/// Decode the source text of a Go string literal, quotes included.
pub fn unquote(text: &str) -> Option<String> {
    if let Some(body) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        return unquote_raw(body);
    }
    if let Some(body) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return unquote_interpreted(body);
    }
    None
}

/// Raw strings are verbatim, except that carriage returns are discarded.
fn unquote_raw(body: &str) -> Option<String> {
    if body.contains('`') {
        return None;
    }
    Some(body.chars().filter(|&c| c != '\r').collect())
}

fn unquote_interpreted(body: &str) -> Option<String> {
    // \x and octal escapes produce single bytes, so build bytes first
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {}
            '"' | '\n' => return None,
            _ => {
                push_char(&mut out, c);
                continue;
            }
        }

        match chars.next()? {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0C),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0B),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            'x' => {
                let value = read_digits(&mut chars, 2, 16)?;
                out.push(value as u8);
            }
            'u' => {
                let value = read_digits(&mut chars, 4, 16)?;
                push_char(&mut out, char::from_u32(value)?);
            }
            'U' => {
                let value = read_digits(&mut chars, 8, 16)?;
                push_char(&mut out, char::from_u32(value)?);
            }
            first @ '0'..='7' => {
                let rest = read_digits(&mut chars, 2, 8)?;
                let value = (first as u32 - '0' as u32) * 64 + rest;
                if value > 0xFF {
                    return None;
                }
                out.push(value as u8);
            }
            _ => return None,
        }
    }

    Some(match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Read exactly `count` digits in `radix`.
fn read_digits(chars: &mut std::str::Chars, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars.next()?.to_digit(radix)?;
        value = value * radix + digit;
    }
    Some(value)
}

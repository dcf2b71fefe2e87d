// src/core/scan.rs
//
// Depth-tracked scanning over the raw catalog text. Records are brace
// blocks of `key: value` fields; values are string literals, numbers,
// arrays or nested blocks. A closing brace is never trusted on sight:
// string literals, escapes and line comments are tracked so a brace
// inside a name or a banner comment cannot truncate a block.

use crate::error::PatchError;

/// One balanced brace block. `start` points at `{`; `end` is exclusive,
/// with `text[end - 1]` being the matching `}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

/// One `key: value` field directly inside a block.
/// Offsets are relative to the block slice handed to [`parse_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub key_off: usize,
    pub val_start: usize,
    pub val_end: usize,
}

/// Scan the whole text and collect every balanced brace block.
/// Unbalanced structure anywhere is fatal: patching must not proceed when
/// record boundaries are uncertain.
pub fn scan_blocks(text: &str) -> Result<Vec<Block>, PatchError> {
    let b = text.as_bytes();
    let mut blocks = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'"' => {
                i = skip_string(b, i).ok_or(PatchError::MalformedRecord(i))?;
                continue;
            }
            b'/' if b.get(i + 1) == Some(&b'/') => {
                while i < b.len() && b[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'{' => stack.push(i),
            b'}' => {
                let start = stack.pop().ok_or(PatchError::MalformedRecord(i))?;
                blocks.push(Block { start, end: i + 1 });
            }
            _ => {}
        }
        i += 1;
    }
    if let Some(&open) = stack.last() {
        return Err(PatchError::MalformedRecord(open));
    }
    Ok(blocks)
}

/// Advance past a double-quoted literal whose opening quote is at `open`.
/// Returns the index just past the closing quote. Literals in this grammar
/// are single-line; a raw newline means the quote was truncated.
fn skip_string(b: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < b.len() {
        match b[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

/// True if the block slice carries `key: "<literal>"` at its own depth —
/// not inside a nested block, a literal or a comment. Tolerant of
/// non-record grammar (the type declaration block separates fields with
/// `;` and types its fields as bare identifiers), so it can screen blocks
/// before the strict field parse runs.
pub fn has_direct_string_field(block: &str, key: &str) -> bool {
    let b = block.as_bytes();
    let mut depth = 0u32;
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'"' => match skip_string(b, i) {
                Some(j) => {
                    i = j;
                    continue;
                }
                None => return false,
            },
            b'/' if b.get(i + 1) == Some(&b'/') => {
                while i < b.len() && b[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ => {
                if depth == 1 && is_ident_start(b[i]) {
                    let end = ident_end(b, i);
                    let bounded = i == 0 || !is_ident_byte(b[i - 1]);
                    if bounded && &block[i..end] == key {
                        let mut j = end;
                        while j < b.len() && b[j].is_ascii_whitespace() {
                            j += 1;
                        }
                        if b.get(j) == Some(&b':') {
                            j += 1;
                            while j < b.len() && b[j].is_ascii_whitespace() {
                                j += 1;
                            }
                            if b.get(j) == Some(&b'"') {
                                return true;
                            }
                        }
                    }
                    i = end;
                    continue;
                }
            }
        }
        i += 1;
    }
    false
}

/// Strict parse of one record slice (braces included) into its field list.
/// Offsets in the result are relative to `rec`; `Err` carries the
/// offending relative offset.
pub fn parse_entries(rec: &str) -> Result<Vec<Entry>, usize> {
    let b = rec.as_bytes();
    if b.first() != Some(&b'{') || b.last() != Some(&b'}') {
        return Err(0);
    }
    let close = b.len() - 1;
    let mut entries = Vec::new();
    let mut i = skip_trivia(b, 1, close);
    while i < close {
        let key_off = i;
        if !is_ident_start(b[i]) {
            return Err(i);
        }
        let key_end = ident_end(b, i);
        let key = rec[key_off..key_end].to_string();
        i = skip_trivia(b, key_end, close);
        if i >= close || b[i] != b':' {
            return Err(i.min(close));
        }
        i = skip_trivia(b, i + 1, close);
        let (vs, ve) = value_span(rec, i, close)?;
        entries.push(Entry { key, key_off, val_start: vs, val_end: ve });
        i = skip_trivia(b, ve, close);
        if i < close {
            if b[i] != b',' {
                return Err(i);
            }
            i = skip_trivia(b, i + 1, close);
        }
    }
    Ok(entries)
}

/// Extent of one value starting at `i` (already past leading whitespace).
/// Handles string literals, nested blocks, arrays and bare tokens.
pub fn value_span(rec: &str, i: usize, close: usize) -> Result<(usize, usize), usize> {
    let b = rec.as_bytes();
    if i >= close {
        return Err(i);
    }
    match b[i] {
        b'"' => skip_string(b, i).map(|end| (i, end)).ok_or(i),
        b'{' | b'[' => {
            let (open_c, close_c) = if b[i] == b'{' { (b'{', b'}') } else { (b'[', b']') };
            let mut depth = 0u32;
            let mut j = i;
            while j < b.len() {
                match b[j] {
                    b'"' => {
                        j = skip_string(b, j).ok_or(j)?;
                        continue;
                    }
                    b'/' if b.get(j + 1) == Some(&b'/') => {
                        while j < b.len() && b[j] != b'\n' {
                            j += 1;
                        }
                        continue;
                    }
                    c if c == open_c => depth += 1,
                    c if c == close_c => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok((i, j + 1));
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            Err(i)
        }
        _ => {
            // bare token: number, boolean, identifier
            let mut j = i;
            while j < close && (is_ident_byte(b[j]) || matches!(b[j], b'.' | b'-' | b'+')) {
                j += 1;
            }
            if j == i { Err(i) } else { Ok((i, j)) }
        }
    }
}

/// Decoded content of a string-literal value span, or None when the value
/// is not a quoted literal.
pub fn literal_at(rec: &str, vs: usize, ve: usize) -> Option<String> {
    let v = &rec[vs..ve];
    if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
        Some(super::sanitize::unescape_literal(&v[1..v.len() - 1]))
    } else {
        None
    }
}

fn skip_trivia(b: &[u8], mut i: usize, close: usize) -> usize {
    while i < close {
        if b[i].is_ascii_whitespace() {
            i += 1;
        } else if b[i] == b'/' && b.get(i + 1) == Some(&b'/') {
            while i < close && b[i] != b'\n' {
                i += 1;
            }
        } else {
            break;
        }
    }
    i
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn ident_end(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && is_ident_byte(b[i]) {
        i += 1;
    }
    i
}

//! Struct tag parsing
//!
//! A tag is a space-separated list of `key:"value"` pairs, for example
//! `json:"name" validate:"required,min=3"`. Values are double-quoted and may
//! contain backslash escapes. Parsing stops silently at the first malformed
//! pair, so everything before it stays visible.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

/// Parsed struct tag attached to a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    raw: String,
    pairs: Vec<(String, String)>,
}

impl StructTag {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let pairs = parse_pairs(&raw);
        Self { raw, pairs }
    }

    /// Value for `key`, or the empty string if the key is absent
    pub fn get(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or("")
    }

    /// Value for `key`, distinguishing an absent key from an empty value
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl From<&str> for StructTag {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for StructTag {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = raw.as_bytes();

    loop {
        while let [b' ', tail @ ..] = rest {
            rest = tail;
        }
        if rest.is_empty() {
            break;
        }

        // Key: printable, no space, colon or quote
        let key_len = rest
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if key_len == 0 || key_len + 1 >= rest.len() || rest[key_len] != b':' || rest[key_len + 1] != b'"' {
            break;
        }
        let key = &rest[..key_len];
        rest = &rest[key_len + 1..];

        // Quoted value, rest[0] is the opening quote
        let mut i = 1;
        while i < rest.len() && rest[i] != b'"' {
            if rest[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= rest.len() {
            break;
        }
        let quoted = &rest[1..i];
        rest = &rest[i + 1..];

        let Some(value) = unquote(quoted) else {
            break;
        };
        pairs.push((String::from_utf8_lossy(key).into_owned(), value));
    }

    pairs
}

fn unquote(quoted: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(quoted).ok()?;
    if !text.contains('\\') {
        return Some(text.to_owned());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            c @ ('\\' | '"' | '\'') => out.push(c),
            _ => return None,
        }
    }
    Some(out)
}

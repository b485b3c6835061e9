// src/core/html.rs
//! Case-insensitive tag scanning over raw HTML.
//!
//! Lowercasing is ASCII-only, so byte offsets found in the lowercased copy are valid
//! in the original text.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// A document lowercased once and scanned many times.
pub struct Doc<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> Doc<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, lc: to_lower(src) }
    }

    pub fn as_str(&self) -> &'a str {
        self.src
    }

    /// Position of the next `open` pattern at or after `from`.
    /// A bare `<name` pattern only matches a whole tag name (`<tr` skips `<track`).
    fn find_open(&self, open_lc: &str, mut from: usize) -> Option<usize> {
        let bare = open_lc.len() > 1
            && open_lc[1..].bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
        loop {
            let at = self.lc.get(from..)?.find(open_lc)? + from;
            if !bare {
                return Some(at);
            }
            match self.lc.as_bytes().get(at + open_lc.len()) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
                None => return None,
                _ => from = at + open_lc.len(),
            }
        }
    }

    /// Next complete `open … close` block at or after `from`, as `(start, end)` byte
    /// offsets spanning the opening tag through the closing tag. No nesting awareness.
    pub fn next_block(&self, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
        let close_lc = to_lower(close);
        let start = self.find_open(&to_lower(open), from)?;
        let open_end = self.src[start..].find('>')? + start + 1;
        let end = self.lc[open_end..].find(&close_lc)? + open_end + close_lc.len();
        Some((start, end))
    }

    /// Next opening tag only, for void elements like `<source …>`.
    pub fn next_opener(&self, open: &str, from: usize) -> Option<(usize, usize)> {
        let start = self.find_open(&to_lower(open), from)?;
        let end = self.src[start..].find('>')? + start + 1;
        Some((start, end))
    }

    /// Every `open … close` block, in document order.
    pub fn blocks(&self, open: &str, close: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some((s, e)) = self.next_block(open, close, pos) {
            out.push(&self.src[s..e]);
            pos = e;
        }
        out
    }

    /// Every opening tag matching `open`.
    pub fn openers(&self, open: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some((s, e)) = self.next_opener(open, pos) {
            out.push(&self.src[s..e]);
            pos = e;
        }
        out
    }
}

/// The opening tag of a block, `<td class="x">` out of `<td class="x">…</td>`.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(end) => &block[..=end],
        None => block,
    }
}

/// Given `<td …>INNER</td>`, return INNER (which may still contain tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let (Some(oe), Some(cs)) = (block.find('>'), block.rfind('<')) {
        if cs > oe {
            return &block[oe + 1..cs];
        }
    }
    ""
}

/// Remove all `<…>` tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Attribute value from an opening tag. Handles double, single and no quotes.
/// `src` does not match inside `data-src`.
pub fn attr_value<'t>(opener: &'t str, name: &str) -> Option<&'t str> {
    let lc = to_lower(opener);
    let pat = format!("{}=", to_lower(name));
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&pat) {
        let at = from + rel;
        let boundary = at > 0 && lc.as_bytes()[at - 1].is_ascii_whitespace();
        if boundary {
            let val = &opener[at + pat.len()..];
            return Some(match val.as_bytes().first() {
                Some(&q @ (b'"' | b'\'')) => {
                    let rest = &val[1..];
                    &rest[..rest.find(q as char).unwrap_or(rest.len())]
                }
                _ => {
                    let end = val
                        .find(|c: char| c.is_ascii_whitespace() || c == '>')
                        .unwrap_or(val.len());
                    &val[..end]
                }
            });
        }
        from = at + pat.len();
    }
    None
}

/// Whether the opening tag carries `class` among its (space separated) classes.
pub fn has_class(opener: &str, class: &str) -> bool {
    attr_value(opener, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

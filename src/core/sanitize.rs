// src/core/sanitize.rs

/// Decode the entities the dictionary site and YouTube actually emit: the common named
/// ones plus numeric `&#NN;` / `&#xHH;`. Unknown entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse whitespace runs into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Visible text of an HTML fragment.
pub fn text_of(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&super::html::strip_tags(fragment)))
}

/// Remove channel boilerplate and quote characters, then trim.
/// Applied identically to playlist (category) titles and video titles.
pub fn clean_title(text: &str, boilerplate: &[String], quotes: &[char]) -> String {
    let mut out = s!(text);
    for b in boilerplate {
        out = out.replace(b.as_str(), "");
    }
    out.retain(|c| !quotes.contains(&c));
    out.trim().to_string()
}

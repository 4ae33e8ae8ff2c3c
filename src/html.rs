//! Bounded text operations over embedded HTML fragments: attribute
//! scanning, entity decoding and package-relative reference rewriting.
//! No full markup parser; the fragments are small and the patterns fixed.

use std::path::Path;

/// Placeholder token denoting "resolve relative to the package root".
pub const FILEBASE_MARKER: &str = "$IMS-CC-FILEBASE$";

/// Directory under the extraction root where packaged media lands.
pub(crate) const WEB_RESOURCES: &str = "web resources";

/// Scan `content` for `<tag … attr="value">` occurrences and collect the
/// attribute values, in order, duplicates included. Tag and attribute names
/// match case-insensitively; both quote styles are recognized. Unterminated
/// tags end the scan.
pub fn scan_attribute(content: &str, tag: &str, attr: &str) -> Vec<String> {
    let mut results = Vec::new();
    if content.is_empty() || tag.is_empty() || attr.is_empty() {
        return results;
    }
    let lower = content.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let attr_lower = attr.to_ascii_lowercase();

    let mut search = 0;
    while let Some(tag_pos) = lower[search..].find(&open).map(|i| i + search) {
        let Some(close) = lower[tag_pos..].find('>').map(|i| i + tag_pos) else {
            break;
        };
        let chunk = &content[tag_pos..=close];
        let chunk_lower = &lower[tag_pos..=close];

        for quote in ['"', '\''] {
            let needle = format!("{attr_lower}={quote}");
            if let Some(p) = chunk_lower.find(&needle) {
                let start = p + needle.len();
                if let Some(end) = chunk_lower[start..].find(quote).map(|i| i + start)
                    && end > start
                {
                    results.push(chunk[start..end].to_string());
                }
            }
        }
        search = close + 1;
    }
    results
}

pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Decode HTML character entities: the common named set plus numeric
/// `&#NN;` / `&#xHH;` forms. Unknown entities pass through unchanged.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(amp) = rest.find('&') else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let semi = rest[1..].find(';').map(|i| i + 1).filter(|&i| i <= 10);
        let decoded = semi.and_then(|semi| {
            let name = &rest[1..semi];
            let ch = match name {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => decode_numeric_entity(name),
            };
            ch.map(|ch| (ch, semi))
        });
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
}

fn decode_numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Rewrite every package-relative placeholder reference in `text` into a
/// local `file:///` URL under the extraction root. The captured run extends
/// from the marker to the next quote; no closing quote ends the scan with
/// the tail untouched. Already-rewritten text is left as is.
pub fn rewrite_filebase_refs(text: &str, extract_root: &Path) -> String {
    let prefix = format!("{FILEBASE_MARKER}/");
    let prefix_lower = prefix.to_ascii_lowercase();
    let lower = text.to_ascii_lowercase();

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(found) = lower[pos..].find(&prefix_lower).map(|i| i + pos) {
        let Some(quote) = text[found + prefix.len()..]
            .find(['"', '\''])
            .map(|i| i + found + prefix.len())
        else {
            break;
        };
        out.push_str(&text[pos..found]);

        let relative = &text[found + prefix.len()..quote];
        let relative = relative.split('?').next().unwrap_or(relative);
        let relative = percent_decode(relative);
        out.push_str(&file_url(&extract_root.join(WEB_RESOURCES).join(relative)));
        pos = quote;
    }
    out.push_str(&text[pos..]);
    out
}

pub(crate) fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Forward-slash normalized `file:///` URL for a local path.
pub(crate) fn file_url(path: &Path) -> String {
    let forward = path.to_string_lossy().replace('\\', "/");
    format!("file:///{}", forward.trim_start_matches('/'))
}

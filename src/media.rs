//! Manifest parsing and attachment resolution: turn package-relative
//! placeholder references into local `file:///` URLs, preferring the
//! manifest's declared locations and falling back to a recursive search.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diag::{DiagnosticKind, Diagnostics};
use crate::html::{self, FILEBASE_MARKER, WEB_RESOURCES};
use crate::model::Quiz;

/// Parse the package manifest into a resource identifier → relative href
/// map. Only `webcontent` resources count; entries missing an identifier,
/// type or inner file reference are skipped. Duplicate identifiers are
/// last-write-wins. Resources are matched by local name because manifests
/// appear with several namespace revisions.
pub fn parse_manifest(xml: &str) -> Result<HashMap<String, String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut mappings = HashMap::new();

    for resource in doc
        .descendants()
        .filter(|n| n.tag_name().name() == "resource")
    {
        let Some(id) = resource.attribute("identifier").filter(|v| !v.is_empty()) else {
            continue;
        };
        let Some(kind) = resource.attribute("type").filter(|v| !v.is_empty()) else {
            continue;
        };
        if !kind.to_ascii_lowercase().contains("webcontent") {
            continue;
        }
        let Some(href) = resource
            .children()
            .find(|n| n.tag_name().name() == "file")
            .and_then(|f| f.attribute("href"))
            .filter(|v| !v.is_empty())
        else {
            continue;
        };
        log::debug!("manifest mapping: {id} -> {href}");
        mappings.insert(id.to_string(), href.to_string());
    }

    Ok(mappings)
}

/// Resolve every attachment still carrying the placeholder marker. A found
/// file rewrites both the attachment reference and any literal occurrence
/// of the unresolved reference inside the owning question's body; a missing
/// file leaves the reference unchanged and records a diagnostic.
pub fn resolve_attachments(
    quiz: &mut Quiz,
    mappings: &HashMap<String, String>,
    extract_root: &Path,
    diag: &mut Diagnostics,
) {
    for question in &mut quiz.questions {
        for i in 0..question.attachments.len() {
            let original = question.attachments[i].reference.clone();
            if !html::contains_ignore_ascii_case(&original, FILEBASE_MARKER) {
                continue;
            }

            let relative = strip_marker(&original);
            // Manifest-declared locations win over the literal composition.
            let relative = mappings
                .values()
                .find(|href| ends_with_ignore_case(href, &relative))
                .cloned()
                .unwrap_or(relative);

            let composed = compose_path(extract_root, &relative);
            let found = if composed.is_file() {
                Some(composed)
            } else {
                search_by_name(extract_root, file_name_of(&relative))
            };

            match found {
                Some(path) => {
                    let url = html::file_url(&path);
                    log::debug!("resolved attachment {original} -> {url}");
                    question.attachments[i].reference = url.clone();
                    question.text = question.text.replace(&original, &url);
                }
                None => diag.report(
                    DiagnosticKind::UnresolvedMedia,
                    Some(&question.question_id),
                    format!(
                        "no file for {original} under {}",
                        extract_root.display()
                    ),
                ),
            }
        }
    }
}

/// Drop everything through the marker, strip any query suffix and
/// percent-decode what remains.
fn strip_marker(reference: &str) -> String {
    let lower = reference.to_ascii_lowercase();
    let marker = FILEBASE_MARKER.to_ascii_lowercase();
    let rest = match lower.find(&marker) {
        Some(pos) => &reference[pos + FILEBASE_MARKER.len()..],
        None => reference,
    };
    let rest = rest.trim_start_matches('/');
    let rest = rest.split('?').next().unwrap_or(rest);
    html::percent_decode(rest)
}

fn ends_with_ignore_case(href: &str, suffix: &str) -> bool {
    href.to_ascii_lowercase()
        .ends_with(&suffix.to_ascii_lowercase())
}

/// Manifest hrefs usually name the web-resources directory themselves
/// (space or underscore spelling); those join the root unchanged. Bare
/// relative paths get the default segment prepended.
fn compose_path(extract_root: &Path, relative: &str) -> PathBuf {
    let lower = relative.to_ascii_lowercase();
    if lower.starts_with(WEB_RESOURCES) || lower.starts_with("web_resources") {
        extract_root.join(relative)
    } else {
        extract_root.join(WEB_RESOURCES).join(relative)
    }
}

fn file_name_of(relative: &str) -> &str {
    relative
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(relative)
}

/// Recursive filename-only search under the extraction root. The walk is
/// sorted so the first hit is deterministic.
fn search_by_name(extract_root: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    WalkDir::new(extract_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| {
            entry.file_type().is_file()
                && entry.file_name().to_string_lossy().eq_ignore_ascii_case(name)
        })
        .map(|entry| entry.into_path())
}

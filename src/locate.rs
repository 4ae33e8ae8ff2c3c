//! Finds the two top-level documents inside an extracted package tree:
//! the manifest and the primary quiz definition. Convenience glue on top of
//! the core; callers that already know the paths go straight to
//! [`load_quiz`](crate::load_quiz).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;

const MANIFEST_FILE: &str = "imsmanifest.xml";
const ASSESSMENT_META: &str = "assessment_meta.xml";

#[derive(Debug)]
pub struct PackagePaths {
    pub quiz_definition: PathBuf,
    pub manifest: Option<PathBuf>,
}

/// Walk the extraction root for `imsmanifest.xml` and the first quiz
/// definition: any `.xml` that is neither the manifest nor the assessment
/// metadata sidecar. A package without a manifest is legal (media
/// resolution is simply disabled); a package without a quiz definition is
/// an error.
pub fn locate_package(extract_root: &Path) -> Result<PackagePaths, Error> {
    let mut manifest = None;
    let mut quiz_definition = None;

    for entry in WalkDir::new(extract_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if name == MANIFEST_FILE {
            if manifest.is_none() {
                manifest = Some(entry.into_path());
            }
        } else if name.ends_with(".xml")
            && name != ASSESSMENT_META
            && quiz_definition.is_none()
        {
            quiz_definition = Some(entry.into_path());
        }
        if manifest.is_some() && quiz_definition.is_some() {
            break;
        }
    }

    let Some(quiz_definition) = quiz_definition else {
        return Err(Error::QuizDefinitionNotFound(extract_root.to_path_buf()));
    };
    log::debug!(
        "located quiz definition {} (manifest: {})",
        quiz_definition.display(),
        manifest
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
    Ok(PackagePaths {
        quiz_definition,
        manifest,
    })
}

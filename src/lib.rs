mod diag;
mod error;
mod html;
mod locate;
mod media;
mod model;
mod qti;

pub use diag::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::Error;
pub use html::{FILEBASE_MARKER, decode_entities, rewrite_filebase_refs, scan_attribute};
pub use locate::{PackagePaths, locate_package};
pub use media::{parse_manifest, resolve_attachments};
pub use model::{Answer, Attachment, AttachmentKind, Question, QuestionType, Quiz};
pub use qti::parse_quiz;

use std::path::Path;
use std::time::Instant;

/// A fully parsed package: the quiz graph plus every non-fatal finding
/// collected along the way.
#[derive(Debug)]
pub struct LoadedQuiz {
    pub quiz: Quiz,
    pub diagnostics: Diagnostics,
}

/// Parse a quiz-definition document and, when a manifest path is given,
/// resolve media attachments against the extraction root. Omitting the
/// manifest disables resolution. Only an unreadable or unparsable
/// top-level document fails; everything else degrades to defaults recorded
/// in the diagnostics.
pub fn load_quiz(
    quiz_path: &Path,
    manifest_path: Option<&Path>,
    extract_root: &Path,
) -> Result<LoadedQuiz, Error> {
    let t0 = Instant::now();
    let mut diagnostics = Diagnostics::new();

    let quiz_xml = std::fs::read_to_string(quiz_path)
        .map_err(|e| Error::DocumentRead(quiz_path.to_path_buf(), e))?;
    let mut quiz = qti::parse_quiz(&quiz_xml, extract_root, &mut diagnostics)
        .map_err(|e| Error::DocumentParse(quiz_path.to_path_buf(), e))?;
    let t_parse = t0.elapsed();

    if let Some(manifest_path) = manifest_path {
        let manifest_xml = std::fs::read_to_string(manifest_path)
            .map_err(|e| Error::DocumentRead(manifest_path.to_path_buf(), e))?;
        let mappings = media::parse_manifest(&manifest_xml)
            .map_err(|e| Error::DocumentParse(manifest_path.to_path_buf(), e))?;
        media::resolve_attachments(&mut quiz, &mappings, extract_root, &mut diagnostics);
    }
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, resolve={:.1}ms, total={:.1}ms ({} questions, {} diagnostics)",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        quiz.questions.len(),
        diagnostics.len(),
    );

    Ok(LoadedQuiz { quiz, diagnostics })
}

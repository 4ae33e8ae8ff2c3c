use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures. Everything below the two top-level documents degrades to
/// a default and a diagnostic instead of erroring.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {}", .0.display(), .1)]
    DocumentRead(PathBuf, #[source] std::io::Error),

    #[error("cannot parse {}: {}", .0.display(), .1)]
    DocumentParse(PathBuf, #[source] roxmltree::Error),

    #[error("no quiz definition found under {}", .0.display())]
    QuizDefinitionNotFound(PathBuf),
}

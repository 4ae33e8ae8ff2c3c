use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An optional attribute or node was absent and its default applied.
    MissingField,
    /// An attachment whose backing file could not be located on disk.
    UnresolvedMedia,
    /// A correctness rule referenced an option identifier with no match.
    DanglingCorrectness,
    /// A `question_type` value outside the known vocabulary.
    UnknownQuestionType,
}

impl DiagnosticKind {
    fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingField => "missing field",
            DiagnosticKind::UnresolvedMedia => "unresolved media",
            DiagnosticKind::DanglingCorrectness => "dangling correctness reference",
            DiagnosticKind::UnknownQuestionType => "unknown question type",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub question_id: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.question_id {
            Some(id) => write!(f, "{} [{}]: {}", self.kind.label(), id, self.message),
            None => write!(f, "{}: {}", self.kind.label(), self.message),
        }
    }
}

/// Collector for non-fatal findings, threaded by reference through every
/// stage of the pipeline. Entries are also forwarded to the `log` facade so
/// tracing works without draining the collection.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, question_id: Option<&str>, message: String) {
        let entry = Diagnostic {
            kind,
            question_id: question_id.map(str::to_string),
            message,
        };
        match kind {
            DiagnosticKind::UnresolvedMedia => log::warn!("{entry}"),
            _ => log::debug!("{entry}"),
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

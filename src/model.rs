#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    MultipleAnswers,
    ShortAnswer,
    FillInMultipleBlanks,
    MultipleDropdowns,
    Matching,
    Numerical,
    Calculated,
    Essay,
    FileUpload,
    TextOnly,
    Unknown,
}

impl QuestionType {
    /// Map a `question_type` metadata value to a variant. Anything outside
    /// the fixed vocabulary becomes `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "multiple_choice_question" => QuestionType::MultipleChoice,
            "true_false_question" => QuestionType::TrueFalse,
            "multiple_answers_question" => QuestionType::MultipleAnswers,
            "short_answer_question" => QuestionType::ShortAnswer,
            "fill_in_multiple_blanks_question" => QuestionType::FillInMultipleBlanks,
            "multiple_dropdowns_question" => QuestionType::MultipleDropdowns,
            "matching_question" => QuestionType::Matching,
            "numerical_question" => QuestionType::Numerical,
            "calculated_question" => QuestionType::Calculated,
            "essay_question" => QuestionType::Essay,
            "file_upload_question" => QuestionType::FileUpload,
            "text_only_question" => QuestionType::TextOnly,
            _ => QuestionType::Unknown,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice_question",
            QuestionType::TrueFalse => "true_false_question",
            QuestionType::MultipleAnswers => "multiple_answers_question",
            QuestionType::ShortAnswer => "short_answer_question",
            QuestionType::FillInMultipleBlanks => "fill_in_multiple_blanks_question",
            QuestionType::MultipleDropdowns => "multiple_dropdowns_question",
            QuestionType::Matching => "matching_question",
            QuestionType::Numerical => "numerical_question",
            QuestionType::Calculated => "calculated_question",
            QuestionType::Essay => "essay_question",
            QuestionType::FileUpload => "file_upload_question",
            QuestionType::TextOnly => "text_only_question",
            QuestionType::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Answer {
    pub answer_id: String,
    pub text: String,
    pub correct: bool,
}

impl Answer {
    pub fn new(answer_id: String, text: String, correct: bool) -> Self {
        Self {
            answer_id,
            text,
            correct,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Table,
    Equation,
    File,
}

/// A media reference discovered inside question markup. The reference is
/// either the raw value as extracted (possibly a package-relative
/// placeholder) or, after resolution, a `file:///` URL, never a partially
/// substituted mix.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub reference: String,
    pub kind: AttachmentKind,
}

#[derive(Debug)]
pub struct Question {
    pub question_id: String,
    pub question_type: QuestionType,
    /// Decoded HTML body. Rewritten in place by the reference fixup during
    /// extraction and again by media resolution.
    pub text: String,
    pub points_possible: f64,
    pub answers: Vec<Answer>,
    pub attachments: Vec<Attachment>,
}

impl Question {
    pub fn new(question_id: String, question_type: QuestionType, text: String) -> Self {
        Self {
            question_id,
            question_type,
            text,
            points_possible: 1.0,
            answers: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Quiz {
    pub quiz_id: String,
    pub title: String,
    pub max_attempts: u32,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(quiz_id: String, title: String, max_attempts: u32) -> Self {
        Self {
            quiz_id,
            title,
            max_attempts,
            questions: Vec::new(),
        }
    }

    /// Sum of the contained questions' points. Recomputed on every call.
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points_possible).sum()
    }
}

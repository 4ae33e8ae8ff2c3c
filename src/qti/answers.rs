//! Per-type answer extraction. Every question type shares the same shape
//! (collect labeled options, then mark a subset correct from the
//! response-condition rules) but differs in where options live and how
//! many equality tests count.

use roxmltree::Node;
use uuid::Uuid;

use crate::diag::{DiagnosticKind, Diagnostics};
use crate::model::{Answer, Question, QuestionType};

use super::{is_qti, node_text, qti};

pub(super) fn extract(item: Node, question: &mut Question, diag: &mut Diagnostics) {
    match question.question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            single_select(item, question, diag)
        }
        QuestionType::MultipleAnswers => multi_select(item, question, diag),
        QuestionType::ShortAnswer => accepted_text(item, question),
        QuestionType::FillInMultipleBlanks
        | QuestionType::MultipleDropdowns
        | QuestionType::Matching => grouped_options(item, question, diag),
        QuestionType::Numerical => accepted_number(item, question),
        QuestionType::Calculated => {
            log::debug!(
                "calculated question {}: formula-driven, no static answers",
                question.question_id
            );
        }
        QuestionType::Essay | QuestionType::FileUpload | QuestionType::TextOnly => {}
        QuestionType::Unknown => {
            log::debug!(
                "no specialized answer parsing for question {}",
                question.question_id
            );
        }
    }
}

/// Options from every `response_label`; each response condition's first
/// equality test marks its referenced option.
fn single_select(item: Node, question: &mut Question, diag: &mut Diagnostics) {
    collect_labels(item, question, diag);
    for cond in item.descendants().filter(|n| is_qti(n, "respcondition")) {
        if let Some(varequal) = cond.descendants().find(|n| is_qti(n, "varequal")) {
            let option_id = node_text(varequal);
            mark_correct(question, option_id.trim(), diag);
        }
    }
}

/// Same options as single-select, but every equality test marks.
fn multi_select(item: Node, question: &mut Question, diag: &mut Diagnostics) {
    collect_labels(item, question, diag);
    for cond in item.descendants().filter(|n| is_qti(n, "respcondition")) {
        for varequal in cond.descendants().filter(|n| is_qti(n, "varequal")) {
            let option_id = node_text(varequal);
            mark_correct(question, option_id.trim(), diag);
        }
    }
}

/// Free-text accepted answers: no fixed options, every equality value
/// becomes a correct entry of its own.
fn accepted_text(item: Node, question: &mut Question) {
    for cond in item.descendants().filter(|n| is_qti(n, "respcondition")) {
        for varequal in cond.descendants().filter(|n| is_qti(n, "varequal")) {
            question.answers.push(Answer::new(
                Uuid::new_v4().to_string(),
                node_text(varequal).trim().to_string(),
                true,
            ));
        }
    }
}

/// Blanks, dropdowns and matching pairs: options are grouped under
/// `response_lid` elements, one equality test per condition marks.
fn grouped_options(item: Node, question: &mut Question, diag: &mut Diagnostics) {
    for group in item.descendants().filter(|n| is_qti(n, "response_lid")) {
        for label in group.descendants().filter(|n| is_qti(n, "response_label")) {
            let answer = labeled_answer(label, &question.question_id, "No option", diag);
            question.answers.push(answer);
        }
    }
    for cond in item.descendants().filter(|n| is_qti(n, "respcondition")) {
        if let Some(varequal) = cond.descendants().find(|n| is_qti(n, "varequal")) {
            let option_id = node_text(varequal);
            mark_correct(question, option_id.trim(), diag);
        }
    }
}

/// The single accepted numeric value becomes one correct entry.
fn accepted_number(item: Node, question: &mut Question) {
    let varequal = item
        .descendants()
        .filter(|n| is_qti(n, "respcondition"))
        .find_map(|cond| cond.descendants().find(|n| is_qti(n, "varequal")));
    if let Some(varequal) = varequal {
        question.answers.push(Answer::new(
            Uuid::new_v4().to_string(),
            node_text(varequal).trim().to_string(),
            true,
        ));
    }
}

fn collect_labels(item: Node, question: &mut Question, diag: &mut Diagnostics) {
    for label in item.descendants().filter(|n| is_qti(n, "response_label")) {
        let answer = labeled_answer(label, &question.question_id, "No text", diag);
        question.answers.push(answer);
    }
}

fn labeled_answer(
    label: Node,
    question_id: &str,
    missing_text: &str,
    diag: &mut Diagnostics,
) -> Answer {
    let answer_id = match label.attribute("ident") {
        Some(id) => id.to_string(),
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                Some(question_id),
                "response_label has no ident, generated one".to_string(),
            );
            Uuid::new_v4().to_string()
        }
    };
    let text = label
        .descendants()
        .find(|n| is_qti(n, "material"))
        .and_then(|m| qti(m, "mattext"))
        .map(node_text)
        .unwrap_or_else(|| missing_text.to_string());
    Answer::new(answer_id, text, false)
}

/// Correctness matching is keyed on the option identifier, scoped to this
/// question's answers only. Unmatched references are ignored.
fn mark_correct(question: &mut Question, option_id: &str, diag: &mut Diagnostics) {
    match question
        .answers
        .iter_mut()
        .find(|a| a.answer_id == option_id)
    {
        Some(answer) => answer.correct = true,
        None => diag.report(
            DiagnosticKind::DanglingCorrectness,
            Some(&question.question_id),
            format!("equality test references unknown option \"{option_id}\""),
        ),
    }
}

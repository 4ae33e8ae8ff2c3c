mod answers;

use std::path::Path;

use roxmltree::Node;
use uuid::Uuid;

use crate::diag::{DiagnosticKind, Diagnostics};
use crate::html;
use crate::model::{Attachment, AttachmentKind, Question, QuestionType, Quiz};

pub(crate) const QTI_NS: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2";

const UNTITLED_QUIZ: &str = "Untitled Quiz";
const NO_QUESTION_TEXT: &str = "No question text";

pub(crate) fn is_qti(node: &Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(QTI_NS)
}

pub(crate) fn qti<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children().find(|n| is_qti(n, name))
}

/// Concatenated text content of a node's subtree.
pub(crate) fn node_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Parse a quiz-definition document into a [`Quiz`]. Only an unparsable
/// document is an error; every optional lookup inside degrades to its
/// default and a diagnostic.
pub fn parse_quiz(
    xml: &str,
    extract_root: &Path,
    diag: &mut Diagnostics,
) -> Result<Quiz, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;

    let assessment = doc.descendants().find(|n| is_qti(n, "assessment"));
    let quiz_id = match assessment.and_then(|n| n.attribute("ident")) {
        Some(id) => id.to_string(),
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                None,
                "assessment has no ident, generated one".to_string(),
            );
            Uuid::new_v4().to_string()
        }
    };
    let title = match assessment.and_then(|n| n.attribute("title")) {
        Some(title) => title.to_string(),
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                None,
                format!("assessment has no title, using \"{UNTITLED_QUIZ}\""),
            );
            UNTITLED_QUIZ.to_string()
        }
    };

    let mut quiz = Quiz::new(quiz_id, title, 1);
    log::debug!("quiz loaded: {} ({})", quiz.title, quiz.quiz_id);

    for item in doc.descendants().filter(|n| is_qti(n, "item")) {
        quiz.questions.push(parse_item(item, extract_root, diag));
    }

    Ok(quiz)
}

/// Look up a named field in `itemmetadata/qtimetadata`.
fn metadata_field(item: Node, label: &str) -> Option<String> {
    let meta = qti(item, "itemmetadata").and_then(|n| qti(n, "qtimetadata"))?;
    meta.children()
        .filter(|n| is_qti(n, "qtimetadatafield"))
        .find(|field| {
            qti(*field, "fieldlabel").is_some_and(|l| node_text(l).trim() == label)
        })
        .and_then(|field| qti(field, "fieldentry"))
        .map(node_text)
}

fn parse_item(item: Node, extract_root: &Path, diag: &mut Diagnostics) -> Question {
    let question_id = match item.attribute("ident") {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            diag.report(
                DiagnosticKind::MissingField,
                Some(&id),
                "item has no ident, generated one".to_string(),
            );
            id
        }
    };

    let question_type = match metadata_field(item, "question_type") {
        Some(tag) => {
            let tag = tag.trim().to_string();
            let qtype = QuestionType::from_tag(&tag);
            if qtype == QuestionType::Unknown {
                diag.report(
                    DiagnosticKind::UnknownQuestionType,
                    Some(&question_id),
                    format!("question_type \"{tag}\" is not recognized"),
                );
            }
            qtype
        }
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                Some(&question_id),
                "item has no question_type metadata".to_string(),
            );
            QuestionType::Unknown
        }
    };

    let points_possible = match metadata_field(item, "points_possible") {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(points) => points,
            Err(_) => {
                diag.report(
                    DiagnosticKind::MissingField,
                    Some(&question_id),
                    format!("points_possible \"{}\" is not a number, using 1.0", raw.trim()),
                );
                1.0
            }
        },
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                Some(&question_id),
                "item has no points_possible metadata, using 1.0".to_string(),
            );
            1.0
        }
    };

    // Main body: the first presentation material, entity-decoded, with
    // package-relative references rewritten to local URLs.
    let text = match qti(item, "presentation")
        .and_then(|p| qti(p, "material"))
        .and_then(|m| qti(m, "mattext"))
    {
        Some(mattext) => {
            let decoded = html::decode_entities(&node_text(mattext));
            html::rewrite_filebase_refs(&decoded, extract_root)
        }
        None => {
            diag.report(
                DiagnosticKind::MissingField,
                Some(&question_id),
                "item has no question text".to_string(),
            );
            NO_QUESTION_TEXT.to_string()
        }
    };

    let mut question = Question::new(question_id, question_type, text);
    question.points_possible = points_possible;

    // Attachment discovery runs over every text-bearing material node, not
    // just the main body. Raw extracted values are kept; resolution happens
    // later against the manifest.
    for mattext in item.descendants().filter(|n| is_qti(n, "mattext")) {
        let content = html::decode_entities(&node_text(mattext));
        if html::contains_ignore_ascii_case(&content, "<img") {
            for src in html::scan_attribute(&content, "img", "src") {
                log::debug!("found <img> src => {src}");
                question.attachments.push(Attachment {
                    reference: src,
                    kind: AttachmentKind::Image,
                });
            }
        }
        if html::contains_ignore_ascii_case(&content, "<a ") {
            for href in html::scan_attribute(&content, "a", "href") {
                log::debug!("found <a> href => {href}");
                question.attachments.push(Attachment {
                    reference: href,
                    kind: AttachmentKind::Document,
                });
            }
        }
    }

    answers::extract(item, &mut question, diag);
    question
}

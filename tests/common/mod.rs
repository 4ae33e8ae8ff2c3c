use std::fs;
use std::path::{Path, PathBuf};

pub const QTI_NS: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2";
pub const IMS_NS: &str = "http://www.imsglobal.org/xsd/imsccv1p1/imscp_v1p1";

pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Wrap item markup in a minimal quiz-definition document.
pub fn quiz_doc(items: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<questestinterop xmlns="{QTI_NS}">
  <assessment ident="quiz1" title="Sample Quiz">
    <section ident="root_section">
{items}
    </section>
  </assessment>
</questestinterop>"#
    )
}

/// One item node. `body` is the entity-encoded HTML body,
/// `presentation_extra` lands after the material (response declarations),
/// `resprocessing` after the presentation.
pub fn item(
    ident: &str,
    question_type: &str,
    points: &str,
    body: &str,
    presentation_extra: &str,
    resprocessing: &str,
) -> String {
    format!(
        r#"<item ident="{ident}" title="{ident}">
  <itemmetadata>
    <qtimetadata>
      <qtimetadatafield><fieldlabel>question_type</fieldlabel><fieldentry>{question_type}</fieldentry></qtimetadatafield>
      <qtimetadatafield><fieldlabel>points_possible</fieldlabel><fieldentry>{points}</fieldentry></qtimetadatafield>
    </qtimetadata>
  </itemmetadata>
  <presentation>
    <material><mattext texttype="text/html">{body}</mattext></material>
    {presentation_extra}
  </presentation>
  {resprocessing}
</item>"#
    )
}

/// A single-cardinality choice group with the given (ident, text) labels.
pub fn render_choice(labels: &[(&str, &str)]) -> String {
    let labels: String = labels
        .iter()
        .map(|(id, text)| {
            format!(
                r#"<response_label ident="{id}"><material><mattext>{text}</mattext></material></response_label>"#
            )
        })
        .collect();
    format!(
        r#"<response_lid ident="response1" rcardinality="Single"><render_choice>{labels}</render_choice></response_lid>"#
    )
}

/// Scoring block with one equality test on the given option identifier.
pub fn correct_condition(value: &str) -> String {
    format!(
        r#"<resprocessing>
  <outcomes><decvar maxvalue="100" minvalue="0" varname="SCORE" vartype="Decimal"/></outcomes>
  <respcondition continue="No">
    <conditionvar><varequal respident="response1">{value}</varequal></conditionvar>
    <setvar action="Set" varname="SCORE">100</setvar>
  </respcondition>
</resprocessing>"#
    )
}

/// A package manifest declaring one webcontent resource per (id, href).
pub fn manifest(resources: &[(&str, &str)]) -> String {
    let resources: String = resources
        .iter()
        .map(|(id, href)| {
            format!(
                r#"<resource identifier="{id}" type="webcontent" href="{href}"><file href="{href}"/></resource>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest identifier="man1" xmlns="{IMS_NS}">
  <resources>{resources}</resources>
</manifest>"#
    )
}

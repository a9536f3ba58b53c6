use folio::types::*;

fn bare_tag() -> Tag {
    Tag {
        tag: "0XYZ".to_string(),
        label: None,
        active: None,
        ref_: None,
        kind: None,
        html: None,
    }
}

#[test]
fn test_summary_from_tag_with_all_fields_absent() {
    let summary = TagSummary::from(&bare_tag());
    assert_eq!(summary.tag.as_deref(), Some("0XYZ"));
    assert!(summary.name.is_none());
    assert!(summary.ref_.is_none());
    assert!(summary.html.is_none());
    assert!(summary.kind.is_none());
}

#[test]
fn test_summary_from_tag_with_fields_present() {
    let tag = Tag {
        tag: "0ABC".to_string(),
        label: Some("lemma-snake".to_string()),
        active: Some(true),
        ref_: Some("3.2.1".to_string()),
        kind: Some(TagKind::Lemma),
        html: Some("<p>body</p>".to_string()),
    };

    let summary = TagSummary::from(&tag);
    assert_eq!(summary.ref_.as_deref(), Some("3.2.1"));
    assert_eq!(summary.html.as_deref(), Some("<p>body</p>"));
    assert_eq!(summary.kind.as_deref(), Some("lemma"));
}

#[test]
fn test_summary_from_named_tag_carries_name() {
    let named = NamedTag {
        tag: "0ABC".to_string(),
        ref_: Some("2".to_string()),
        kind: Some(TagKind::Chapter),
        name: "Sheaves".to_string(),
    };

    let summary = TagSummary::from(&named);
    assert_eq!(summary.name.as_deref(), Some("Sheaves"));
    assert_eq!(summary.kind.as_deref(), Some("chapter"));
    assert!(summary.html.is_none());
}

#[test]
fn test_summary_from_proof_unwraps_owning_tag() {
    let proof = Proof {
        tag: "0DEF".to_string(),
        html: Some("<p>proof</p>".to_string()),
        number: 1,
    };

    let summary = TagSummary::from(&proof);
    assert_eq!(summary.tag.as_deref(), Some("0DEF"));
    assert_eq!(summary.html.as_deref(), Some("<p>proof</p>"));
    assert!(summary.ref_.is_none());
    assert!(summary.kind.is_none());
}

#[test]
fn test_summary_serializes_wire_field_names() {
    let tag = Tag {
        ref_: Some("1.2".to_string()),
        kind: Some(TagKind::Theorem),
        ..bare_tag()
    };

    let value = serde_json::to_value(TagSummary::from(&tag)).expect("serialize failed");
    assert_eq!(value["ref"], "1.2");
    assert_eq!(value["type"], "theorem");
    assert!(value["name"].is_null());
}

#[test]
fn test_tag_kind_parse_and_as_str() {
    assert_eq!(TagKind::parse("theorem"), TagKind::Theorem);
    assert_eq!(TagKind::parse("chapter"), TagKind::Chapter);
    assert_eq!(
        TagKind::parse("historical remark"),
        TagKind::Other("historical remark".to_string())
    );
    assert_eq!(TagKind::parse("lemma").as_str(), "lemma");
}

#[test]
fn test_tag_kind_is_structural() {
    assert!(TagKind::Chapter.is_structural());
    assert!(TagKind::Section.is_structural());
    assert!(TagKind::Subsection.is_structural());
    assert!(!TagKind::Theorem.is_structural());
    assert!(!TagKind::Other("note".to_string()).is_structural());
}

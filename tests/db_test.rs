mod common;

use common::*;
use folio::db::Store;
use folio::types::TagKind;
use tempfile::TempDir;

#[test]
fn test_initialize_creates_database() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("subdir").join("refs.sqlite");
    let _store = Store::initialize(&db_path).expect("failed to initialize store");
    assert!(db_path.exists(), "store file should exist after initialize");
}

#[test]
fn test_open_existing_database() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("refs.sqlite");
    {
        let store = Store::initialize(&db_path).expect("failed to initialize store");
        insert_tag(&store, "ch1", Some("1"), Some("chapter"), None);
    }

    let store = Store::open(&db_path).expect("failed to open store");
    let tag = store
        .get_tag("ch1")
        .expect("query should not fail")
        .expect("tag should exist");
    assert_eq!(tag.tag, "ch1");
    assert_eq!(tag.kind, Some(TagKind::Chapter));
}

#[test]
fn test_get_tag_not_found() {
    let (store, _dir) = setup_store();
    let result = store.get_tag("missing").expect("query should not fail");
    assert!(result.is_none());
}

#[test]
fn test_get_tag_with_optional_fields_absent() {
    let (store, _dir) = setup_store();
    insert_tag(&store, "bare", None, None, None);

    let tag = store
        .get_tag("bare")
        .expect("query should not fail")
        .expect("tag should exist");
    assert!(tag.ref_.is_none());
    assert!(tag.kind.is_none());
    assert!(tag.html.is_none());
}

#[test]
fn test_get_all_tags() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);

    let tags = store.get_all_tags().expect("failed to query all tags");
    assert_eq!(tags.len(), 3);
}

#[test]
fn test_get_chapters_joins_label_names() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);

    let chapters = store.get_chapters().expect("failed to query chapters");
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].tag, "ch1");
    assert_eq!(chapters[0].name, "Basics");
}

#[test]
fn test_get_sections_under() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);

    let sections = store
        .get_sections_under("1")
        .expect("failed to query sections");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].tag, "s1");
    assert_eq!(sections[0].name, "First notions");
}

#[test]
fn test_get_descendant_tags_excludes_sections() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);

    let tags = store
        .get_descendant_tags("1")
        .expect("failed to query descendants");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag, "t1");
}

#[test]
fn test_get_named_tags_by_refs() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);

    let refs = vec!["1".to_string(), "1.1".to_string()];
    let named = store
        .get_named_tags_by_refs(&refs)
        .expect("failed to query by refs");
    assert_eq!(named.len(), 2);

    let empty = store
        .get_named_tags_by_refs(&[])
        .expect("empty ref list should not fail");
    assert!(empty.is_empty());
}

#[test]
fn test_get_proofs_ordered_by_number() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);
    insert_proof(&store, "t1", Some("<p>second proof</p>"), 2);
    insert_proof(&store, "t1", Some("<p>first proof</p>"), 1);

    let proofs = store.get_proofs("t1").expect("failed to query proofs");
    assert_eq!(proofs.len(), 2);
    assert_eq!(proofs[0].number, 1);
    assert_eq!(proofs[1].number, 2);
}

#[test]
fn test_get_extras() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);
    insert_extra(&store, "t1", Some("<p>historical note</p>"));

    let extras = store.get_extras("t1").expect("failed to query extras");
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].html.as_deref(), Some("<p>historical note</p>"));
}

#[test]
fn test_search_excludes_structural_kinds() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);
    insert_search(&store, "ch1", "homology of spheres", "homology of spheres");
    insert_search(&store, "t1", "homology of spheres", "homology of spheres");

    let hits = store
        .search_tags("homology", 10)
        .expect("failed to search");
    assert_eq!(hits.len(), 1, "the chapter must be filtered out");
    assert_eq!(hits[0].tag.tag, "t1");
    assert!(hits[0].score > 0.0);
}

#[test]
fn test_search_quotes_hostile_input() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);
    insert_search(&store, "t1", "statement body", "statement body");

    // FTS5 operators and stray quotes must not produce a syntax error.
    let hits = store
        .search_tags("\"AND NOT (", 10)
        .expect("hostile query should not fail");
    assert!(hits.is_empty());
}

#[test]
fn test_get_stats() {
    let (store, _dir) = setup_store();
    insert_small_tree(&store);
    insert_proof(&store, "t1", None, 1);

    let stats = store.get_stats().expect("failed to get stats");
    assert_eq!(stats.tag_count, 3);
    assert_eq!(stats.chapter_count, 1);
    assert_eq!(stats.proof_count, 1);
    assert!(stats.db_size_bytes > 0);
}

// Not every suite uses every helper.
#![allow(dead_code)]

use folio::db::Store;
use rusqlite::params;
use tempfile::TempDir;

/// Helper: create a fresh store in a temp directory and return it together
/// with the TempDir so the directory stays alive for the duration of the
/// test.
pub fn setup_store() -> (Store, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let store = Store::initialize(&db_path).expect("failed to initialize store");
    (store, dir)
}

/// Inserts a tag row the way the build pipeline would.
pub fn insert_tag(store: &Store, tag: &str, ref_: Option<&str>, kind: Option<&str>, html: Option<&str>) {
    store
        .conn()
        .execute(
            "INSERT INTO tags (tag, label, active, ref, type, html) VALUES (?1, ?2, 1, ?3, ?4, ?5)",
            params![tag, format!("label-{tag}"), ref_, kind, html],
        )
        .expect("failed to insert tag");
}

/// Attaches a human-readable name to a tag.
pub fn insert_label_name(store: &Store, tag: &str, name: &str) {
    store
        .conn()
        .execute(
            "INSERT INTO label_names (tag, name) VALUES (?1, ?2)",
            params![tag, name],
        )
        .expect("failed to insert label name");
}

/// Inserts a proof body for a tag.
pub fn insert_proof(store: &Store, tag: &str, html: Option<&str>, number: i64) {
    store
        .conn()
        .execute(
            "INSERT INTO proofs (tag, html, number) VALUES (?1, ?2, ?3)",
            params![tag, html, number],
        )
        .expect("failed to insert proof");
}

/// Inserts supplementary content for a tag.
pub fn insert_extra(store: &Store, tag: &str, html: Option<&str>) {
    store
        .conn()
        .execute(
            "INSERT INTO extras (tag, html) VALUES (?1, ?2)",
            params![tag, html],
        )
        .expect("failed to insert extra");
}

/// Indexes a tag in the full-text search table.
pub fn insert_search(store: &Store, tag: &str, html: &str, full: &str) {
    store
        .conn()
        .execute(
            "INSERT INTO tag_search (tag, html, full) VALUES (?1, ?2, ?3)",
            params![tag, html, full],
        )
        .expect("failed to insert search row");
}

/// Builds the three-level fixture used across the suites: one chapter with
/// one section owning one theorem.
pub fn insert_small_tree(store: &Store) {
    insert_tag(store, "ch1", Some("1"), Some("chapter"), Some("<p>chapter body</p>"));
    insert_label_name(store, "ch1", "Basics");
    insert_tag(store, "s1", Some("1.1"), Some("section"), None);
    insert_label_name(store, "s1", "First notions");
    insert_tag(store, "t1", Some("1.1.1"), Some("theorem"), Some("<p>statement</p>"));
    insert_label_name(store, "t1", "Main theorem");
}

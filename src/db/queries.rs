use rusqlite::params;
use rusqlite::OptionalExtension;

use super::connection::Store;
use crate::errors::{FolioError, Result};
use crate::types::*;

// ---------------------------------------------------------------------------
// Helper: map a rusqlite row to domain types
// ---------------------------------------------------------------------------

/// Maps a row from the `tags` table to a `Tag`.
fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    let active_int: Option<i64> = row.get("active")?;
    let kind_str: Option<String> = row.get("type")?;

    Ok(Tag {
        tag: row.get("tag")?,
        label: row.get("label")?,
        active: active_int.map(|v| v != 0),
        ref_: row.get("ref")?,
        kind: kind_str.map(|s| TagKind::parse(&s)),
        html: row.get("html")?,
    })
}

/// Maps a tag row joined with `label_names` to a `NamedTag`.
fn row_to_named_tag(row: &rusqlite::Row) -> rusqlite::Result<NamedTag> {
    let kind_str: Option<String> = row.get("type")?;

    Ok(NamedTag {
        tag: row.get("tag")?,
        ref_: row.get("ref")?,
        kind: kind_str.map(|s| TagKind::parse(&s)),
        name: row.get("name")?,
    })
}

/// Maps a row from the `proofs` table to a `Proof`.
fn row_to_proof(row: &rusqlite::Row) -> rusqlite::Result<Proof> {
    Ok(Proof {
        tag: row.get("tag")?,
        html: row.get("html")?,
        number: row.get("number")?,
    })
}

/// Maps a row from the `extras` table to an `Extra`.
fn row_to_extra(row: &rusqlite::Row) -> rusqlite::Result<Extra> {
    Ok(Extra {
        tag: row.get("tag")?,
        html: row.get("html")?,
    })
}

// ---------------------------------------------------------------------------
// Tag operations
// ---------------------------------------------------------------------------

impl Store {
    /// Returns every tag in the store, in no particular order.
    pub fn get_all_tags(&self) -> Result<Vec<Tag>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT tag, label, active, ref, type, html FROM tags")
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_all_tags".to_string(),
            })?;

        let rows = stmt
            .query_map([], row_to_tag)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query all tags: {e}"),
                operation: "get_all_tags".to_string(),
            })?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read tag row: {e}"),
                operation: "get_all_tags".to_string(),
            })?);
        }
        Ok(tags)
    }

    /// Retrieves a tag by its identifier, returning `None` if not found.
    pub fn get_tag(&self, tag_id: &str) -> Result<Option<Tag>> {
        self.conn()
            .query_row(
                "SELECT tag, label, active, ref, type, html FROM tags WHERE tag = ?1",
                params![tag_id],
                row_to_tag,
            )
            .optional()
            .map_err(|e| FolioError::Database {
                message: format!("failed to get tag: {e}"),
                operation: "get_tag".to_string(),
            })
    }

    /// Returns every chapter tag paired with its label name. Unsorted; the
    /// resolver orders by the numeric ref key.
    pub fn get_chapters(&self) -> Result<Vec<NamedTag>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT t.tag, t.ref, t.type, n.name
                 FROM tags t JOIN label_names n ON n.tag = t.tag
                 WHERE t.type = 'chapter'",
            )
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_chapters".to_string(),
            })?;

        let rows = stmt
            .query_map([], row_to_named_tag)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query chapters: {e}"),
                operation: "get_chapters".to_string(),
            })?;

        let mut chapters = Vec::new();
        for row in rows {
            chapters.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read chapter row: {e}"),
                operation: "get_chapters".to_string(),
            })?);
        }
        Ok(chapters)
    }

    /// Returns the section tags below `ref_prefix` with their label names.
    pub fn get_sections_under(&self, ref_prefix: &str) -> Result<Vec<NamedTag>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT t.tag, t.ref, t.type, n.name
                 FROM tags t JOIN label_names n ON n.tag = t.tag
                 WHERE t.type = 'section' AND t.ref LIKE ?1 || '.%'",
            )
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_sections_under".to_string(),
            })?;

        let rows = stmt
            .query_map(params![ref_prefix], row_to_named_tag)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query sections: {e}"),
                operation: "get_sections_under".to_string(),
            })?;

        let mut sections = Vec::new();
        for row in rows {
            sections.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read section row: {e}"),
                operation: "get_sections_under".to_string(),
            })?);
        }
        Ok(sections)
    }

    /// Returns all non-section tags below `ref_prefix`, in one round trip.
    ///
    /// The chapter-resolution path fetches the whole subtree here and groups
    /// by section in memory instead of issuing one query per section.
    pub fn get_descendant_tags(&self, ref_prefix: &str) -> Result<Vec<Tag>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT tag, label, active, ref, type, html
                 FROM tags
                 WHERE ref LIKE ?1 || '.%' AND COALESCE(type, '') <> 'section'",
            )
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_descendant_tags".to_string(),
            })?;

        let rows = stmt
            .query_map(params![ref_prefix], row_to_tag)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query descendant tags: {e}"),
                operation: "get_descendant_tags".to_string(),
            })?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read tag row: {e}"),
                operation: "get_descendant_tags".to_string(),
            })?);
        }
        Ok(tags)
    }

    /// Returns the tags whose ref is one of `refs`, each with its label name.
    /// Used to batch-fetch a breadcrumb in a single query.
    pub fn get_named_tags_by_refs(&self, refs: &[String]) -> Result<Vec<NamedTag>> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> =
            refs.iter().enumerate().map(|(i, _)| format!("?{}", i + 1)).collect();
        let sql = format!(
            "SELECT t.tag, t.ref, t.type, n.name
             FROM tags t JOIN label_names n ON n.tag = t.tag
             WHERE t.ref IN ({})",
            placeholders.join(", ")
        );

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql).map_err(|e| FolioError::Database {
            message: format!("failed to prepare query: {e}"),
            operation: "get_named_tags_by_refs".to_string(),
        })?;

        let param_values: Vec<&dyn rusqlite::types::ToSql> =
            refs.iter().map(|r| r as &dyn rusqlite::types::ToSql).collect();

        let rows = stmt
            .query_map(param_values.as_slice(), row_to_named_tag)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query tags by refs: {e}"),
                operation: "get_named_tags_by_refs".to_string(),
            })?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read tag row: {e}"),
                operation: "get_named_tags_by_refs".to_string(),
            })?);
        }
        Ok(tags)
    }
}

// ---------------------------------------------------------------------------
// Proof and extra operations
// ---------------------------------------------------------------------------

impl Store {
    /// Returns the proofs belonging to a tag, ordered by proof number.
    pub fn get_proofs(&self, tag_id: &str) -> Result<Vec<Proof>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT tag, html, number FROM proofs WHERE tag = ?1 ORDER BY number")
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_proofs".to_string(),
            })?;

        let rows = stmt
            .query_map(params![tag_id], row_to_proof)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query proofs: {e}"),
                operation: "get_proofs".to_string(),
            })?;

        let mut proofs = Vec::new();
        for row in rows {
            proofs.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read proof row: {e}"),
                operation: "get_proofs".to_string(),
            })?);
        }
        Ok(proofs)
    }

    /// Returns the supplementary content attached to a tag.
    pub fn get_extras(&self, tag_id: &str) -> Result<Vec<Extra>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT tag, html FROM extras WHERE tag = ?1")
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare query: {e}"),
                operation: "get_extras".to_string(),
            })?;

        let rows = stmt
            .query_map(params![tag_id], row_to_extra)
            .map_err(|e| FolioError::Database {
                message: format!("failed to query extras: {e}"),
                operation: "get_extras".to_string(),
            })?;

        let mut extras = Vec::new();
        for row in rows {
            extras.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read extra row: {e}"),
                operation: "get_extras".to_string(),
            })?);
        }
        Ok(extras)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

impl Store {
    /// Matches `query` against the full-text index, excluding the structural
    /// kinds (chapter, section, subsection), ordered by descending relevance.
    ///
    /// The query is run as a quoted FTS5 phrase so caller input cannot break
    /// the MATCH syntax.
    pub fn search_tags(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let fts_query = format!("\"{}\"", query.replace('"', "\"\""));

        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT t.tag, t.label, t.active, t.ref, t.type, t.html, rank
                 FROM tag_search
                 JOIN tags t ON t.tag = tag_search.tag
                 WHERE tag_search MATCH ?1
                   AND COALESCE(t.type, '') NOT IN ('chapter', 'section', 'subsection')
                 ORDER BY rank
                 LIMIT ?2",
            )
            .map_err(|e| FolioError::Database {
                message: format!("failed to prepare FTS query: {e}"),
                operation: "search_tags".to_string(),
            })?;

        let rows = stmt
            .query_map(params![fts_query, limit as i64], |row| {
                let tag = row_to_tag(row)?;
                let rank: f64 = row.get("rank")?;
                // FTS5 rank is negative (lower = better match). Convert to
                // positive score.
                Ok(SearchHit { tag, score: -rank })
            })
            .map_err(|e| FolioError::Database {
                message: format!("failed to execute FTS query: {e}"),
                operation: "search_tags".to_string(),
            })?;

        let mut hits = Vec::new();
        for row in rows {
            hits.push(row.map_err(|e| FolioError::Database {
                message: format!("failed to read search result: {e}"),
                operation: "search_tags".to_string(),
            })?);
        }
        Ok(hits)
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

impl Store {
    /// Returns aggregate counts for the store.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let count = |sql: &str, operation: &str| -> Result<u64> {
            self.conn()
                .query_row(sql, [], |row| row.get::<_, i64>(0))
                .map(|v| v as u64)
                .map_err(|e| FolioError::Database {
                    message: format!("failed to count rows: {e}"),
                    operation: operation.to_string(),
                })
        };

        let tag_count = count("SELECT COUNT(*) FROM tags", "get_stats")?;
        let chapter_count = count(
            "SELECT COUNT(*) FROM tags WHERE type = 'chapter'",
            "get_stats",
        )?;
        let proof_count = count("SELECT COUNT(*) FROM proofs", "get_stats")?;
        let db_size_bytes = self.size().unwrap_or(0);

        Ok(StoreStats {
            tag_count,
            chapter_count,
            proof_count,
            db_size_bytes,
        })
    }
}

use std::path::Path;

use crate::db::Store;
use crate::errors::{FolioError, Result};
use crate::refpath;
use crate::types::*;

/// Maximum number of hits returned by a full-text search.
const SEARCH_LIMIT: usize = 100;

/// Breadcrumbs only appear for tags at least this deep in the ref tree.
const BREADCRUMB_MIN_DEPTH: usize = 3;

/// Resolves tag identifiers into assembled view models ready for rendering
/// or serialization. All access to the reference store goes through here.
pub struct Resolver {
    store: Store,
}

impl Resolver {
    /// Opens the resolver over an existing store file.
    pub fn open(db_path: &Path) -> Result<Self> {
        let store = Store::open(db_path)?;
        Ok(Self { store })
    }

    /// Wraps an already-open store. Used by tests that build fixtures first.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns every tag in the store, in no particular order.
    pub fn all_tags(&self) -> Result<Vec<Tag>> {
        self.store.get_all_tags()
    }

    /// Returns all chapters with their display names, in document order.
    pub fn chapters(&self) -> Result<Vec<NamedTag>> {
        let mut chapters = self.store.get_chapters()?;
        chapters.sort_by_key(|c| refpath::sort_key(c.ref_str()));
        Ok(chapters)
    }

    /// Resolves a tag identifier into its detail view.
    ///
    /// Chapters resolve to an index of their sections; every other kind
    /// resolves to the statement with breadcrumb, proofs, and extras.
    /// Fails with `NotFound` if the identifier is absent from the store,
    /// and `BadRequest` if it is blank.
    pub fn resolve(&self, tag_id: &str) -> Result<TagPage> {
        if tag_id.trim().is_empty() {
            return Err(FolioError::BadRequest {
                message: "empty tag identifier".to_string(),
            });
        }

        let tag = self
            .store
            .get_tag(tag_id)?
            .ok_or_else(|| FolioError::NotFound {
                tag: tag_id.to_string(),
            })?;

        if tag.is_chapter() {
            Ok(TagPage::Chapter(self.resolve_chapter(tag)?))
        } else {
            Ok(TagPage::Tag(self.resolve_content(tag)?))
        }
    }

    /// Assembles the section index for a chapter.
    ///
    /// Fetches the chapter's whole subtree in two queries (sections, then all
    /// other descendants) and groups tags under their sections in memory, so
    /// the number of round trips stays constant in the number of sections.
    fn resolve_chapter(&self, chapter: Tag) -> Result<ChapterView> {
        let chapter_ref = chapter.ref_str().to_string();

        let mut sections: Vec<NamedTag> = self
            .store
            .get_sections_under(&chapter_ref)?
            .into_iter()
            .filter(|s| refpath::is_direct_child(&chapter_ref, s.ref_str()))
            .collect();
        sections.sort_by_key(|s| refpath::sort_key(s.ref_str()));

        let mut tags = self.store.get_descendant_tags(&chapter_ref)?;
        tags.sort_by_key(|t| refpath::sort_key(t.ref_str()));

        let sections = sections
            .into_iter()
            .map(|section| {
                let owned = tags
                    .iter()
                    .filter(|t| refpath::is_direct_child(section.ref_str(), t.ref_str()))
                    .cloned()
                    .collect();
                SectionView {
                    section,
                    tags: owned,
                }
            })
            .collect();

        Ok(ChapterView { chapter, sections })
    }

    /// Assembles the content view for a non-chapter tag.
    fn resolve_content(&self, tag: Tag) -> Result<TagView> {
        let breadcrumb = self.breadcrumb_for(tag.ref_str())?;
        let proofs = self.store.get_proofs(&tag.tag)?;
        let extras = self.store.get_extras(&tag.tag)?;

        Ok(TagView {
            tag,
            breadcrumb,
            proofs,
            extras,
        })
    }

    /// Computes the breadcrumb trail for a ref, root to immediate parent.
    ///
    /// Only tags at least three components deep get one; anything shallower
    /// yields an empty trail. The ancestors are fetched with their label
    /// names in a single batch query.
    fn breadcrumb_for(&self, ref_str: &str) -> Result<Vec<NamedTag>> {
        if refpath::depth(ref_str) < BREADCRUMB_MIN_DEPTH {
            return Ok(Vec::new());
        }

        let ancestors = refpath::ancestor_refs(ref_str);
        let mut crumbs = self.store.get_named_tags_by_refs(&ancestors)?;
        crumbs.sort_by_key(|c| refpath::sort_key(c.ref_str()));
        Ok(crumbs)
    }

    /// Full-text search over tag statements and proofs.
    ///
    /// Structural kinds (chapter, section, subsection) are excluded and hits
    /// come back in descending relevance order. A blank query matches
    /// nothing.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store.search_tags(query, SEARCH_LIMIT)
    }

    /// Returns aggregate counts for the store.
    pub fn stats(&self) -> Result<StoreStats> {
        self.store.get_stats()
    }
}

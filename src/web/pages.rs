//! HTML page templates.
//!
//! Statement bodies come out of the store pre-rendered (MathJax-ready HTML
//! from the build pipeline), so they are the only values emitted with the
//! `safe` filter; everything else is escaped.

use askama::Template;

use crate::types::*;

/// The all-tags listing page.
#[derive(Template)]
#[template(path = "show_tags.html")]
pub struct TagsPage {
    pub title: String,
    pub tags: Vec<Tag>,
}

/// The chapter detail page: an index of the chapter's sections.
#[derive(Template)]
#[template(path = "show_chapter.html")]
pub struct ChapterPage {
    pub title: String,
    pub chapter: Tag,
    pub sections: Vec<SectionView>,
}

/// The tag detail page: statement, breadcrumb, proofs, extras.
#[derive(Template)]
#[template(path = "show_tag.html")]
pub struct TagPageHtml {
    pub title: String,
    pub tag: Tag,
    pub breadcrumb: Vec<NamedTag>,
    pub proofs: Vec<Proof>,
    pub extras: Vec<Extra>,
}

/// The chapter listing page.
#[derive(Template)]
#[template(path = "show_chapters.html")]
pub struct ChaptersPage {
    pub title: String,
    pub chapters: Vec<NamedTag>,
}

/// The search results page.
#[derive(Template)]
#[template(path = "show_search.html")]
pub struct SearchPage {
    pub title: String,
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// The 404 page.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub title: String,
}

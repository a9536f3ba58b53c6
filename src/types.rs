use serde::{Serialize, Serializer};

/// Kinds of tags in the reference database.
///
/// The build pipeline stores free-form type strings; the structural kinds
/// (chapter, section, subsection) drive view assembly, the rest are display
/// labels. Unrecognized strings pass through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    Chapter,
    Section,
    Subsection,
    Theorem,
    Lemma,
    Proposition,
    Definition,
    Example,
    Exercise,
    Remark,
    Equation,
    Item,
    Other(String),
}

impl TagKind {
    /// Returns the string representation of this tag kind.
    pub fn as_str(&self) -> &str {
        match self {
            TagKind::Chapter => "chapter",
            TagKind::Section => "section",
            TagKind::Subsection => "subsection",
            TagKind::Theorem => "theorem",
            TagKind::Lemma => "lemma",
            TagKind::Proposition => "proposition",
            TagKind::Definition => "definition",
            TagKind::Example => "example",
            TagKind::Exercise => "exercise",
            TagKind::Remark => "remark",
            TagKind::Equation => "equation",
            TagKind::Item => "item",
            TagKind::Other(s) => s,
        }
    }

    /// Parses a string into a `TagKind`. Never fails; unknown values become
    /// `Other` so they survive a round trip through the store.
    pub fn parse(s: &str) -> TagKind {
        match s {
            "chapter" => TagKind::Chapter,
            "section" => TagKind::Section,
            "subsection" => TagKind::Subsection,
            "theorem" => TagKind::Theorem,
            "lemma" => TagKind::Lemma,
            "proposition" => TagKind::Proposition,
            "definition" => TagKind::Definition,
            "example" => TagKind::Example,
            "exercise" => TagKind::Exercise,
            "remark" => TagKind::Remark,
            "equation" => TagKind::Equation,
            "item" => TagKind::Item,
            other => TagKind::Other(other.to_string()),
        }
    }

    /// Returns true for the container kinds that structure the document
    /// rather than carry statements.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TagKind::Chapter | TagKind::Section | TagKind::Subsection
        )
    }
}

impl Serialize for TagKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An addressable unit of reference content: a chapter, section, theorem,
/// definition, and so on. `tag` is the sole external identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub tag: String,
    pub label: Option<String>,
    pub active: Option<bool>,
    #[serde(rename = "ref")]
    pub ref_: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TagKind>,
    pub html: Option<String>,
}

impl Tag {
    /// Returns the reference path, or "" when the tag has none.
    pub fn ref_str(&self) -> &str {
        self.ref_.as_deref().unwrap_or("")
    }

    /// Returns true if this tag is a chapter.
    pub fn is_chapter(&self) -> bool {
        self.kind == Some(TagKind::Chapter)
    }
}

/// A proof body attached to a tag. `number` orders multiple proofs of the
/// same statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proof {
    pub tag: String,
    pub html: Option<String>,
    pub number: i64,
}

/// Supplementary HTML content attached to a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extra {
    pub tag: String,
    pub html: Option<String>,
}

/// A tag joined with its human-readable label name, as used for chapter
/// listings, section headers, and breadcrumbs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTag {
    pub tag: String,
    #[serde(rename = "ref")]
    pub ref_: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TagKind>,
    pub name: String,
}

impl NamedTag {
    pub fn ref_str(&self) -> &str {
        self.ref_.as_deref().unwrap_or("")
    }
}

/// A full-text search result pairing a tag with its relevance score.
/// Higher scores are better matches.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub tag: Tag,
    pub score: f64,
}

/// A section of a chapter together with the tags it owns.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub section: NamedTag,
    pub tags: Vec<Tag>,
}

/// Assembled detail view for a chapter: an index of its sections.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterView {
    pub chapter: Tag,
    pub sections: Vec<SectionView>,
}

/// Assembled detail view for a non-chapter tag: the statement plus its
/// navigational context and proofs.
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub tag: Tag,
    pub breadcrumb: Vec<NamedTag>,
    pub proofs: Vec<Proof>,
    pub extras: Vec<Extra>,
}

/// Result of resolving a tag identifier; chapters render as an index of
/// their sections, everything else as a content page.
#[derive(Debug, Clone)]
pub enum TagPage {
    Chapter(ChapterView),
    Tag(TagView),
}

/// The flat record served for every kind of node on the JSON API, whichever
/// query path produced it. Each field may independently be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSummary {
    pub tag: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "ref")]
    pub ref_: Option<String>,
    pub html: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<&Tag> for TagSummary {
    fn from(t: &Tag) -> Self {
        TagSummary {
            tag: Some(t.tag.clone()),
            name: None,
            ref_: t.ref_.clone(),
            html: t.html.clone(),
            kind: t.kind.as_ref().map(|k| k.as_str().to_string()),
        }
    }
}

impl From<&NamedTag> for TagSummary {
    fn from(t: &NamedTag) -> Self {
        TagSummary {
            tag: Some(t.tag.clone()),
            name: Some(t.name.clone()),
            ref_: t.ref_.clone(),
            html: None,
            kind: t.kind.as_ref().map(|k| k.as_str().to_string()),
        }
    }
}

impl From<&Proof> for TagSummary {
    fn from(p: &Proof) -> Self {
        TagSummary {
            tag: Some(p.tag.clone()),
            name: None,
            ref_: None,
            html: p.html.clone(),
            kind: None,
        }
    }
}

impl From<&SearchHit> for TagSummary {
    fn from(hit: &SearchHit) -> Self {
        TagSummary::from(&hit.tag)
    }
}

/// Aggregate statistics about the reference store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub tag_count: u64,
    pub chapter_count: u64,
    pub proof_count: u64,
    pub db_size_bytes: u64,
}

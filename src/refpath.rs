//! Ordering and ancestry for dotted hierarchical reference paths.
//!
//! A tag's `ref` encodes its position in the document tree as dot-separated
//! integers ("3.2.1"). Components compare numerically, not lexicographically,
//! so "10.2" sorts after "9.3".

/// Returns the canonical sort key for a reference path.
///
/// Splits on "." and parses each component as an integer. The resulting
/// vector compares the way document order does. The build pipeline only
/// emits numeric components; anything else sorts as zero.
pub fn sort_key(r: &str) -> Vec<u64> {
    if r.is_empty() {
        return Vec::new();
    }
    r.split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Returns the number of dot-separated components in a reference path.
pub fn depth(r: &str) -> usize {
    if r.is_empty() {
        0
    } else {
        r.split('.').count()
    }
}

/// Returns the ancestor refs of `r`, from immediate parent up to the root.
///
/// For "1.2.3" this is `["1.2", "1"]`. The path itself is not included;
/// a single-component ref has no ancestors.
pub fn ancestor_refs(r: &str) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut current = r;
    while let Some(pos) = current.rfind('.') {
        current = &current[..pos];
        ancestors.push(current.to_string());
    }
    ancestors
}

/// Returns true if `child` is exactly one level below `parent`.
///
/// "1.2" is a direct child of "1"; "1.2.3" is not.
pub fn is_direct_child(parent: &str, child: &str) -> bool {
    match child.strip_prefix(parent) {
        Some(rest) => {
            let mut chars = rest.chars();
            chars.next() == Some('.') && !chars.as_str().contains('.') && !chars.as_str().is_empty()
        }
        None => false,
    }
}

/// Returns true if `descendant` lies anywhere below `ancestor` in the tree.
pub fn is_descendant(ancestor: &str, descendant: &str) -> bool {
    descendant
        .strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('.'))
}

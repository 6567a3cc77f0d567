//! helpers over navigable paths handed to the router. a path is a list of
//! `/` separated segments; item leaves carry an `asset_` marker in their
//! final segment.

pub const SEPARATOR: char = '/';
pub const ASSET_MARKER: &str = "asset_";

pub fn last_segment(path: &str) -> &str {
    match path.rsplit_once(SEPARATOR) {
        Some((_, last)) => last,
        None => path
    }
}

/// the given path without its final segment. the root path is its own
/// parent.
pub fn parent(path: &str) -> &str {
    match path.rsplit_once(SEPARATOR) {
        Some(("", _)) => "/",
        Some((rest, _)) => rest,
        None => path
    }
}

/// true when the final segment of the path addresses an item leaf rather
/// than a folder listing
pub fn is_asset_leaf(path: &str) -> bool {
    last_segment(path).contains(ASSET_MARKER)
}

pub fn join<S>(base: &str, segment: S) -> String
where
    S: AsRef<str>
{
    let trimmed = base.trim_end_matches(SEPARATOR);

    format!("{}{}{}", trimmed, SEPARATOR, segment.as_ref())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn last_segment_splits_on_separator() {
        assert_eq!(last_segment("/drives/d1/folder"), "folder");
        assert_eq!(last_segment("folder"), "folder");
    }

    #[test]
    fn parent_drops_final_segment() {
        assert_eq!(parent("/drives/d1/folder"), "/drives/d1");
        assert_eq!(parent("/folder"), "/");
        assert_eq!(parent("folder"), "folder");
    }

    #[test]
    fn asset_leaf_detection() {
        assert!(is_asset_leaf("/drives/d1/asset_abc"));
        assert!(!is_asset_leaf("/drives/asset_parent/folder"));
        assert!(!is_asset_leaf("/drives/d1/folder"));
    }

    #[test]
    fn join_avoids_doubled_separator() {
        assert_eq!(join("/drives/d1/", "folder"), "/drives/d1/folder");
        assert_eq!(join("/drives/d1", "folder"), "/drives/d1/folder");
    }
}

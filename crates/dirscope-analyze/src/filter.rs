//! Name / depth visibility filter over a scanned tree.
//!
//! A node *matches* when it satisfies every active predicate itself. It is
//! *visible* when it matches, or when it is a directory with at least one
//! visible descendant, so ancestors of a hit always stay on screen.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use dirscope_core::Node;

/// Filter settings. The default filter shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
pub struct NodeFilter {
    /// Case-insensitive substring the node name must contain.
    #[serde(default)]
    pub name_contains: Option<String>,

    /// Deepest level a node may sit at to match.
    #[serde(default)]
    pub max_depth: Option<u32>,
}

impl NodeFilter {
    /// Create a new filter builder.
    pub fn builder() -> NodeFilterBuilder {
        NodeFilterBuilder::default()
    }

    /// Check whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.max_depth.is_none()
    }

    /// Clear every predicate, restoring full visibility.
    pub fn reset(&mut self) {
        self.name_contains = None;
        self.max_depth = None;
    }

    fn needle(&self) -> Option<String> {
        self.name_contains
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    /// Check whether `node` itself satisfies both predicates.
    pub fn matches(&self, node: &Node) -> bool {
        self.matches_with(node, self.needle().as_deref())
    }

    fn matches_with(&self, node: &Node, needle: Option<&str>) -> bool {
        if let Some(max) = self.max_depth {
            if node.level > max {
                return false;
            }
        }
        match needle {
            Some(needle) => node.name.to_lowercase().contains(needle),
            None => true,
        }
    }

    /// Check whether `node` should be shown.
    pub fn is_visible(&self, node: &Node) -> bool {
        self.visible_with(node, self.needle().as_deref())
    }

    fn visible_with(&self, node: &Node, needle: Option<&str>) -> bool {
        self.matches_with(node, needle)
            || (node.is_dir()
                && node
                    .children
                    .iter()
                    .any(|child| self.visible_with(child, needle)))
    }

    /// Pre-order list of the visible nodes under (and including) `root`.
    pub fn visible_nodes<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        let needle = self.needle();
        let mut out = Vec::new();
        self.collect_visible(root, needle.as_deref(), &mut out);
        out
    }

    /// Returns whether `node` was visible.
    fn collect_visible<'a>(
        &self,
        node: &'a Node,
        needle: Option<&str>,
        out: &mut Vec<&'a Node>,
    ) -> bool {
        let slot = out.len();
        out.push(node);

        let mut any_child = false;
        for child in &node.children {
            any_child |= self.collect_visible(child, needle, out);
        }

        let visible = any_child || self.matches_with(node, needle);
        if !visible {
            // Nothing below was visible either, so only `node` was pushed.
            out.truncate(slot);
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let mut root = Node::new_directory("/home", 0);
        let mut music = Node::new_directory("/home/Music", 1);
        let mut live = Node::new_directory("/home/Music/live", 2);
        live.push_child(Node::new_file("/home/Music/live/Encore.flac", 900, 3));
        music.push_child(live);
        music.push_child(Node::new_file("/home/Music/intro.mp3", 100, 2));
        root.push_child(music);
        root.push_child(Node::new_file("/home/notes.txt", 10, 1));
        root
    }

    fn names<'a>(nodes: &[&'a Node]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let root = tree();
        let filter = NodeFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.visible_nodes(&root).len(), root.walk().count());
    }

    #[test]
    fn test_name_match_keeps_ancestors() {
        let root = tree();
        let filter = NodeFilter::builder().name_contains("ENCORE").build().unwrap();

        assert!(!filter.matches(&root));
        assert!(filter.is_visible(&root));
        assert_eq!(
            names(&filter.visible_nodes(&root)),
            vec!["home", "Music", "live", "Encore.flac"]
        );
    }

    #[test]
    fn test_depth_limit() {
        let root = tree();
        let filter = NodeFilter::builder().max_depth(1u32).build().unwrap();
        assert_eq!(
            names(&filter.visible_nodes(&root)),
            vec!["home", "Music", "notes.txt"]
        );
    }

    #[test]
    fn test_both_predicates_must_hold() {
        let root = tree();
        // "encore" only exists at level 3, beyond the depth limit.
        let filter = NodeFilter::builder()
            .name_contains("encore")
            .max_depth(2u32)
            .build()
            .unwrap();
        assert!(!filter.is_visible(&root));
        assert!(filter.visible_nodes(&root).is_empty());
    }

    #[test]
    fn test_file_never_inherits_visibility() {
        let root = tree();
        let filter = NodeFilter::builder().name_contains("intro").build().unwrap();
        let visible = names(&filter.visible_nodes(&root));
        assert!(visible.contains(&"intro.mp3"));
        assert!(!visible.contains(&"notes.txt"));
        assert!(!visible.contains(&"live"));
    }

    #[test]
    fn test_blank_needle_is_ignored_and_reset_restores() {
        let root = tree();
        let mut filter = NodeFilter::builder().name_contains("   ").build().unwrap();
        assert!(filter.is_empty());

        filter.max_depth = Some(0);
        assert_eq!(filter.visible_nodes(&root).len(), 1);
        filter.reset();
        assert_eq!(filter.visible_nodes(&root).len(), root.walk().count());
    }
}

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

/// A single comment as the walker sees it. `reply_ids` is ordered and may
/// contain identifiers that resolve to nothing; those are skipped.
#[derive(Debug, Clone)]
pub struct CommentNode {
    pub id: i32,
    pub author_id: i32,
    pub content: String,
    pub commented_date: NaiveDateTime,
    pub reply_ids: Vec<i32>,
    pub upvote_count: i32,
}

/// An in-memory snapshot of comment subtrees, keyed by comment id. All
/// traversals are iterative (explicit worklist + visited set), so a
/// pathologically deep reply chain costs heap instead of call stack, and a
/// corrupt cyclic snapshot cannot wedge the walk.
#[derive(Debug, Default)]
pub struct CommentForest {
    nodes: HashMap<i32, CommentNode>,
}

impl CommentForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = CommentNode>) -> Self {
        let mut forest = Self::new();
        forest.extend(nodes);
        forest
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = CommentNode>) {
        for node in nodes {
            self.nodes.insert(node.id, node);
        }
    }

    pub fn get(&self, id: i32) -> Option<&CommentNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of comments reachable from `roots`, each counted once.
    /// Unresolvable identifiers contribute nothing.
    pub fn count(&self, roots: &[i32]) -> usize {
        self.walk(roots).count()
    }

    /// The reachable comment with the latest `commented_date`, or `None` for
    /// an empty/unresolvable subtree. On equal timestamps the lower id wins.
    pub fn most_recent(&self, roots: &[i32]) -> Option<&CommentNode> {
        self.walk(roots).fold(None, |best: Option<&CommentNode>, node| {
            match best {
                Some(b)
                    if node.commented_date > b.commented_date
                        || (node.commented_date == b.commented_date && node.id < b.id) =>
                {
                    Some(node)
                }
                None => Some(node),
                _ => best,
            }
        })
    }

    /// Whether any reachable comment's cleaned content contains the cleaned
    /// `term` as a substring. Short-circuits on the first match.
    pub fn contains_term(&self, roots: &[i32], term: &str) -> bool {
        let term = clean_string(term);
        self.walk(roots)
            .any(|node| clean_string(&node.content).contains(&term))
    }

    /// Every reachable comment id, for cascading deletion of a subtree.
    pub fn collect_ids(&self, roots: &[i32]) -> Vec<i32> {
        self.walk(roots).map(|node| node.id).collect()
    }

    fn walk<'a>(&'a self, roots: &[i32]) -> Walk<'a> {
        let mut stack = roots.to_vec();
        stack.reverse();
        Walk {
            forest: self,
            stack,
            visited: HashSet::new(),
        }
    }
}

/// Depth-first traversal in child-list order.
struct Walk<'a> {
    forest: &'a CommentForest,
    stack: Vec<i32>,
    visited: HashSet<i32>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a CommentNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }

            // Dangling reference: treated as an empty subtree by policy.
            let Some(node) = self.forest.get(id) else {
                continue;
            };

            for reply_id in node.reply_ids.iter().rev() {
                self.stack.push(*reply_id);
            }

            return Some(node);
        }

        None
    }
}

/// Strips all whitespace and case-folds, matching how both post text and
/// search terms are normalized before substring comparison.
pub fn clean_string(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn mock_node(id: i32, days_ago: i64, content: &str, reply_ids: &[i32]) -> CommentNode {
        CommentNode {
            id,
            author_id: 1,
            content: content.to_string(),
            commented_date: NaiveDate::from_ymd_opt(2023, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                - chrono::Duration::try_days(days_ago).unwrap(),
            reply_ids: reply_ids.to_vec(),
            upvote_count: 0,
        }
    }

    // 1 ── 2 ── 4
    //  │    └── 5
    //  └── 3
    // 6 (second root)
    fn sample_forest() -> CommentForest {
        CommentForest::from_nodes([
            mock_node(1, 10, "root one", &[2, 3]),
            mock_node(2, 8, "first reply", &[4, 5]),
            mock_node(3, 9, "second reply", &[]),
            mock_node(4, 2, "deep reply", &[]),
            mock_node(5, 1, "deepest by date", &[]),
            mock_node(6, 7, "root two", &[]),
        ])
    }

    #[test]
    fn count_covers_the_whole_subtree() {
        let forest = sample_forest();
        assert_eq!(forest.count(&[1, 6]), 6);
        assert_eq!(forest.count(&[1]), 5);
        assert_eq!(forest.count(&[2]), 3);
    }

    #[test]
    fn count_of_a_leaf_is_one() {
        let forest = sample_forest();
        assert_eq!(forest.count(&[4]), 1);
    }

    #[test]
    fn empty_roots_give_empty_answers() {
        let forest = sample_forest();
        assert_eq!(forest.count(&[]), 0);
        assert!(forest.most_recent(&[]).is_none());
        assert!(!forest.contains_term(&[], "anything"));
    }

    #[test]
    fn dangling_references_are_skipped() {
        let forest = CommentForest::from_nodes([mock_node(1, 5, "only child", &[99, 100])]);
        assert_eq!(forest.count(&[1]), 1);
        assert_eq!(forest.count(&[42]), 0);
        assert!(forest.most_recent(&[42]).is_none());
    }

    #[test]
    fn most_recent_finds_the_newest_leaf() {
        let forest = sample_forest();
        assert_eq!(forest.most_recent(&[1, 6]).unwrap().id, 5);
        // Restricting the roots restricts the answer
        assert_eq!(forest.most_recent(&[3, 6]).unwrap().id, 6);
    }

    #[test]
    fn most_recent_tie_breaks_on_lower_id() {
        let forest = CommentForest::from_nodes([
            mock_node(7, 3, "same instant", &[]),
            mock_node(2, 3, "same instant", &[]),
            mock_node(5, 3, "same instant", &[]),
        ]);
        assert_eq!(forest.most_recent(&[7, 2, 5]).unwrap().id, 2);
    }

    #[test]
    fn cyclic_snapshot_terminates() {
        let forest = CommentForest::from_nodes([
            mock_node(1, 2, "a", &[2]),
            mock_node(2, 1, "b", &[1]),
        ]);
        assert_eq!(forest.count(&[1]), 2);
    }

    #[test]
    fn term_matching_ignores_whitespace_and_case() {
        let forest = CommentForest::from_nodes([
            mock_node(1, 5, "nothing to see", &[2]),
            mock_node(2, 4, "You're breathtaking!", &[]),
        ]);
        assert!(forest.contains_term(&[1], "breathtaking"));
        assert!(forest.contains_term(&[1], "BREATH TAKING"));
        assert!(forest.contains_term(&[1], "you're breath"));
        assert!(!forest.contains_term(&[1], "unrelated"));
        // The term only appears in the reply, not the root
        assert!(!forest.contains_term(&[2], "nothing"));
    }

    #[test]
    fn clean_string_strips_whitespace_and_folds_case() {
        assert_eq!(clean_string("You're breathtaking!"), "you'rebreathtaking!");
        assert_eq!(clean_string("  A \t B\nC  "), "abc");
        assert_eq!(clean_string(""), "");
    }

    #[test]
    fn collect_ids_returns_every_reachable_node_once() {
        let forest = sample_forest();
        let mut ids = forest.collect_ids(&[1]);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn deep_chain_does_not_overflow_the_stack() {
        let mut nodes = Vec::new();
        for id in 0..100_000 {
            let replies = if id + 1 < 100_000 { vec![id + 1] } else { vec![] };
            nodes.push(mock_node(id, 0, "deep", &replies));
        }
        let forest = CommentForest::from_nodes(nodes);
        assert_eq!(forest.count(&[0]), 100_000);
    }
}

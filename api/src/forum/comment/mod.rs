pub mod create;
pub mod delete;
pub mod get;
pub mod patch;

use std::collections::HashSet;

use serde::Serialize;

use super::tree::CommentForest;

// The nested model that will be returned to the client
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentTree {
    pub id: i32,
    pub author_id: i32,
    pub content: String,
    pub commented_date: chrono::NaiveDateTime,
    pub upvote_count: i32,
    pub children: Vec<CommentTree>,
}

/// Nests a forest snapshot into the client shape, children newest-first at
/// every level. Dangling ids produce no entry.
pub fn build_comment_tree(forest: &CommentForest, roots: &[i32]) -> Vec<CommentTree> {
    let mut visited = HashSet::new();
    build_level(forest, roots, &mut visited)
}

fn build_level(
    forest: &CommentForest,
    roots: &[i32],
    visited: &mut HashSet<i32>,
) -> Vec<CommentTree> {
    let mut level: Vec<CommentTree> = roots
        .iter()
        .filter_map(|id| {
            if !visited.insert(*id) {
                return None;
            }
            let node = forest.get(*id)?;
            Some(CommentTree {
                id: node.id,
                author_id: node.author_id,
                content: node.content.clone(),
                commented_date: node.commented_date,
                upvote_count: node.upvote_count,
                children: build_level(forest, &node.reply_ids, visited),
            })
        })
        .collect();

    level.sort_by(|a, b| {
        b.commented_date
            .cmp(&a.commented_date)
            .then(b.id.cmp(&a.id))
    });

    level
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::forum::tree::CommentNode;
    use chrono::NaiveDate;

    fn mock_node(id: i32, days_ago: i64, reply_ids: &[i32]) -> CommentNode {
        CommentNode {
            id,
            author_id: 1,
            content: format!("Content for comment {}", id),
            commented_date: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                - chrono::Duration::try_days(days_ago).unwrap(),
            reply_ids: reply_ids.to_vec(),
            upvote_count: 0,
        }
    }

    #[test]
    fn build_with_no_comments() {
        let forest = CommentForest::new();
        assert!(build_comment_tree(&forest, &[]).is_empty());
        assert!(build_comment_tree(&forest, &[1, 2]).is_empty());
    }

    #[test]
    fn build_nests_replies_under_their_parent() {
        let forest = CommentForest::from_nodes([
            mock_node(1, 5, &[2, 3]),
            mock_node(2, 4, &[]),
            mock_node(3, 3, &[]),
        ]);

        let tree = build_comment_tree(&forest, &[1]);
        assert_eq!(tree.len(), 1, "Expected one root comment");
        assert_eq!(tree[0].children.len(), 2, "Expected two children");
    }

    #[test]
    fn children_are_sorted_newest_first() {
        let forest = CommentForest::from_nodes([
            mock_node(1, 10, &[2, 3]),
            mock_node(2, 5, &[]), // older reply
            mock_node(3, 4, &[]), // newer reply
        ]);

        let tree = build_comment_tree(&forest, &[1]);
        assert_eq!(
            tree[0].children[0].id, 3,
            "Newer reply should come first"
        );
    }

    #[test]
    fn dangling_children_are_omitted() {
        let forest = CommentForest::from_nodes([mock_node(1, 2, &[404])]);

        let tree = build_comment_tree(&forest, &[1]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }
}

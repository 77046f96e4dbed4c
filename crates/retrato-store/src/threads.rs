//! Read-time reconstruction of a post's comment forest.
//!
//! Comments are stored flat with an optional `parent_id` link; the nested
//! view the comment list renders is rebuilt on demand from those links in a
//! single pass over the slice.  Nothing nested is ever stored or mutated.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::Comment;

/// One node of the rebuilt forest: a comment and its direct replies.  Every
/// level keeps the original insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}

/// Rebuild the reply forest from one post's flat comment slice.
///
/// Roots are comments without a `parent_id`.  A comment whose parent id
/// does not occur in the slice (the parent was never created, or belongs
/// to a different post) is treated as a root rather than dropped.
pub fn build_comment_threads(comments: &[Comment]) -> Vec<CommentThread> {
    let known: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();

    let mut children: HashMap<Uuid, Vec<&Comment>> = HashMap::new();
    let mut roots: Vec<&Comment> = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if parent != comment.id && known.contains(&parent) => {
                children.entry(parent).or_default().push(comment);
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|comment| build_node(comment, &children))
        .collect()
}

fn build_node(comment: &Comment, children: &HashMap<Uuid, Vec<&Comment>>) -> CommentThread {
    let replies = children
        .get(&comment.id)
        .map(|replies| {
            replies
                .iter()
                .map(|reply| build_node(reply, children))
                .collect()
        })
        .unwrap_or_default();

    CommentThread {
        comment: comment.clone(),
        replies,
    }
}

/// Flatten a forest into depth-first display order, each comment paired
/// with its nesting depth.  This is the order (and indent level) an
/// indented comment list renders.
pub fn flatten_threads(threads: &[CommentThread]) -> Vec<(usize, &Comment)> {
    let mut out = Vec::new();
    for node in threads {
        push_node(node, 0, &mut out);
    }
    out
}

fn push_node<'a>(node: &'a CommentThread, depth: usize, out: &mut Vec<(usize, &'a Comment)>) {
    out.push((depth, &node.comment));
    for reply in &node.replies {
        push_node(reply, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: u128, parent: Option<u128>) -> Comment {
        let now = Utc::now();
        Comment {
            id: Uuid::from_u128(id),
            post_id: Uuid::from_u128(999),
            author_id: Uuid::from_u128(1000 + id),
            content: format!("comment {id}"),
            liked_by: Vec::new(),
            parent_id: parent.map(Uuid::from_u128),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn chain_reconstructs_to_a_single_spine() {
        let comments = vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))];

        let forest = build_comment_threads(&comments);
        assert_eq!(forest.len(), 1);

        let root = &forest[0];
        assert_eq!(root.comment.id, Uuid::from_u128(1));
        assert_eq!(root.replies.len(), 1);
        assert_eq!(root.replies[0].comment.id, Uuid::from_u128(2));
        assert_eq!(root.replies[0].replies.len(), 1);
        assert_eq!(root.replies[0].replies[0].comment.id, Uuid::from_u128(3));
        assert!(root.replies[0].replies[0].replies.is_empty());
    }

    #[test]
    fn dangling_parent_becomes_a_root() {
        let comments = vec![comment(1, None), comment(2, Some(99))];

        let forest = build_comment_threads(&comments);
        let roots: Vec<Uuid> = forest.iter().map(|t| t.comment.id).collect();
        assert_eq!(roots, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
        assert!(forest[1].replies.is_empty());
    }

    #[test]
    fn each_level_preserves_insertion_order() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(1)),
            comment(4, None),
        ];

        let forest = build_comment_threads(&comments);
        let roots: Vec<Uuid> = forest.iter().map(|t| t.comment.id).collect();
        assert_eq!(roots, vec![Uuid::from_u128(1), Uuid::from_u128(4)]);

        let replies: Vec<Uuid> = forest[0].replies.iter().map(|t| t.comment.id).collect();
        assert_eq!(replies, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
    }

    #[test]
    fn flatten_walks_depth_first_with_depths() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, Some(1)),
            comment(5, None),
        ];

        let forest = build_comment_threads(&comments);
        let flat: Vec<(usize, u128)> = flatten_threads(&forest)
            .into_iter()
            .map(|(depth, c)| (depth, c.id.as_u128()))
            .collect();

        assert_eq!(flat, vec![(0, 1), (1, 2), (2, 3), (1, 4), (0, 5)]);
    }
}

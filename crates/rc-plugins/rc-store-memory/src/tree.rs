//! Depth-first walks over a comment forest.
//!
//! Every walk visits nodes in forest order: a node, then its replies, then
//! its next sibling. Ids are unique, so the first match is the only match.
//! Walks keep their own stack, so a long reply chain never grows the call
//! stack.

use rc_core::models::Comment;
use uuid::Uuid;

/// Sibling indices leading from the root list to `id`. The path length is
/// the node's depth, root comments being at depth 1.
pub(crate) fn path_to(comments: &[Comment], id: Uuid) -> Option<Vec<usize>> {
    let mut stack: Vec<(&[Comment], usize)> = vec![(comments, 0)];
    while let Some(&(list, index)) = stack.last() {
        match list.get(index) {
            Some(comment) if comment.id == id => {
                return Some(stack.iter().map(|&(_, i)| i).collect());
            }
            Some(comment) => stack.push((comment.replies.as_slice(), 0)),
            None => {
                stack.pop();
                if let Some((_, parent_index)) = stack.last_mut() {
                    *parent_index += 1;
                }
            }
        }
    }
    None
}

pub(crate) fn node_at<'a>(comments: &'a mut [Comment], path: &[usize]) -> Option<&'a mut Comment> {
    let (&first, rest) = path.split_first()?;
    let mut node = comments.get_mut(first)?;
    for &index in rest {
        node = node.replies.get_mut(index)?;
    }
    Some(node)
}

pub(crate) fn find_mut(comments: &mut [Comment], id: Uuid) -> Option<&mut Comment> {
    let path = path_to(comments, id)?;
    node_at(comments, &path)
}

/// Detaches the node and its whole subtree from whichever list holds it.
pub(crate) fn remove(comments: &mut Vec<Comment>, id: Uuid) -> Option<Comment> {
    let path = path_to(comments, id)?;
    let (&last, parents) = path.split_last()?;
    let list = if parents.is_empty() {
        comments
    } else {
        &mut node_at(comments, parents)?.replies
    };
    Some(list.remove(last))
}

/// Appends clones of every node whose parent is `parent_id`.
pub(crate) fn collect_by_parent(comments: &[Comment], parent_id: Uuid, out: &mut Vec<Comment>) {
    let mut stack = vec![comments.iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(comment) => {
                if comment.parent_comment_id == Some(parent_id) {
                    out.push(comment.clone());
                }
                stack.push(comment.replies.iter());
            }
            None => {
                stack.pop();
            }
        }
    }
}

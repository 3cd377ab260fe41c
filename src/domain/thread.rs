//! Depth-first layout of a topic's reply tree.

use std::collections::{HashMap, HashSet};

use crate::domain::post::Post;
use crate::domain::types::PostId;

/// A post positioned in the rendered thread.
#[derive(Debug, Clone)]
pub struct ThreadedPost {
    pub post: Post,
    /// 0 for top-level posts, +1 per reply level.
    pub depth: usize,
}

/// Orders `posts` depth-first: every post is followed by its replies before
/// its next sibling. Siblings keep chronological order (`created_at`, then
/// id). Posts whose parent is not part of `posts` are laid out as roots.
pub fn layout_thread(mut posts: Vec<Post>) -> Vec<ThreadedPost> {
    posts.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let known: HashSet<PostId> = posts.iter().map(|p| p.id).collect();
    let mut roots: Vec<Post> = Vec::new();
    let mut children: HashMap<PostId, Vec<Post>> = HashMap::new();
    for post in posts {
        match post.parent_post_id {
            Some(parent) if known.contains(&parent) && parent != post.id => {
                children.entry(parent).or_default().push(post)
            }
            _ => roots.push(post),
        }
    }

    let mut laid_out = Vec::with_capacity(known.len());
    // Explicit stack instead of recursion: depth is unbounded.
    let mut stack: Vec<(Post, usize)> = roots.into_iter().rev().map(|p| (p, 0)).collect();
    while let Some((post, depth)) = stack.pop() {
        if let Some(replies) = children.remove(&post.id) {
            stack.extend(replies.into_iter().rev().map(|p| (p, depth + 1)));
        }
        laid_out.push(ThreadedPost { post, depth });
    }

    // Whatever is left forms a cycle unreachable from any root.
    let mut stranded: Vec<Post> = children.into_values().flatten().collect();
    stranded.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    laid_out.extend(stranded.into_iter().map(|post| ThreadedPost { post, depth: 0 }));

    laid_out
}

//! Post comments.

use crate::models::post::{Comment, Post, UpdatePost};
use crate::models::user::CurrentUser;
use crate::types::Timestamp;

/// Build a comment by `author`. Blank text yields `None`.
pub fn new_comment(author: &CurrentUser, text: &str, now: Timestamp) -> Option<Comment> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Comment {
        author: author.display_name().to_string(),
        text: text.to_string(),
        date: now,
    })
}

/// The update appending `comment` to the post's existing comments.
///
/// The store has no append operation, so the whole list is written back.
pub fn append_comment(post: &Post, comment: Comment) -> UpdatePost {
    let mut comments = post.comments.clone();
    comments.push(comment);
    UpdatePost::comments(comments)
}

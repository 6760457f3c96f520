use std::collections::HashSet;

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::{
    error::AppError,
    schema::{comments, posts, votes},
};

use super::{
    models::{comment::Comment, vote::Vote},
    tree::{CommentForest, CommentNode},
};

impl From<Comment> for CommentNode {
    fn from(c: Comment) -> Self {
        CommentNode {
            id: c.id,
            author_id: c.author_id,
            content: c.content,
            commented_date: c.commented_date,
            reply_ids: c.reply_ids,
            upvote_count: c.upvote_count,
        }
    }
}

/// Snapshots the reply forest under `roots` with level-by-level batched
/// fetches instead of one round-trip per node. Identifiers that resolve to
/// nothing simply never enter the snapshot.
pub async fn load_forest(
    conn: &mut AsyncPgConnection,
    roots: &[i32],
) -> Result<CommentForest, AppError> {
    let mut forest = CommentForest::new();
    let mut fetched = HashSet::new();
    let mut frontier: Vec<i32> = roots.to_vec();

    loop {
        frontier.retain(|id| fetched.insert(*id));
        if frontier.is_empty() {
            break;
        }

        let rows = comments::table
            .filter(comments::id.eq_any(&frontier))
            .select(Comment::as_select())
            .load::<Comment>(conn)
            .await?;

        frontier = rows
            .iter()
            .flat_map(|c| c.reply_ids.iter().copied())
            .collect();

        forest.extend(rows.into_iter().map(CommentNode::from));
    }

    Ok(forest)
}

/// A vote applies to exactly one post or one comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteTarget {
    Post(i32),
    Comment(i32),
}

impl VoteTarget {
    pub fn from_ids(post_id: Option<i32>, comment_id: Option<i32>) -> Result<Self, AppError> {
        match (post_id, comment_id) {
            (Some(post_id), None) => Ok(VoteTarget::Post(post_id)),
            (None, Some(comment_id)) => Ok(VoteTarget::Comment(comment_id)),
            _ => Err(AppError::InvalidVoteTarget),
        }
    }

    pub fn post_id(self) -> Option<i32> {
        match self {
            VoteTarget::Post(id) => Some(id),
            VoteTarget::Comment(_) => None,
        }
    }

    pub fn comment_id(self) -> Option<i32> {
        match self {
            VoteTarget::Post(_) => None,
            VoteTarget::Comment(id) => Some(id),
        }
    }
}

/// Resolves the target's author, confirming the target exists before any
/// mutation happens.
pub async fn resolve_target_author(
    conn: &mut AsyncPgConnection,
    target: VoteTarget,
) -> Result<i32, AppError> {
    match target {
        VoteTarget::Post(id) => posts::table
            .find(id)
            .select(posts::author_id)
            .first::<i32>(conn)
            .await
            .optional()?
            .ok_or(AppError::NotFound("post")),
        VoteTarget::Comment(id) => comments::table
            .find(id)
            .select(comments::author_id)
            .first::<i32>(conn)
            .await
            .optional()?
            .ok_or(AppError::NotFound("comment")),
    }
}

/// The user's active vote on the target, if any. The (user, target) pair
/// holds at most one row.
pub async fn find_vote(
    conn: &mut AsyncPgConnection,
    user_id: i32,
    target: VoteTarget,
) -> Result<Option<Vote>, AppError> {
    let query = votes::table.filter(votes::user_id.eq(user_id));

    let vote = match target {
        VoteTarget::Post(id) => {
            query
                .filter(votes::post_id.eq(id))
                .select(Vote::as_select())
                .first::<Vote>(conn)
                .await
                .optional()?
        }
        VoteTarget::Comment(id) => {
            query
                .filter(votes::comment_id.eq(id))
                .select(Vote::as_select())
                .first::<Vote>(conn)
                .await
                .optional()?
        }
    };

    Ok(vote)
}

/// Applies a ledger delta to the target's aggregate score and the author's
/// reputation. Two statements, each atomic on its own (see DESIGN.md on the
/// unresolved partial-failure question).
pub async fn apply_delta(
    conn: &mut AsyncPgConnection,
    target: VoteTarget,
    author_id: i32,
    delta: super::ledger::LedgerDelta,
) -> Result<(), AppError> {
    match target {
        VoteTarget::Post(id) => {
            diesel::update(posts::table.find(id))
                .set(posts::upvote_count.eq(posts::upvote_count + delta.score))
                .execute(conn)
                .await?;
        }
        VoteTarget::Comment(id) => {
            diesel::update(comments::table.find(id))
                .set(comments::upvote_count.eq(comments::upvote_count + delta.score))
                .execute(conn)
                .await?;
        }
    }

    diesel::update(crate::schema::users::table.find(author_id))
        .set(crate::schema::users::reputation.eq(crate::schema::users::reputation + delta.reputation))
        .execute(conn)
        .await?;

    Ok(())
}

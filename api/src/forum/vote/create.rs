use axum::{Json, debug_handler, extract::State};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::{
        ledger::{self, ApplyOutcome, VoteKind},
        models::vote::{NewVote, Vote},
        store,
    },
    schema::votes,
};

use super::VoteSubmission;

/// Casts or switches the acting user's vote on a post or comment. Applying
/// the kind that is already active is a detected no-op: the existing row is
/// returned and no counter moves.
#[debug_handler]
pub async fn apply_vote(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(submission): crate::json::Json<VoteSubmission>,
) -> Result<Json<Vote>, AppError> {
    let target = submission.target()?;
    let requested = submission
        .kind
        .ok_or(AppError::Validation("No vote kind provided".into()))?;

    let mut conn = ctx.diesel.get().await?;

    // Resolve before mutating anything, so an invalid target aborts cleanly.
    let author_id = store::resolve_target_author(&mut conn, target).await?;

    let existing = store::find_vote(&mut conn, user.id, target).await?;
    let current = match &existing {
        Some(vote) => Some(
            VoteKind::parse(&vote.kind)
                .ok_or(AppError::Unhandled(format!("corrupt vote kind `{}`", vote.kind)))?,
        ),
        None => None,
    };

    let delta = match ledger::apply(current, requested) {
        ApplyOutcome::NoOp => {
            // Unwrap is fine: NoOp implies an active vote exists.
            return Ok(Json(existing.unwrap()));
        }
        ApplyOutcome::Switched(delta) => {
            let old = existing.as_ref().unwrap();
            diesel::delete(votes::table.find(old.id))
                .execute(&mut conn)
                .await?;
            delta
        }
        ApplyOutcome::Cast(delta) => delta,
    };

    let new_vote = NewVote {
        user_id: user.id,
        post_id: target.post_id(),
        comment_id: target.comment_id(),
        kind: requested.as_str().to_owned(),
    };

    let vote = diesel::insert_into(votes::table)
        .values(&new_vote)
        .returning(Vote::as_returning())
        .get_result::<Vote>(&mut conn)
        .await?;

    store::apply_delta(&mut conn, target, author_id, delta).await?;

    tracing::debug!(
        user_id = user.id,
        ?target,
        kind = requested.as_str(),
        score_delta = delta.score,
        reputation_delta = delta.reputation,
        "vote applied"
    );

    Ok(Json(vote))
}

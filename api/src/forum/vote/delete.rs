use axum::{debug_handler, extract::State};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::{
        ledger::{self, VoteKind},
        store,
    },
    schema::votes,
};

use super::VoteSubmission;

/// Retracts the acting user's active vote on a post or comment, reversing
/// its exact effect on the target score and the author's reputation. The
/// stored vote decides the reversal; any `kind` in the body is ignored.
#[debug_handler]
pub async fn retract_vote(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(submission): crate::json::Json<VoteSubmission>,
) -> Result<(), AppError> {
    let target = submission.target()?;

    let mut conn = ctx.diesel.get().await?;

    let author_id = store::resolve_target_author(&mut conn, target).await?;

    let existing = store::find_vote(&mut conn, user.id, target).await?;
    let current = match &existing {
        Some(vote) => Some(
            VoteKind::parse(&vote.kind)
                .ok_or(AppError::Unhandled(format!("corrupt vote kind `{}`", vote.kind)))?,
        ),
        None => None,
    };

    let delta = ledger::retract(current).ok_or(AppError::VoteNotFound)?;
    let vote = existing.unwrap();

    diesel::delete(votes::table.find(vote.id))
        .execute(&mut conn)
        .await?;

    store::apply_delta(&mut conn, target, author_id, delta).await?;

    tracing::debug!(user_id = user.id, ?target, "vote retracted");

    Ok(())
}

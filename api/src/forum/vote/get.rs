use axum::{
    Json,
    extract::{Path, State},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{App, account::AuthUser, error::AppError, forum::models::vote::Vote, schema::votes};

/// The acting user's active vote on the given post or comment id. Returns
/// `null` when there is none, so the client can render both arrows unlit.
pub async fn get_vote(
    State(ctx): State<App>,
    Path(target_id): Path<i32>,
    AuthUser(user): AuthUser,
) -> Result<Json<Option<Vote>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let vote = votes::table
        .filter(votes::user_id.eq(user.id))
        .filter(
            votes::post_id
                .eq(target_id)
                .or(votes::comment_id.eq(target_id)),
        )
        .select(Vote::as_select())
        .first::<Vote>(&mut conn)
        .await
        .optional()?;

    Ok(Json(vote))
}

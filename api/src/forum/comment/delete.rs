use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::dsl::array_remove;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::store,
    schema::{comments, users, votes},
};

/// Deletes a comment and its whole reply subtree, along with every vote on
/// any of those comments. The parent's child list is left as-is; the walker
/// treats the now-dangling id as an empty subtree by policy.
#[debug_handler]
pub async fn delete_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
) -> Result<(), AppError> {
    let mut conn = ctx.diesel.get().await?;

    let owner = comments::table
        .filter(comments::id.eq(id))
        .filter(comments::author_id.eq(user.id))
        .select(comments::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if owner.is_none() {
        return Err((
            "You are not the owner of this comment",
            StatusCode::FORBIDDEN,
        ))?;
    }

    let forest = store::load_forest(&mut conn, &[id]).await?;
    let doomed = forest.collect_ids(&[id]);

    diesel::delete(votes::table.filter(votes::comment_id.eq_any(&doomed)))
        .execute(&mut conn)
        .await?;

    diesel::delete(comments::table.filter(comments::id.eq_any(&doomed)))
        .execute(&mut conn)
        .await?;

    diesel::update(users::table.find(user.id))
        .set(users::created_comment_ids.eq(array_remove(users::created_comment_ids, id)))
        .execute(&mut conn)
        .await?;

    tracing::debug!(comment_id = id, deleted = doomed.len(), "comment subtree deleted");

    Ok(())
}

use axum::{
    Json,
    extract::{Path, State},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{App, error::AppError, forum::models::comment::Comment, schema::comments};

pub async fn get_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Comment>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let comment = comments::table
        .find(id)
        .select(Comment::as_select())
        .first::<Comment>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("comment"))?;

    Ok(Json(comment))
}

/// Direct replies only, most recent first.
pub async fn get_replies(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let comment = comments::table
        .find(id)
        .select(Comment::as_select())
        .first::<Comment>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("comment"))?;

    let replies = comments::table
        .filter(comments::id.eq_any(&comment.reply_ids))
        .order(comments::commented_date.desc())
        .select(Comment::as_select())
        .load::<Comment>(&mut conn)
        .await?;

    Ok(Json(replies))
}

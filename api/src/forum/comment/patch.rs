use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{
    App, account::AuthUser, error::AppError, forum::models::comment::Comment, schema::comments,
};

#[derive(Deserialize)]
pub struct CommentPatch {
    content: String,
}

#[debug_handler]
pub async fn patch_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
    crate::json::Json(mut patch): crate::json::Json<CommentPatch>,
) -> Result<Json<Comment>, AppError> {
    patch.content = patch.content.trim().to_string();

    if patch.content.is_empty() {
        return Err(("Content cannot be empty", StatusCode::BAD_REQUEST))?;
    }

    if patch.content.len() > 500 {
        return Err((
            "Content too long (max 500 characters)",
            StatusCode::BAD_REQUEST,
        ))?;
    }

    let mut conn = ctx.diesel.get().await?;

    let is_owner = comments::table
        .filter(comments::id.eq(id))
        .filter(comments::author_id.eq(user.id))
        .select(comments::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if is_owner.is_none() {
        return Err((
            "You are not the owner of this comment",
            StatusCode::FORBIDDEN,
        ))?;
    }

    let comment = diesel::update(comments::table.find(id))
        .set(comments::content.eq(patch.content))
        .returning(Comment::as_returning())
        .get_result::<Comment>(&mut conn)
        .await?;

    Ok(Json(comment))
}

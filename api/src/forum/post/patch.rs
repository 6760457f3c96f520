use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{App, account::AuthUser, error::AppError, forum::models::post::Post, schema::posts};

#[derive(Deserialize)]
pub struct PostPatch {
    title: Option<String>,
    content: Option<String>,
    link_flair_id: Option<i32>,
}

#[debug_handler]
pub async fn patch_post(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
    crate::json::Json(patch): crate::json::Json<PostPatch>,
) -> Result<Json<Post>, AppError> {
    let title = patch.title.map(|t| t.trim().to_string());
    let content = patch.content.map(|c| c.trim().to_string());

    if let Some(title) = &title {
        if title.is_empty() {
            return Err(("Title cannot be empty", StatusCode::BAD_REQUEST))?;
        }
        if title.len() > 100 {
            return Err(("Title too long (max 100 characters)", StatusCode::BAD_REQUEST))?;
        }
    }

    if let Some(content) = &content {
        if content.is_empty() {
            return Err(("Content cannot be empty", StatusCode::BAD_REQUEST))?;
        }
    }

    let mut conn = ctx.diesel.get().await?;

    let is_owner = posts::table
        .filter(posts::id.eq(id))
        .filter(posts::author_id.eq(user.id))
        .select(posts::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if is_owner.is_none() {
        return Err(("You are not the owner of this post", StatusCode::FORBIDDEN))?;
    }

    let mut post = posts::table
        .find(id)
        .select(Post::as_select())
        .first::<Post>(&mut conn)
        .await?;

    let post = diesel::update(posts::table.find(id))
        .set((
            posts::title.eq(title.unwrap_or(std::mem::take(&mut post.title))),
            posts::content.eq(content.unwrap_or(std::mem::take(&mut post.content))),
            posts::link_flair_id.eq(patch.link_flair_id.or(post.link_flair_id)),
        ))
        .returning(Post::as_returning())
        .get_result::<Post>(&mut conn)
        .await?;

    Ok(Json(post))
}

/// Bumps the post's monotonic view counter.
pub async fn increment_views(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Post>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let post = diesel::update(posts::table.find(id))
        .set(posts::views.eq(posts::views + 1))
        .returning(Post::as_returning())
        .get_result::<Post>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))?;

    Ok(Json(post))
}

use axum::{
    Json,
    extract::{Path, State},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{
    App,
    error::AppError,
    forum::{
        comment::{CommentTree, build_comment_tree},
        models::comment::Comment,
        store,
    },
    schema::posts,
};

async fn post_comment_ids(ctx: &App, id: i32) -> Result<Vec<i32>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    posts::table
        .find(id)
        .select(posts::comment_ids)
        .first::<Vec<i32>>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))
}

/// The post's full comment tree, nested, children newest-first.
pub async fn get_post_comments(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CommentTree>>, AppError> {
    let comment_ids = post_comment_ids(&ctx, id).await?;

    let mut conn = ctx.diesel.get().await?;
    let forest = store::load_forest(&mut conn, &comment_ids).await?;

    Ok(Json(build_comment_tree(&forest, &comment_ids)))
}

#[derive(Serialize)]
pub struct NumComments {
    num_comments: usize,
}

/// Counts every comment reachable from the post, not just the top level.
/// Computed on demand; nothing denormalized is stored.
pub async fn num_comments(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<NumComments>, AppError> {
    let comment_ids = post_comment_ids(&ctx, id).await?;

    let mut conn = ctx.diesel.get().await?;
    let forest = store::load_forest(&mut conn, &comment_ids).await?;

    Ok(Json(NumComments {
        num_comments: forest.count(&comment_ids),
    }))
}

/// The most recently authored comment anywhere in the post's tree.
pub async fn most_recent_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Comment>, AppError> {
    let comment_ids = post_comment_ids(&ctx, id).await?;

    let mut conn = ctx.diesel.get().await?;
    let forest = store::load_forest(&mut conn, &comment_ids).await?;

    let node = forest
        .most_recent(&comment_ids)
        .ok_or(AppError::NotFound("comment"))?;

    Ok(Json(Comment {
        id: node.id,
        content: node.content.clone(),
        reply_ids: node.reply_ids.clone(),
        author_id: node.author_id,
        commented_date: node.commented_date,
        upvote_count: node.upvote_count,
    }))
}

use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::dsl::array_remove;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::{models::post::Post, store},
    schema::{comments, communities, posts, users, votes},
};

/// Deletes a post, its whole comment forest, and every vote on the post or
/// any of those comments. Also shared by community deletion.
pub async fn delete_post_cascade(
    conn: &mut AsyncPgConnection,
    post: &Post,
) -> Result<(), AppError> {
    let forest = store::load_forest(conn, &post.comment_ids).await?;
    let doomed = forest.collect_ids(&post.comment_ids);

    diesel::delete(votes::table.filter(votes::comment_id.eq_any(&doomed)))
        .execute(conn)
        .await?;

    diesel::delete(votes::table.filter(votes::post_id.eq(post.id)))
        .execute(conn)
        .await?;

    diesel::delete(comments::table.filter(comments::id.eq_any(&doomed)))
        .execute(conn)
        .await?;

    diesel::update(users::table.find(post.author_id))
        .set(users::created_post_ids.eq(array_remove(users::created_post_ids, post.id)))
        .execute(conn)
        .await?;

    diesel::update(communities::table.filter(communities::post_ids.contains(vec![post.id])))
        .set(communities::post_ids.eq(array_remove(communities::post_ids, post.id)))
        .execute(conn)
        .await?;

    diesel::delete(posts::table.find(post.id)).execute(conn).await?;

    tracing::debug!(post_id = post.id, comments = doomed.len(), "post deleted");

    Ok(())
}

#[debug_handler]
pub async fn delete_post(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
) -> Result<(), AppError> {
    let mut conn = ctx.diesel.get().await?;

    let post = posts::table
        .find(id)
        .select(Post::as_select())
        .first::<Post>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))?;

    if post.author_id != user.id {
        return Err(("You are not the owner of this post", StatusCode::FORBIDDEN))?;
    }

    delete_post_cascade(&mut conn, &post).await
}

use axum::{
    Json,
    extract::{Path, State},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{App, error::AppError, forum::models::post::Post, schema::posts};

pub async fn get_posts(State(ctx): State<App>) -> Result<Json<Vec<Post>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let all = posts::table
        .order(posts::posted_date.desc())
        .select(Post::as_select())
        .load::<Post>(&mut conn)
        .await?;

    Ok(Json(all))
}

pub async fn get_post(State(ctx): State<App>, Path(id): Path<i32>) -> Result<Json<Post>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let post = posts::table
        .find(id)
        .select(Post::as_select())
        .first::<Post>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))?;

    Ok(Json(post))
}

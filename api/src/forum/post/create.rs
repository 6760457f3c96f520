use axum::{Json, debug_handler, extract::State, http::StatusCode};
use diesel::dsl::array_append;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::models::post::{NewPost, Post},
    schema::{communities, link_flairs, posts, users},
};

#[derive(Deserialize)]
pub struct PostSubmission {
    title: String,
    content: String,
    link_flair_id: Option<i32>,
    community_id: i32,
}

impl PostSubmission {
    fn validate(&mut self) -> Result<(), &'static str> {
        self.title = self.title.trim().to_string();
        self.content = self.content.trim().to_string();

        if self.title.is_empty() {
            return Err("No title provided");
        }

        if self.title.len() > 100 {
            return Err("Title too long (max 100 characters)");
        }

        if self.content.is_empty() {
            return Err("No content provided");
        }

        Ok(())
    }
}

#[debug_handler]
pub async fn create_post(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(mut submission): crate::json::Json<PostSubmission>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(e.into()))?;

    let mut conn = ctx.diesel.get().await?;

    communities::table
        .find(submission.community_id)
        .select(communities::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    if let Some(flair_id) = submission.link_flair_id {
        link_flairs::table
            .find(flair_id)
            .select(link_flairs::id)
            .first::<i32>(&mut conn)
            .await
            .optional()?
            .ok_or(AppError::NotFound("link flair"))?;
    }

    let new_post = NewPost {
        title: submission.title,
        content: submission.content,
        link_flair_id: submission.link_flair_id,
        author_id: user.id,
        posted_date: chrono::Utc::now().naive_utc(),
    };

    let post = diesel::insert_into(posts::table)
        .values(&new_post)
        .returning(Post::as_returning())
        .get_result::<Post>(&mut conn)
        .await?;

    diesel::update(communities::table.find(submission.community_id))
        .set(communities::post_ids.eq(array_append(communities::post_ids, post.id)))
        .execute(&mut conn)
        .await?;

    diesel::update(users::table.find(user.id))
        .set(users::created_post_ids.eq(array_append(users::created_post_ids, post.id)))
        .execute(&mut conn)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

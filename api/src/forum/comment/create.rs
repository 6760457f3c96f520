use axum::{Json, debug_handler, extract::State, http::StatusCode};
use diesel::dsl::array_append;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    forum::models::comment::{Comment, NewComment},
    schema::{comments, posts, users},
};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct CommentSubmission {
    content: String,
    // Exactly one of the two: a top-level comment on a post, or a reply.
    post_id: Option<i32>,
    comment_id: Option<i32>,
}

impl CommentSubmission {
    fn validate(&mut self) -> Result<(), &'static str> {
        self.content = self.content.trim().to_string();

        if self.content.is_empty() {
            return Err("No content provided");
        }

        if self.content.len() > 500 {
            return Err("Content too long (max 500 characters)");
        }

        Ok(())
    }
}

#[debug_handler]
pub async fn create_comment(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(mut submission): crate::json::Json<CommentSubmission>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(e.into()))?;

    let mut conn = ctx.diesel.get().await?;

    // Confirm the parent exists before inserting anything.
    match (submission.post_id, submission.comment_id) {
        (Some(post_id), None) => {
            posts::table
                .find(post_id)
                .select(posts::id)
                .first::<i32>(&mut conn)
                .await
                .optional()?
                .ok_or(AppError::NotFound("post"))?;
        }
        (None, Some(comment_id)) => {
            comments::table
                .find(comment_id)
                .select(comments::id)
                .first::<i32>(&mut conn)
                .await
                .optional()?
                .ok_or(AppError::NotFound("comment"))?;
        }
        _ => {
            return Err(AppError::Validation(
                "A comment's parent must be exactly one of a post or a comment".into(),
            ));
        }
    }

    let new_comment = NewComment {
        content: submission.content,
        author_id: user.id,
        commented_date: chrono::Utc::now().naive_utc(),
    };

    let comment = diesel::insert_into(comments::table)
        .values(&new_comment)
        .returning(Comment::as_returning())
        .get_result::<Comment>(&mut conn)
        .await?;

    // Append to the parent's ordered child list
    match (submission.post_id, submission.comment_id) {
        (Some(post_id), None) => {
            diesel::update(posts::table.find(post_id))
                .set(posts::comment_ids.eq(array_append(posts::comment_ids, comment.id)))
                .execute(&mut conn)
                .await?;
        }
        (None, Some(comment_id)) => {
            diesel::update(comments::table.find(comment_id))
                .set(comments::reply_ids.eq(array_append(comments::reply_ids, comment.id)))
                .execute(&mut conn)
                .await?;
        }
        _ => unreachable!("parent validated above"),
    }

    diesel::update(users::table.find(user.id))
        .set(users::created_comment_ids.eq(array_append(users::created_comment_ids, comment.id)))
        .execute(&mut conn)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

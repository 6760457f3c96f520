use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{App, account::AuthUser, error::AppError, schema::link_flairs};

use super::models::link_flair::{LinkFlair, NewLinkFlair};

pub async fn get_link_flairs(State(ctx): State<App>) -> Result<Json<Vec<LinkFlair>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let all = link_flairs::table
        .select(LinkFlair::as_select())
        .load::<LinkFlair>(&mut conn)
        .await?;

    Ok(Json(all))
}

pub async fn get_link_flair(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<LinkFlair>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let flair = link_flairs::table
        .find(id)
        .select(LinkFlair::as_select())
        .first::<LinkFlair>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("link flair"))?;

    Ok(Json(flair))
}

#[derive(Deserialize)]
pub struct LinkFlairSubmission {
    content: String,
}

#[debug_handler]
pub async fn create_link_flair(
    State(ctx): State<App>,
    AuthUser(_user): AuthUser,
    crate::json::Json(submission): crate::json::Json<LinkFlairSubmission>,
) -> Result<(StatusCode, Json<LinkFlair>), AppError> {
    let content = submission.content.trim().to_string();

    if content.is_empty() {
        return Err(AppError::Validation("No content provided".into()));
    }

    if content.len() > 30 {
        return Err(AppError::Validation(
            "Content too long (max 30 characters)".into(),
        ));
    }

    let mut conn = ctx.diesel.get().await?;

    let flair = diesel::insert_into(link_flairs::table)
        .values(&NewLinkFlair { content })
        .returning(LinkFlair::as_returning())
        .get_result::<LinkFlair>(&mut conn)
        .await?;

    Ok((StatusCode::CREATED, Json(flair)))
}

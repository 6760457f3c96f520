use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use diesel::dsl::{array_append, array_remove};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{
    App,
    account::AuthUser,
    error::AppError,
    schema::{communities, posts, users},
};

use super::{
    models::{
        community::{Community, NewCommunity},
        post::Post,
    },
    post::delete::delete_post_cascade,
};

pub async fn get_communities(State(ctx): State<App>) -> Result<Json<Vec<Community>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let all = communities::table
        .order(communities::start_date.desc())
        .select(Community::as_select())
        .load::<Community>(&mut conn)
        .await?;

    Ok(Json(all))
}

pub async fn get_community(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Community>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let community = communities::table
        .find(id)
        .select(Community::as_select())
        .first::<Community>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    Ok(Json(community))
}

/// The community a post lives in, for breadcrumbs on the post page.
pub async fn get_community_by_post(
    State(ctx): State<App>,
    Path(post_id): Path<i32>,
) -> Result<Json<Community>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let community = communities::table
        .filter(communities::post_ids.contains(vec![post_id]))
        .select(Community::as_select())
        .first::<Community>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    Ok(Json(community))
}

#[derive(Deserialize)]
pub struct CommunitySubmission {
    name: String,
    description: String,
}

impl CommunitySubmission {
    fn validate(&mut self) -> Result<(), &'static str> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();

        if self.name.is_empty() {
            return Err("No name provided");
        }

        if self.name.len() > 100 {
            return Err("Name too long (max 100 characters)");
        }

        if self.description.is_empty() {
            return Err("No description provided");
        }

        if self.description.len() > 500 {
            return Err("Description too long (max 500 characters)");
        }

        Ok(())
    }
}

#[debug_handler]
pub async fn create_community(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(mut submission): crate::json::Json<CommunitySubmission>,
) -> Result<(StatusCode, Json<Community>), AppError> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(e.into()))?;

    let mut conn = ctx.diesel.get().await?;

    let name_taken = communities::table
        .filter(communities::name.eq(&submission.name))
        .select(communities::id)
        .first::<i32>(&mut conn)
        .await
        .optional()?;

    if name_taken.is_some() {
        return Err(AppError::Validation("Community name must be unique!".into()));
    }

    // The creator is the first member
    let new_community = NewCommunity {
        name: submission.name,
        description: submission.description,
        member_ids: vec![user.id],
        start_date: chrono::Utc::now().naive_utc(),
    };

    let community = diesel::insert_into(communities::table)
        .values(&new_community)
        .returning(Community::as_returning())
        .get_result::<Community>(&mut conn)
        .await?;

    diesel::update(users::table.find(user.id))
        .set((
            users::created_community_ids
                .eq(array_append(users::created_community_ids, community.id)),
            users::joined_community_ids
                .eq(array_append(users::joined_community_ids, community.id)),
        ))
        .execute(&mut conn)
        .await?;

    Ok((StatusCode::CREATED, Json(community)))
}

#[derive(Deserialize)]
pub struct CommunityPatch {
    name: Option<String>,
    description: Option<String>,
}

#[debug_handler]
pub async fn patch_community(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
    crate::json::Json(patch): crate::json::Json<CommunityPatch>,
) -> Result<Json<Community>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let community = communities::table
        .find(id)
        .select(Community::as_select())
        .first::<Community>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    if community.member_ids.as_slice().first() != Some(&user.id) {
        return Err((
            "You are not the owner of this community",
            StatusCode::FORBIDDEN,
        ))?;
    }

    let community = diesel::update(communities::table.find(id))
        .set((
            communities::name.eq(patch.name.unwrap_or(community.name)),
            communities::description.eq(patch.description.unwrap_or(community.description)),
        ))
        .returning(Community::as_returning())
        .get_result::<Community>(&mut conn)
        .await?;

    Ok(Json(community))
}

pub enum MembershipAction {
    Join,
    Leave,
}

impl<'de> Deserialize<'de> for MembershipAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "join" => Ok(MembershipAction::Join),
            "leave" => Ok(MembershipAction::Leave),
            _ => Err(serde::de::Error::custom("invalid action")),
        }
    }
}

#[derive(Deserialize)]
pub struct MembershipChange {
    community_id: i32,
    action: MembershipAction,
}

#[debug_handler]
pub async fn change_membership(
    State(ctx): State<App>,
    AuthUser(user): AuthUser,
    crate::json::Json(change): crate::json::Json<MembershipChange>,
) -> Result<Json<Community>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let community = communities::table
        .find(change.community_id)
        .select(Community::as_select())
        .first::<Community>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    let community = match change.action {
        MembershipAction::Join => {
            if community.member_ids.contains(&user.id) {
                community
            } else {
                diesel::update(users::table.find(user.id))
                    .set(users::joined_community_ids
                        .eq(array_append(users::joined_community_ids, community.id)))
                    .execute(&mut conn)
                    .await?;

                diesel::update(communities::table.find(community.id))
                    .set(communities::member_ids
                        .eq(array_append(communities::member_ids, user.id)))
                    .returning(Community::as_returning())
                    .get_result::<Community>(&mut conn)
                    .await?
            }
        }
        MembershipAction::Leave => {
            diesel::update(users::table.find(user.id))
                .set(users::joined_community_ids
                    .eq(array_remove(users::joined_community_ids, community.id)))
                .execute(&mut conn)
                .await?;

            diesel::update(communities::table.find(community.id))
                .set(communities::member_ids
                    .eq(array_remove(communities::member_ids, user.id)))
                .returning(Community::as_returning())
                .get_result::<Community>(&mut conn)
                .await?
        }
    };

    Ok(Json(community))
}

/// Deletes a community and everything under it: each post cascades to its
/// comment forest and votes.
#[debug_handler]
pub async fn delete_community(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(user): AuthUser,
) -> Result<(), AppError> {
    let mut conn = ctx.diesel.get().await?;

    let community = communities::table
        .find(id)
        .select(Community::as_select())
        .first::<Community>(&mut conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("community"))?;

    if community.member_ids.as_slice().first() != Some(&user.id) {
        return Err((
            "You are not the owner of this community",
            StatusCode::FORBIDDEN,
        ))?;
    }

    let doomed_posts = posts::table
        .filter(posts::id.eq_any(&community.post_ids))
        .select(Post::as_select())
        .load::<Post>(&mut conn)
        .await?;

    for post in &doomed_posts {
        delete_post_cascade(&mut conn, post).await?;
    }

    diesel::update(users::table.find(user.id))
        .set((
            users::created_community_ids
                .eq(array_remove(users::created_community_ids, community.id)),
            users::joined_community_ids
                .eq(array_remove(users::joined_community_ids, community.id)),
        ))
        .execute(&mut conn)
        .await?;

    diesel::delete(communities::table.find(community.id))
        .execute(&mut conn)
        .await?;

    tracing::debug!(
        community_id = community.id,
        posts = doomed_posts.len(),
        "community deleted"
    );

    Ok(())
}

use axum::{
    Json,
    extract::{Query, State},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::{App, error::AppError, schema::posts};

use super::{models::post::Post, store, tree::clean_string};

#[derive(Deserialize)]
pub struct Queries {
    query: String,
}

/// A post matches when its cleaned title or body contains any query term,
/// or when any comment anywhere in its tree does.
pub async fn search(
    State(ctx): State<App>,
    Query(q): Query<Queries>,
) -> Result<Json<Vec<Post>>, AppError> {
    let terms: Vec<String> = q
        .query
        .split_whitespace()
        .map(clean_string)
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return Ok(Json(vec![]));
    }

    let mut conn = ctx.diesel.get().await?;

    let all_posts = posts::table
        .order(posts::posted_date.desc())
        .select(Post::as_select())
        .load::<Post>(&mut conn)
        .await?;

    let mut results = Vec::new();

    for post in all_posts {
        let title = clean_string(&post.title);
        let content = clean_string(&post.content);

        if terms.iter().any(|t| title.contains(t) || content.contains(t)) {
            results.push(post);
            continue;
        }

        // Only snapshot the comment tree when the post itself didn't match
        let forest = store::load_forest(&mut conn, &post.comment_ids).await?;
        if terms
            .iter()
            .any(|t| forest.contains_term(&post.comment_ids, t))
        {
            results.push(post);
        }
    }

    Ok(Json(results))
}

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::App;

use super::{
    comment::{
        create::create_comment,
        delete::delete_comment,
        get::{get_comment, get_replies},
        patch::patch_comment,
    },
    community::{
        change_membership, create_community, delete_community, get_communities, get_community,
        get_community_by_post, patch_community,
    },
    flair::{create_link_flair, get_link_flair, get_link_flairs},
    post::{
        comments::{get_post_comments, most_recent_comment, num_comments},
        create::create_post,
        delete::delete_post,
        get::{get_post, get_posts},
        patch::{increment_views, patch_post},
    },
    search::search,
    vote::{create::apply_vote, delete::retract_vote, get::get_vote},
};

pub fn route() -> Router<App> {
    // TODO rate limit these public endpoints
    Router::<App>::new()
        .route("/communities", get(get_communities).post(create_community))
        .route(
            "/communities/{id}",
            get(get_community)
                .patch(patch_community)
                .delete(delete_community),
        )
        .route("/communities/membership", patch(change_membership))
        .route("/communities/by-post/{post_id}", get(get_community_by_post))
        .route("/posts", get(get_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(patch_post).delete(delete_post),
        )
        .route("/posts/{id}/views", patch(increment_views))
        .route("/posts/{id}/comments", get(get_post_comments))
        .route("/posts/{id}/num-comments", get(num_comments))
        .route("/posts/{id}/most-recent-comment", get(most_recent_comment))
        .route("/comments", post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment)
                .patch(patch_comment)
                .delete(delete_comment),
        )
        .route("/comments/{id}/replies", get(get_replies))
        .route("/votes", post(apply_vote).delete(retract_vote))
        .route("/votes/{target_id}", get(get_vote))
        .route("/search", get(search))
        .route("/link-flairs", get(get_link_flairs).post(create_link_flair))
        .route("/link-flairs/{id}", get(get_link_flair))
}

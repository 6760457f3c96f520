use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub link_flair_id: Option<i32>,
    pub author_id: i32,
    pub posted_date: NaiveDateTime,
    pub comment_ids: Vec<i32>,
    pub views: i32,
    pub upvote_count: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub link_flair_id: Option<i32>,
    pub author_id: i32,
    pub posted_date: NaiveDateTime,
}

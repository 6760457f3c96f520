use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

// The model that maps to the database table. `reply_ids` is the ordered list
// of direct child comments; entries may dangle after a cascade elsewhere and
// the tree walker skips them.
#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub reply_ids: Vec<i32>,
    pub author_id: i32,
    pub commented_date: NaiveDateTime,
    pub upvote_count: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub content: String,
    pub author_id: i32,
    pub commented_date: NaiveDateTime,
}

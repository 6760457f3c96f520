use diesel::prelude::*;
use serde::Serialize;

// Exactly one of `post_id`/`comment_id` is set; `VoteTarget::from_ids`
// rejects anything else before a row is ever written.
#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vote {
    pub id: i32,
    pub user_id: i32,
    pub post_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub kind: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::votes)]
pub struct NewVote {
    pub user_id: i32,
    pub post_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub kind: String,
}

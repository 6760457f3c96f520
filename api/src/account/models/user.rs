use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

pub const DEFAULT_REPUTATION: i32 = 100;
pub const ADMIN_REPUTATION: i32 = 1000;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub reputation: i32,
    pub joined_date: NaiveDateTime,
    pub created_community_ids: Vec<i32>,
    pub joined_community_ids: Vec<i32>,
    pub created_post_ids: Vec<i32>,
    pub created_comment_ids: Vec<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub reputation: i32,
    pub joined_date: NaiveDateTime,
}

/// What gets serialized to clients. The password hash never leaves the server.
#[derive(Serialize, Debug, Clone)]
pub struct UserProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
    pub reputation: i32,
    pub joined_date: NaiveDateTime,
    pub created_community_ids: Vec<i32>,
    pub joined_community_ids: Vec<i32>,
    pub created_post_ids: Vec<i32>,
    pub created_comment_ids: Vec<i32>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        UserProfile {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            display_name: u.display_name,
            is_admin: u.is_admin,
            reputation: u.reputation,
            joined_date: u.joined_date,
            created_community_ids: u.created_community_ids,
            joined_community_ids: u.joined_community_ids,
            created_post_ids: u.created_post_ids,
            created_comment_ids: u.created_comment_ids,
        }
    }
}

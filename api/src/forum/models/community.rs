use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::communities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Community {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub post_ids: Vec<i32>,
    pub member_ids: Vec<i32>,
    pub start_date: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::communities)]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub member_ids: Vec<i32>,
    pub start_date: NaiveDateTime,
}

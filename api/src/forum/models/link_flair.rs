use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::link_flairs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LinkFlair {
    pub id: i32,
    pub content: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::link_flairs)]
pub struct NewLinkFlair {
    pub content: String,
}

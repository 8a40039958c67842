use crate::schema::users;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[primary_key(username)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

impl User {
    pub fn all(conn: &PgConnection) -> Result<Vec<Self>, diesel::result::Error> {
        users::table.load::<Self>(conn)
    }

    pub fn find_by_username(
        conn: &PgConnection,
        username: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        users::table.find(username).first::<Self>(conn).optional()
    }
}

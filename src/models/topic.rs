use crate::schema::topics;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[primary_key(slug)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

impl Topic {
    pub fn all(conn: &PgConnection) -> Result<Vec<Self>, diesel::result::Error> {
        topics::table.load::<Self>(conn)
    }

    pub fn exists(conn: &PgConnection, slug: &str) -> Result<bool, diesel::result::Error> {
        let topic = topics::table.find(slug).first::<Self>(conn).optional()?;
        Ok(topic.is_some())
    }
}

use crate::schema::comments;
use crate::validation::{CommentFilter, CommentSortColumn, SortOrder};
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[primary_key(comment_id)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
struct NewComment<'a> {
    pub article_id: i32,
    pub author: &'a str,
    pub body: &'a str,
    pub votes: i32,
    pub created_at: NaiveDateTime,
}

macro_rules! order_by {
    ($query:expr, $column:expr, $order:expr) => {
        match $order {
            SortOrder::Asc => $query.order($column.asc()),
            SortOrder::Desc => $query.order($column.desc()),
        }
    };
}

impl Comment {
    pub fn list_for_article(
        conn: &PgConnection,
        article_id: i32,
        filter: &CommentFilter,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        let query = comments::table
            .filter(comments::article_id.eq(article_id))
            .into_boxed();
        let query = match filter.sort_by {
            CommentSortColumn::CommentId => order_by!(query, comments::comment_id, filter.order),
            CommentSortColumn::Votes => order_by!(query, comments::votes, filter.order),
            CommentSortColumn::CreatedAt => order_by!(query, comments::created_at, filter.order),
            CommentSortColumn::Author => order_by!(query, comments::author, filter.order),
            CommentSortColumn::Body => order_by!(query, comments::body, filter.order),
        };
        query
            .then_order_by(comments::comment_id.asc())
            .load::<Self>(conn)
    }

    pub fn create(
        conn: &PgConnection,
        article_id: i32,
        author: &str,
        body: &str,
    ) -> Result<Self, diesel::result::Error> {
        let new_comment = NewComment {
            article_id,
            author,
            body,
            votes: 0,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(comments::table)
            .values(new_comment)
            .get_result::<Self>(conn)
    }
}

use crate::schema::articles;
use crate::validation::ArticleFilter;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Text, Timestamp};
use serde::{Deserialize, Serialize};

/// An article row as stored.
#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[primary_key(article_id)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub body: String,
    pub votes: i32,
    pub topic: String,
    pub author: String,
    pub created_at: NaiveDateTime,
}

/// An article together with the number of comments attached to it.
#[derive(Serialize, Deserialize, QueryableByName, Debug, Clone, PartialEq)]
pub struct ArticleSummary {
    #[sql_type = "Integer"]
    pub article_id: i32,
    #[sql_type = "Text"]
    pub title: String,
    #[sql_type = "Text"]
    pub body: String,
    #[sql_type = "Integer"]
    pub votes: i32,
    #[sql_type = "Text"]
    pub topic: String,
    #[sql_type = "Text"]
    pub author: String,
    #[sql_type = "Timestamp"]
    pub created_at: NaiveDateTime,
    #[sql_type = "BigInt"]
    pub comment_count: i64,
}

static SELECT_SUMMARY: &str = "SELECT articles.article_id, articles.title, articles.body,
       articles.votes, articles.topic, articles.author, articles.created_at,
       COUNT(comments.comment_id) AS comment_count
  FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id";

impl Article {
    /// Lists articles matching the filter. The `ORDER BY` is built from the
    /// validated sort column only.
    pub fn list(
        conn: &PgConnection,
        filter: &ArticleFilter,
    ) -> Result<Vec<ArticleSummary>, diesel::result::Error> {
        let query = format!(
            "{} WHERE ($1::varchar IS NULL OR articles.author = $1)
                AND ($2::varchar IS NULL OR articles.topic = $2)
              GROUP BY articles.article_id
              ORDER BY {} {}, articles.article_id ASC",
            SELECT_SUMMARY,
            filter.sort_by.as_sql(),
            filter.order.as_sql()
        );
        sql_query(query)
            .bind::<Nullable<Text>, _>(filter.author.as_deref())
            .bind::<Nullable<Text>, _>(filter.topic.as_deref())
            .load::<ArticleSummary>(conn)
    }

    /// Zero or one summaries for the given id.
    pub fn find_summary(
        conn: &PgConnection,
        id: i32,
    ) -> Result<Vec<ArticleSummary>, diesel::result::Error> {
        let query = format!(
            "{} WHERE articles.article_id = $1 GROUP BY articles.article_id",
            SELECT_SUMMARY
        );
        sql_query(query)
            .bind::<Integer, _>(id)
            .load::<ArticleSummary>(conn)
    }

    pub fn exists(conn: &PgConnection, id: i32) -> Result<bool, diesel::result::Error> {
        let article = articles::table.find(id).first::<Self>(conn).optional()?;
        Ok(article.is_some())
    }

    /// Adds `delta` to the stored vote count in a single statement.
    pub fn increment_votes(
        conn: &PgConnection,
        id: i32,
        delta: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        diesel::update(articles::table.find(id))
            .set(articles::votes.eq(articles::votes + delta))
            .get_result::<Self>(conn)
            .optional()
    }
}

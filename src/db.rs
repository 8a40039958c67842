//! Data access
//!
//! Handlers only see the [`Store`] trait. The server runs on [`PgStore`], a
//! diesel/r2d2 Postgres pool created at startup and dropped with the server.

use crate::config::Config;
use crate::models::{Article, ArticleSummary, Comment, Topic, User};
use crate::validation::{ArticleFilter, CommentFilter};
use anyhow::{Context, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::result::Error as DieselError;
use std::sync::Arc;
use std::time::Duration;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Shared handle injected into every handler as application data.
pub type SharedStore = Arc<dyn Store>;

/// Everything the handlers need from the database. Calls block, so handlers
/// run them through `web::block`.
pub trait Store: Send + Sync + 'static {
    fn fetch_topics(&self) -> Result<Vec<Topic>>;
    fn topic_exists(&self, slug: &str) -> Result<bool>;
    fn fetch_users(&self) -> Result<Vec<User>>;
    fn fetch_user(&self, username: &str) -> Result<Option<User>>;
    fn fetch_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleSummary>>;
    /// Zero or one rows.
    fn fetch_article_by_id(&self, id: i32) -> Result<Vec<ArticleSummary>>;
    fn update_article_votes(&self, id: i32, delta: i32) -> Result<VoteUpdate>;
    /// `None` when no article has this id.
    fn fetch_comments(
        &self,
        article_id: i32,
        filter: &CommentFilter,
    ) -> Result<Option<Vec<Comment>>>;
    fn insert_comment(&self, article_id: i32, author: &str, body: &str) -> Result<Comment>;
}

/// Outcome of adding a delta to an article's votes.
#[derive(Debug)]
pub enum VoteUpdate {
    Updated(Article),
    NoSuchArticle,
    /// The new total does not fit the `votes` column; nothing was written.
    OutOfRange,
}

/// Applies `statement_timeout` to every connection the pool hands out.
#[derive(Debug)]
struct StatementTimeout(Duration);

impl r2d2::CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET statement_timeout = {}", self.0.as_millis()))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_connection_pool(config: &Config) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(config.database_timeout)
        .connection_customizer(Box::new(StatementTimeout(config.database_timeout)))
        .build(manager)
        .context("Failed to create pool.")
}

#[cfg(test)]
pub fn create_connection() -> PgConnection {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&database_url).expect("Failed to connect to database")
}

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    fn fetch_topics(&self) -> Result<Vec<Topic>> {
        let conn = self.pool.get()?;
        Ok(Topic::all(&conn)?)
    }

    fn topic_exists(&self, slug: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        Ok(Topic::exists(&conn, slug)?)
    }

    fn fetch_users(&self) -> Result<Vec<User>> {
        let conn = self.pool.get()?;
        Ok(User::all(&conn)?)
    }

    fn fetch_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        Ok(User::find_by_username(&conn, username)?)
    }

    fn fetch_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleSummary>> {
        let conn = self.pool.get()?;
        Article::list(&conn, filter).context("Failed to list articles")
    }

    fn fetch_article_by_id(&self, id: i32) -> Result<Vec<ArticleSummary>> {
        let conn = self.pool.get()?;
        Ok(Article::find_summary(&conn, id)?)
    }

    fn update_article_votes(&self, id: i32, delta: i32) -> Result<VoteUpdate> {
        let conn = self.pool.get()?;
        match Article::increment_votes(&conn, id, delta) {
            Ok(Some(article)) => Ok(VoteUpdate::Updated(article)),
            Ok(None) => Ok(VoteUpdate::NoSuchArticle),
            // integer out of range (SQLSTATE 22003)
            Err(DieselError::DatabaseError(_, info))
                if info.message().contains("out of range") =>
            {
                Ok(VoteUpdate::OutOfRange)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to update votes of article {}", id))),
        }
    }

    fn fetch_comments(
        &self,
        article_id: i32,
        filter: &CommentFilter,
    ) -> Result<Option<Vec<Comment>>> {
        let conn = self.pool.get()?;
        if !Article::exists(&conn, article_id)? {
            return Ok(None);
        }
        let comments = Comment::list_for_article(&conn, article_id, filter)?;
        Ok(Some(comments))
    }

    fn insert_comment(&self, article_id: i32, author: &str, body: &str) -> Result<Comment> {
        let conn = self.pool.get()?;
        Comment::create(&conn, article_id, author, body)
            .with_context(|| format!("Failed to add comment to article {}", article_id))
    }
}

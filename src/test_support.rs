//! In-memory stores and an app builder for route tests.

use crate::db::{SharedStore, Store, VoteUpdate};
use crate::models::{Article, ArticleSummary, Comment, Topic, User};
use crate::validation::{
    ArticleFilter, ArticleSortColumn, CommentFilter, CommentSortColumn, SortOrder,
};
use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

/// Builds the API with the given store the same way `run` does.
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .data($store)
                .app_data(crate::errors::json_config())
                .configure(crate::routes::configure)
                .default_service(actix_web::web::route().to(crate::errors::route_not_found)),
        )
    };
}

struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn at(millis: i64) -> NaiveDateTime {
    NaiveDateTime::from_timestamp_opt(millis / 1000, ((millis % 1000) * 1_000_000) as u32)
        .unwrap()
}

fn topic(slug: &str, description: &str) -> Topic {
    Topic {
        slug: slug.to_owned(),
        description: description.to_owned(),
    }
}

fn user(username: &str, name: &str) -> User {
    User {
        username: username.to_owned(),
        name: name.to_owned(),
        avatar_url: format!("https://avatars.example.com/{}.png", username),
    }
}

fn article(id: i32, title: &str, topic: &str, author: &str, votes: i32, created: i64) -> Article {
    Article {
        article_id: id,
        title: title.to_owned(),
        body: format!("Body of {}", title),
        votes,
        topic: topic.to_owned(),
        author: author.to_owned(),
        created_at: at(created),
    }
}

fn comment(
    id: i32,
    article_id: i32,
    author: &str,
    body: &str,
    votes: i32,
    created: i64,
) -> Comment {
    Comment {
        comment_id: id,
        article_id,
        author: author.to_owned(),
        body: body.to_owned(),
        votes,
        created_at: at(created),
    }
}

/// Topics `mitch`, `cats` and `paper` (no articles); users `butter_bridge`,
/// `icellusedkars`, `rogersop` and `lurker` (no articles); six articles.
pub fn seeded_store() -> SharedStore {
    let tables = Tables {
        topics: vec![
            topic("mitch", "The man, the Mitch, the legend"),
            topic("cats", "Not dogs"),
            topic("paper", "what books are made of"),
        ],
        users: vec![
            user("butter_bridge", "jonny"),
            user("icellusedkars", "sam"),
            user("rogersop", "paul"),
            user("lurker", "do_nothing"),
        ],
        articles: vec![
            article(
                1,
                "Living in the shadow of a great man",
                "mitch",
                "butter_bridge",
                100,
                1_542_284_514_171,
            ),
            article(
                2,
                "Sony Vaio; or, The Laptop",
                "mitch",
                "icellusedkars",
                0,
                1_416_140_514_171,
            ),
            article(
                3,
                "Eight pug gifs that remind me of mitch",
                "mitch",
                "icellusedkars",
                5,
                1_289_996_514_171,
            ),
            article(4, "Student SUES Mitch!", "mitch", "rogersop", -2, 1_163_852_514_171),
            article(
                5,
                "UNCOVERED: catspiracy to bring down democracy",
                "cats",
                "rogersop",
                12,
                1_037_708_514_171,
            ),
            article(6, "A", "mitch", "icellusedkars", 1, 911_564_514_171),
        ],
        comments: vec![
            comment(
                1,
                1,
                "butter_bridge",
                "Oh, I've got compassion running out of my nose, pal!",
                16,
                1_511_354_163_389,
            ),
            comment(
                2,
                1,
                "icellusedkars",
                "The beautiful thing about treasure is that it exists.",
                14,
                1_479_818_163_389,
            ),
            comment(
                3,
                1,
                "icellusedkars",
                "Replacing the quiet elegance of the dark suit and tie.",
                100,
                1_448_282_163_389,
            ),
            comment(
                4,
                5,
                "butter_bridge",
                "What do you see? I have no idea where this will lead us.",
                16,
                1_101_386_163_389,
            ),
            comment(5, 5, "icellusedkars", "I hate streaming noses", 0, 1_069_850_163_389),
            comment(6, 3, "icellusedkars", "Lobster pot", 0, 1_352_210_163_389),
        ],
    };
    Arc::new(MemoryStore {
        tables: Mutex::new(tables),
    })
}

/// A store whose every call fails, as if the database were down.
pub fn failing_store() -> SharedStore {
    Arc::new(FailingStore)
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_articles(
    a: &ArticleSummary,
    b: &ArticleSummary,
    column: ArticleSortColumn,
) -> Ordering {
    match column {
        ArticleSortColumn::ArticleId => a.article_id.cmp(&b.article_id),
        ArticleSortColumn::Title => a.title.cmp(&b.title),
        ArticleSortColumn::Topic => a.topic.cmp(&b.topic),
        ArticleSortColumn::Author => a.author.cmp(&b.author),
        ArticleSortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        ArticleSortColumn::Votes => a.votes.cmp(&b.votes),
        ArticleSortColumn::CommentCount => a.comment_count.cmp(&b.comment_count),
    }
}

fn compare_comments(a: &Comment, b: &Comment, column: CommentSortColumn) -> Ordering {
    match column {
        CommentSortColumn::CommentId => a.comment_id.cmp(&b.comment_id),
        CommentSortColumn::Votes => a.votes.cmp(&b.votes),
        CommentSortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        CommentSortColumn::Author => a.author.cmp(&b.author),
        CommentSortColumn::Body => a.body.cmp(&b.body),
    }
}

impl Tables {
    fn summary(&self, article: &Article) -> ArticleSummary {
        let comment_count = self
            .comments
            .iter()
            .filter(|c| c.article_id == article.article_id)
            .count() as i64;
        ArticleSummary {
            article_id: article.article_id,
            title: article.title.clone(),
            body: article.body.clone(),
            votes: article.votes,
            topic: article.topic.clone(),
            author: article.author.clone(),
            created_at: article.created_at,
            comment_count,
        }
    }
}

impl Store for MemoryStore {
    fn fetch_topics(&self) -> Result<Vec<Topic>> {
        Ok(self.tables.lock().unwrap().topics.clone())
    }

    fn topic_exists(&self, slug: &str) -> Result<bool> {
        Ok(self.tables.lock().unwrap().topics.iter().any(|t| t.slug == slug))
    }

    fn fetch_users(&self) -> Result<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    fn fetch_user(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    fn fetch_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleSummary>> {
        let tables = self.tables.lock().unwrap();
        let mut found: Vec<ArticleSummary> = tables
            .articles
            .iter()
            .filter(|a| filter.author.as_ref().map_or(true, |author| &a.author == author))
            .filter(|a| filter.topic.as_ref().map_or(true, |topic| &a.topic == topic))
            .map(|a| tables.summary(a))
            .collect();
        found.sort_by(|a, b| {
            apply_order(compare_articles(a, b, filter.sort_by), filter.order)
                .then(a.article_id.cmp(&b.article_id))
        });
        Ok(found)
    }

    fn fetch_article_by_id(&self, id: i32) -> Result<Vec<ArticleSummary>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .filter(|a| a.article_id == id)
            .map(|a| tables.summary(a))
            .collect())
    }

    fn update_article_votes(&self, id: i32, delta: i32) -> Result<VoteUpdate> {
        let mut tables = self.tables.lock().unwrap();
        let article = match tables.articles.iter_mut().find(|a| a.article_id == id) {
            Some(article) => article,
            None => return Ok(VoteUpdate::NoSuchArticle),
        };
        match article.votes.checked_add(delta) {
            Some(votes) => {
                article.votes = votes;
                Ok(VoteUpdate::Updated(article.clone()))
            }
            None => Ok(VoteUpdate::OutOfRange),
        }
    }

    fn fetch_comments(
        &self,
        article_id: i32,
        filter: &CommentFilter,
    ) -> Result<Option<Vec<Comment>>> {
        let tables = self.tables.lock().unwrap();
        if !tables.articles.iter().any(|a| a.article_id == article_id) {
            return Ok(None);
        }
        let mut found: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            apply_order(compare_comments(a, b, filter.sort_by), filter.order)
                .then(a.comment_id.cmp(&b.comment_id))
        });
        Ok(Some(found))
    }

    fn insert_comment(&self, article_id: i32, author: &str, body: &str) -> Result<Comment> {
        let mut tables = self.tables.lock().unwrap();
        let comment_id = tables.comments.iter().map(|c| c.comment_id).max().unwrap_or(0) + 1;
        let comment = Comment {
            comment_id,
            article_id,
            author: author.to_owned(),
            body: body.to_owned(),
            votes: 0,
            created_at: Utc::now().naive_utc(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }
}

struct FailingStore;

fn unavailable<T>() -> Result<T> {
    Err(anyhow!("database is unavailable"))
}

impl Store for FailingStore {
    fn fetch_topics(&self) -> Result<Vec<Topic>> {
        unavailable()
    }

    fn topic_exists(&self, _slug: &str) -> Result<bool> {
        unavailable()
    }

    fn fetch_users(&self) -> Result<Vec<User>> {
        unavailable()
    }

    fn fetch_user(&self, _username: &str) -> Result<Option<User>> {
        unavailable()
    }

    fn fetch_articles(&self, _filter: &ArticleFilter) -> Result<Vec<ArticleSummary>> {
        unavailable()
    }

    fn fetch_article_by_id(&self, _id: i32) -> Result<Vec<ArticleSummary>> {
        unavailable()
    }

    fn update_article_votes(&self, _id: i32, _delta: i32) -> Result<VoteUpdate> {
        unavailable()
    }

    fn fetch_comments(
        &self,
        _article_id: i32,
        _filter: &CommentFilter,
    ) -> Result<Option<Vec<Comment>>> {
        unavailable()
    }

    fn insert_comment(&self, _article_id: i32, _author: &str, _body: &str) -> Result<Comment> {
        unavailable()
    }
}

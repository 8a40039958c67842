//! Query validation
//!
//! Raw query strings are decoded into the `*ListQuery` structs and then checked
//! here, before any data access happens. The result is a filter holding only
//! known sort columns and order directions, so the data layer never sees raw
//! client text in an `ORDER BY`.

use crate::errors::ApiError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl SortOrder {
    /// Accepts exactly `asc` or `desc`.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ApiError::InvalidOrderDirection(raw.to_owned())),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    CreatedAt,
    Votes,
    CommentCount,
}

impl Default for ArticleSortColumn {
    fn default() -> Self {
        ArticleSortColumn::CreatedAt
    }
}

impl ArticleSortColumn {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "article_id" => Ok(ArticleSortColumn::ArticleId),
            "title" => Ok(ArticleSortColumn::Title),
            "topic" => Ok(ArticleSortColumn::Topic),
            "author" => Ok(ArticleSortColumn::Author),
            "created_at" => Ok(ArticleSortColumn::CreatedAt),
            "votes" => Ok(ArticleSortColumn::Votes),
            "comment_count" => Ok(ArticleSortColumn::CommentCount),
            _ => Err(ApiError::UnknownSortColumn(raw.to_owned())),
        }
    }

    /// Column expression usable in the article listing's `ORDER BY`.
    pub fn as_sql(self) -> &'static str {
        match self {
            ArticleSortColumn::ArticleId => "articles.article_id",
            ArticleSortColumn::Title => "articles.title",
            ArticleSortColumn::Topic => "articles.topic",
            ArticleSortColumn::Author => "articles.author",
            ArticleSortColumn::CreatedAt => "articles.created_at",
            ArticleSortColumn::Votes => "articles.votes",
            ArticleSortColumn::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSortColumn {
    CommentId,
    Votes,
    CreatedAt,
    Author,
    Body,
}

impl Default for CommentSortColumn {
    fn default() -> Self {
        CommentSortColumn::CreatedAt
    }
}

impl CommentSortColumn {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "comment_id" => Ok(CommentSortColumn::CommentId),
            "votes" => Ok(CommentSortColumn::Votes),
            "created_at" => Ok(CommentSortColumn::CreatedAt),
            "author" => Ok(CommentSortColumn::Author),
            "body" => Ok(CommentSortColumn::Body),
            _ => Err(ApiError::UnknownSortColumn(raw.to_owned())),
        }
    }
}

/// Query string accepted by `GET /api/articles`.
#[derive(Deserialize, Default, Debug)]
pub struct ArticleListQuery {
    pub author: Option<String>,
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub author: Option<String>,
    pub topic: Option<String>,
    pub sort_by: ArticleSortColumn,
    pub order: SortOrder,
}

impl ArticleListQuery {
    pub fn to_filter(&self) -> Result<ArticleFilter, ApiError> {
        let order = parse_order(self.order_by.as_deref())?;
        let sort_by = match &self.sort_by {
            Some(column) => ArticleSortColumn::parse(column)?,
            None => ArticleSortColumn::default(),
        };
        Ok(ArticleFilter {
            author: self.author.clone(),
            topic: self.topic.clone(),
            sort_by,
            order,
        })
    }
}

/// Query string accepted by `GET /api/articles/{article_id}/comments`.
#[derive(Deserialize, Default, Debug)]
pub struct CommentListQuery {
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub sort_by: CommentSortColumn,
    pub order: SortOrder,
}

impl CommentListQuery {
    pub fn to_filter(&self) -> Result<CommentFilter, ApiError> {
        let order = parse_order(self.order_by.as_deref())?;
        let sort_by = match &self.sort_by {
            Some(column) => CommentSortColumn::parse(column)?,
            None => CommentSortColumn::default(),
        };
        Ok(CommentFilter { sort_by, order })
    }
}

fn parse_order(raw: Option<&str>) -> Result<SortOrder, ApiError> {
    raw.map(SortOrder::parse)
        .unwrap_or_else(|| Ok(SortOrder::default()))
}

/// Parses an `article_id` path segment. Only plain decimal literals of a
/// positive `i32` are accepted.
pub fn parse_article_id(raw: &str) -> Result<i32, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidArticleId(raw.to_owned()));
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidArticleId(raw.to_owned())),
    }
}

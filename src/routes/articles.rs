use super::with_store;
use crate::db::{SharedStore, VoteUpdate};
use crate::errors::ApiError;
use crate::extractors::Query;
use crate::models::ArticleSummary;
use crate::validation::{parse_article_id, ArticleListQuery};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleSummary>,
}

/// `article` is a one-element list for `GET` and a single object for `PATCH`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ArticleResponse<T> {
    pub article: T,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct VoteUpdateRequest {
    #[serde(default)]
    pub inc_votes: i32,
}

pub async fn list_articles(
    store: web::Data<SharedStore>,
    query: Query<ArticleListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.to_filter()?;
    let author = filter.author.clone();
    let topic = filter.topic.clone();
    let articles = with_store(&store, move |store| store.fetch_articles(&filter)).await?;
    if articles.is_empty() {
        // An empty listing is only an error when the filter value itself is unknown.
        if let Some(author) = author {
            let username = author.clone();
            let user = with_store(&store, move |store| store.fetch_user(&username)).await?;
            if user.is_none() {
                return Err(ApiError::AuthorNotFound(author));
            }
        }
        if let Some(topic) = topic {
            let slug = topic.clone();
            if !with_store(&store, move |store| store.topic_exists(&slug)).await? {
                return Err(ApiError::TopicNotFound(topic));
            }
        }
    }
    Ok(HttpResponse::Ok().json(ArticleListResponse { articles }))
}

pub async fn get_article(
    store: web::Data<SharedStore>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, ApiError> {
    let (raw_id,) = path.into_inner();
    let article_id = parse_article_id(&raw_id)?;
    let article = with_store(&store, move |store| store.fetch_article_by_id(article_id)).await?;
    if article.is_empty() {
        return Err(ApiError::ArticleNotFound(article_id));
    }
    Ok(HttpResponse::Ok().json(ArticleResponse { article }))
}

pub async fn update_article_votes(
    store: web::Data<SharedStore>,
    path: web::Path<(String,)>,
    data: web::Json<VoteUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let (raw_id,) = path.into_inner();
    let article_id = parse_article_id(&raw_id)?;
    let delta = data.inc_votes;
    let update = with_store(&store, move |store| {
        store.update_article_votes(article_id, delta)
    })
    .await?;
    match update {
        VoteUpdate::Updated(article) => {
            log::info!("article {} votes changed by {}", article_id, delta);
            Ok(HttpResponse::Ok().json(ArticleResponse { article }))
        }
        VoteUpdate::NoSuchArticle => Err(ApiError::ArticleNotFound(article_id)),
        VoteUpdate::OutOfRange => Err(ApiError::InvalidBody(format!(
            "inc_votes {} takes the votes of article {} out of range",
            delta, article_id
        ))),
    }
}

use super::with_store;
use crate::db::SharedStore;
use crate::errors::ApiError;
use crate::extractors::Query;
use crate::models::Comment;
use crate::validation::{parse_article_id, CommentListQuery};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `comments` holds a list when listing and the new comment when creating.
#[derive(Serialize, Deserialize, Debug)]
pub struct CommentsResponse<T> {
    pub comments: T,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct CommentCreateRequest {
    #[validate(length(min = 1, max = 300))]
    pub username: String,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
}

pub async fn list_comments(
    store: web::Data<SharedStore>,
    path: web::Path<(String,)>,
    query: Query<CommentListQuery>,
) -> Result<HttpResponse, ApiError> {
    let (raw_id,) = path.into_inner();
    let article_id = parse_article_id(&raw_id)?;
    let filter = query.to_filter()?;
    let comments =
        with_store(&store, move |store| store.fetch_comments(article_id, &filter)).await?;
    match comments {
        Some(comments) => Ok(HttpResponse::Ok().json(CommentsResponse { comments })),
        None => Err(ApiError::ArticleNotFound(article_id)),
    }
}

pub async fn create_comment(
    store: web::Data<SharedStore>,
    path: web::Path<(String,)>,
    data: web::Json<CommentCreateRequest>,
) -> Result<HttpResponse, ApiError> {
    let (raw_id,) = path.into_inner();
    let article_id = parse_article_id(&raw_id)?;
    data.validate()
        .map_err(|e| ApiError::InvalidBody(format!("{:?}", e)))?;
    let CommentCreateRequest { username, body } = data.into_inner();

    let article = with_store(&store, move |store| store.fetch_article_by_id(article_id)).await?;
    if article.is_empty() {
        return Err(ApiError::ArticleNotFound(article_id));
    }
    let author = username.clone();
    if with_store(&store, move |store| store.fetch_user(&author))
        .await?
        .is_none()
    {
        return Err(ApiError::UserNotFound(username));
    }

    let comment: Comment = with_store(&store, move |store| {
        store.insert_comment(article_id, &username, &body)
    })
    .await?;
    log::info!(
        "comment {} added to article {} by {}",
        comment.comment_id,
        article_id,
        comment.author
    );
    Ok(HttpResponse::Ok().json(CommentsResponse { comments: comment }))
}

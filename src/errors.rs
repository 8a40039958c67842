//! Error translation
//!
//! Every failure a handler can produce is an [`ApiError`]. The variants carry the
//! offending value for the logs; the client only ever sees the fixed message from
//! [`ApiError::message`] inside a `{"msg": ...}` body.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid order_by value `{0}`")]
    InvalidOrderDirection(String),
    #[error("cannot sort by unknown column `{0}`")]
    UnknownSortColumn(String),
    #[error("invalid article id `{0}`")]
    InvalidArticleId(String),
    #[error("no article with id {0}")]
    ArticleNotFound(i32),
    #[error("no author named `{0}`")]
    AuthorNotFound(String),
    #[error("no topic with slug `{0}`")]
    TopicNotFound(String),
    #[error("no user named `{0}`")]
    UserNotFound(String),
    #[error("could not decode query string: {0}")]
    InvalidQuery(String),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("no route matches the request")]
    RouteNotFound,
    #[error("method not allowed on this route")]
    MethodNotAllowed,
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub msg: String,
}

impl ApiError {
    /// The message sent to the client.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidOrderDirection(_) => "Invalid Request - please order_by asc or desc",
            ApiError::UnknownSortColumn(_) => "Unable to sort by undefined column",
            ApiError::InvalidArticleId(_) => "Invalid article ID",
            ApiError::ArticleNotFound(_) => "No article found",
            ApiError::AuthorNotFound(_) => "No articles found by that author",
            ApiError::TopicNotFound(_) => "No articles found relating to that topic",
            ApiError::UserNotFound(_) => "No user found",
            ApiError::InvalidQuery(_) => "Invalid query string",
            ApiError::InvalidBody(_) => "Invalid request body",
            ApiError::RouteNotFound => "Route Not Found",
            ApiError::MethodNotAllowed => "Method Not Allowed",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidOrderDirection(_)
            | ApiError::UnknownSortColumn(_)
            | ApiError::InvalidArticleId(_)
            | ApiError::InvalidQuery(_)
            | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::ArticleNotFound(_)
            | ApiError::AuthorNotFound(_)
            | ApiError::TopicNotFound(_)
            | ApiError::UserNotFound(_)
            | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Internal(_) => log::error!("{}", self),
            _ => log::debug!("{}", self),
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            msg: self.message().to_owned(),
        })
    }
}

impl From<BlockingError<anyhow::Error>> for ApiError {
    fn from(e: BlockingError<anyhow::Error>) -> Self {
        match e {
            BlockingError::Error(e) => ApiError::Internal(e),
            BlockingError::Canceled => {
                ApiError::Internal(anyhow::anyhow!("blocking operation was canceled"))
            }
        }
    }
}

/// JSON extractor configuration that reports malformed bodies as [`ApiError::InvalidBody`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidBody(err.to_string()).into())
}

pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    log::debug!("no route for {} {}", req.method(), req.path());
    Err(ApiError::RouteNotFound)
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    log::debug!("{} not allowed on {}", req.method(), req.path());
    Err(ApiError::MethodNotAllowed)
}

use crate::db::{SharedStore, Store};
use crate::errors::{method_not_allowed, route_not_found, ApiError};
use actix_web::{web, HttpResponse, Resource};
use serde_json::json;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

/// Route table for the whole API. Each resource answers unknown methods with
/// 405; unknown paths under `/api` get 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(resource("").route(web::get().to(index)))
            .service(resource("/topics").route(web::get().to(topics::list_topics)))
            .service(resource("/users").route(web::get().to(users::list_users)))
            .service(resource("/users/{username}").route(web::get().to(users::get_user)))
            .service(resource("/articles").route(web::get().to(articles::list_articles)))
            .service(
                resource("/articles/{article_id}")
                    .route(web::get().to(articles::get_article))
                    .route(web::patch().to(articles::update_article_votes)),
            )
            .service(
                resource("/articles/{article_id}/comments")
                    .route(web::get().to(comments::list_comments))
                    .route(web::post().to(comments::create_comment)),
            )
            .default_service(web::route().to(route_not_found)),
    );
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::route().to(method_not_allowed))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

/// Runs a blocking store call on the thread pool.
pub(crate) async fn with_store<F, T>(store: &web::Data<SharedStore>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn Store) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = store.get_ref().clone();
    Ok(web::block(move || f(store.as_ref())).await?)
}

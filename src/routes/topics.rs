use super::with_store;
use crate::db::SharedStore;
use crate::errors::ApiError;
use crate::models::Topic;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct TopicListResponse {
    pub topics: Vec<Topic>,
}

pub async fn list_topics(store: web::Data<SharedStore>) -> Result<HttpResponse, ApiError> {
    let topics = with_store(&store, |store| store.fetch_topics()).await?;
    Ok(HttpResponse::Ok().json(TopicListResponse { topics }))
}
